mod create;
pub use create::Create;

mod find;
pub use find::Find;

mod raw;
pub use raw::Raw;

mod update;
pub use update::Update;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read records. Answered with `Rows::Records`.
    Find(Find),

    /// Create a record. Answered with `Rows::Created`.
    Create(Create),

    /// Write fields of an existing record. Answered with `Rows::Count`.
    Update(Update),

    /// Run caller supplied SOQL. Answered with `Rows::Records`.
    Raw(Raw),
}

impl Operation {
    pub fn is_find(&self) -> bool {
        matches!(self, Operation::Find(_))
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Operation::Create(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Operation::Update(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Operation::Raw(_))
    }

    /// Remote object the operation targets.
    pub fn object(&self) -> &str {
        match self {
            Operation::Find(op) => &op.select.source,
            Operation::Create(op) => &op.object,
            Operation::Update(op) => &op.object,
            Operation::Raw(op) => &op.object,
        }
    }
}
