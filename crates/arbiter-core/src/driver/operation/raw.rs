use super::Operation;

/// A hand-written query, sent as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    /// Remote object of the model the query was issued through
    pub object: String,

    pub soql: String,
}

impl From<Raw> for Operation {
    fn from(value: Raw) -> Self {
        Self::Raw(value)
    }
}
