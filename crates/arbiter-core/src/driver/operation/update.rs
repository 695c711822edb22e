use super::Operation;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Remote object to update
    pub object: String,

    /// Identity of the record being written
    pub id: Value,

    /// Remote field name to value, only the changed fields
    pub fields: Map<String, Value>,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
