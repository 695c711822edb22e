use super::Operation;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Create {
    /// Remote object to create
    pub object: String,

    /// Remote field name to value
    pub fields: Map<String, Value>,
}

impl From<Create> for Operation {
    fn from(value: Create) -> Self {
        Self::Create(value)
    }
}
