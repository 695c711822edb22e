use super::Operation;

use crate::stmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Find {
    /// Structured form of the query
    pub select: stmt::Select,

    /// The same query rendered as SOQL
    pub soql: String,
}

impl From<Find> for Operation {
    fn from(value: Find) -> Self {
        Self::Find(value)
    }
}
