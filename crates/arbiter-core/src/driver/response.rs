use crate::{Error, Result};

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of records impacted by the operation
    Count(u64),

    /// Raw records, arbitrary nested key-value structures
    Records(Vec<Value>),

    /// Identity assigned to a newly created record
    Created(Value),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn records(records: Vec<Value>) -> Self {
        Self {
            rows: Rows::Records(records),
        }
    }

    pub fn created(id: impl Into<Value>) -> Self {
        Self {
            rows: Rows::Created(id.into()),
        }
    }

    pub fn into_records(self) -> Result<Vec<Value>> {
        match self.rows {
            Rows::Records(records) => Ok(records),
            rows => Err(Error::invalid_result(format!(
                "expected records, got {}",
                rows.describe()
            ))),
        }
    }

    pub fn into_created(self) -> Result<Value> {
        match self.rows {
            Rows::Created(id) if !id.is_null() => Ok(id),
            rows => Err(Error::invalid_result(format!(
                "expected a created id, got {}",
                rows.describe()
            ))),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_records(&self) -> bool {
        matches!(self, Self::Records(_))
    }

    fn describe(&self) -> &'static str {
        match self {
            Rows::Count(_) => "a count",
            Rows::Records(_) => "records",
            Rows::Created(id) if id.is_null() => "a null id",
            Rows::Created(_) => "a created id",
        }
    }
}
