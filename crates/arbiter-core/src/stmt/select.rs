use super::{Filter, OrderBy};

/// A read against one remote object, with every name already mapped to its
/// remote form.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Remote object the query reads from
    pub source: String,

    /// Remote field paths, in selection order
    pub fields: Vec<String>,

    pub filter: Option<Filter>,

    pub order_by: Option<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Select {
    pub fn new(source: impl Into<String>, fields: Vec<String>) -> Select {
        Select {
            source: source.into(),
            fields,
            filter: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }
}
