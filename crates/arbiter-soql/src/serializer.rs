#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod expr;
mod statement;

mod value;
pub use value::escape;
use value::Quoted;

use arbiter_core::stmt;

/// Serialize a statement to a SOQL string
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a> {
    /// Where to write the serialized SOQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer { _priv: () }
    }

    /// Renders `SELECT ... FROM ...` with optional `WHERE`, `ORDER BY`,
    /// `LIMIT` and `OFFSET` clauses, in that order.
    pub fn serialize(&self, select: &stmt::Select) -> String {
        let mut ret = String::new();
        let mut f = Formatter { dst: &mut ret };
        select.to_sql(&mut f);
        ret
    }

    /// Renders only the condition part of a filter, without the `WHERE`
    /// keyword.
    pub fn serialize_filter(&self, filter: &stmt::Filter) -> String {
        let mut ret = String::new();
        let mut f = Formatter { dst: &mut ret };
        filter.to_sql(&mut f);
        ret
    }
}
