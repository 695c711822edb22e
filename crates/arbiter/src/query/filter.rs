use crate::Result;

use arbiter_core::{
    stmt::{self, BinaryOp, Expr},
    Error, Schema,
};

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Filter input accepted by [`Query::filter`](crate::Query::filter).
///
/// A string is a raw filter and bypasses field mapping. A map holds
/// conditions keyed by local field name:
///
/// * `null` matches a null field
/// * a list matches any of its values
/// * a scalar matches that value
/// * an object applies operators: `like`, `not`, `notlike`, `gt`, `gte`,
///   `lt`, `lte`
#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    Raw(String),
    Map(Map<String, Value>),

    /// Input that is neither a string nor a map; reported when the query is
    /// built
    Invalid(Value),
}

impl From<&str> for Criteria {
    fn from(raw: &str) -> Self {
        Criteria::Raw(raw.to_string())
    }
}

impl From<String> for Criteria {
    fn from(raw: String) -> Self {
        Criteria::Raw(raw)
    }
}

impl From<Map<String, Value>> for Criteria {
    fn from(map: Map<String, Value>) -> Self {
        Criteria::Map(map)
    }
}

impl From<Value> for Criteria {
    fn from(value: Value) -> Self {
        match value {
            Value::String(raw) => Criteria::Raw(raw),
            Value::Object(map) => Criteria::Map(map),
            Value::Null => Criteria::Map(Map::new()),
            value => Criteria::Invalid(value),
        }
    }
}

/// Accumulated filter state.
///
/// Conditions merge by field across calls. A raw filter wins over every
/// structured condition while it is set, except scoped ones.
#[derive(Debug, Clone, Default)]
pub(crate) struct Filter {
    raw: Option<String>,
    conditions: IndexMap<String, Value>,

    /// Conditions that always apply, ANDed in front of everything else
    scope: IndexMap<String, Value>,

    errors: Vec<Error>,
}

impl Filter {
    pub(crate) fn add(&mut self, criteria: impl Into<Criteria>) {
        match criteria.into() {
            Criteria::Raw(raw) => self.raw = Some(raw),
            Criteria::Map(map) => self.conditions.extend(map),
            Criteria::Invalid(value) => self.errors.push(Error::invalid_configuration(format!(
                "query filter must be a string or a map; got {value}"
            ))),
        }
    }

    /// Adds a condition that neither later calls nor a raw filter can drop.
    pub(crate) fn scope(&mut self, field: impl Into<String>, condition: Value) {
        self.scope.insert(field.into(), condition);
    }

    pub(crate) fn build(&self, schema: &Schema) -> Result<Option<stmt::Filter>> {
        if !self.errors.is_empty() {
            return Err(Error::aggregate(self.errors.iter().cloned()));
        }

        let structured = self
            .raw
            .is_none()
            .then_some(&self.conditions)
            .into_iter()
            .flatten();

        let mut exprs = vec![];
        let mut errors = vec![];

        for (field, condition) in self.scope.iter().chain(structured) {
            match schema
                .map_field(field)
                .and_then(|remote| condition_exprs(&remote, condition, &mut exprs))
            {
                Ok(()) => {}
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(Error::aggregate(errors));
        }

        Ok(match &self.raw {
            Some(raw) if exprs.is_empty() => Some(stmt::Filter::Raw(raw.clone())),
            Some(raw) => {
                if !raw.trim().is_empty() {
                    exprs.push(Expr::Raw(raw.clone()));
                }
                Some(stmt::Filter::And(exprs))
            }
            None if exprs.is_empty() => None,
            None => Some(stmt::Filter::And(exprs)),
        })
    }
}

fn condition_exprs(field: &str, condition: &Value, exprs: &mut Vec<Expr>) -> Result<()> {
    match condition {
        Value::Null => exprs.push(Expr::is_null(field)),
        Value::Array(list) => exprs.push(Expr::in_list(field, literal_list(field, list)?)),
        Value::Object(operators) => {
            if operators.is_empty() {
                return Err(Error::invalid_configuration(format!(
                    "filter on field {field} has no operators"
                )));
            }

            for (operator, value) in operators {
                exprs.push(operator_expr(field, operator, value)?);
            }
        }
        scalar => exprs.push(Expr::eq(field, literal(field, scalar)?)),
    }

    Ok(())
}

fn operator_expr(field: &str, operator: &str, value: &Value) -> Result<Expr> {
    let op = match operator {
        "gt" => BinaryOp::Gt,
        "gte" => BinaryOp::Ge,
        "lt" => BinaryOp::Lt,
        "lte" => BinaryOp::Le,
        "like" | "notlike" | "notLike" => {
            return Ok(Expr::Like {
                field: field.to_string(),
                pattern: literal(field, value)?,
                negate: operator != "like",
            })
        }
        "not" => {
            return Ok(match value {
                Value::Null => Expr::IsNull {
                    field: field.to_string(),
                    negate: true,
                },
                Value::Array(list) => Expr::InList {
                    field: field.to_string(),
                    list: literal_list(field, list)?,
                    negate: true,
                },
                value => Expr::binary_op(field, BinaryOp::Ne, literal(field, value)?),
            })
        }
        operator => {
            return Err(Error::invalid_configuration(format!(
                "unsupported filter operator {operator} on field {field}"
            )))
        }
    };

    Ok(Expr::binary_op(field, op, literal(field, value)?))
}

fn literal(field: &str, value: &Value) -> Result<stmt::Value> {
    stmt::Value::try_from(value.clone()).map_err(|err| {
        err.context(Error::invalid_configuration(format!(
            "filter on field {field}"
        )))
    })
}

fn literal_list(field: &str, list: &[Value]) -> Result<Vec<stmt::Value>> {
    if list.is_empty() {
        return Err(Error::invalid_configuration(format!(
            "filter on field {field} has an empty list"
        )));
    }

    list.iter().map(|value| literal(field, value)).collect()
}
