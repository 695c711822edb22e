use crate::Result;

use arbiter_core::{
    stmt::{Direction, OrderBy, OrderByExpr},
    Error, Schema,
};

/// Sort input accepted by [`Query::sort`](crate::Query::sort).
///
/// A string lists fields separated by spaces, each ascending unless prefixed
/// with `-`. Pairs give an explicit direction, `1` or `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    fields: Vec<(String, i64)>,
}

impl From<&str> for SortSpec {
    fn from(spec: &str) -> Self {
        let fields = spec
            .split_whitespace()
            .map(|part| match part.strip_prefix('-') {
                Some(field) => (field.to_string(), -1),
                None => (part.to_string(), 1),
            })
            .collect();

        SortSpec { fields }
    }
}

impl From<String> for SortSpec {
    fn from(spec: String) -> Self {
        spec.as_str().into()
    }
}

impl<K: Into<String>> From<Vec<(K, i64)>> for SortSpec {
    fn from(fields: Vec<(K, i64)>) -> Self {
        SortSpec {
            fields: fields
                .into_iter()
                .map(|(field, direction)| (field.into(), direction))
                .collect(),
        }
    }
}

impl<K: Into<String>, const N: usize> From<[(K, i64); N]> for SortSpec {
    fn from(fields: [(K, i64); N]) -> Self {
        Vec::from(fields).into()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for SortSpec {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        SortSpec {
            fields: map
                .into_iter()
                .map(|(field, direction)| (field, direction.as_i64().unwrap_or(0)))
                .collect(),
        }
    }
}

/// The sort of a query. Setting it again replaces the previous sort.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sort {
    spec: Option<SortSpec>,
}

impl Sort {
    pub(crate) fn add(&mut self, spec: impl Into<SortSpec>) {
        self.spec = Some(spec.into());
    }

    /// Maps sort fields to remote paths. `None` means no sort was set.
    pub(crate) fn build(&self, schema: &Schema) -> Result<Option<OrderBy>> {
        let Some(spec) = &self.spec else {
            return Ok(None);
        };

        if spec.fields.is_empty() {
            return Ok(None);
        }

        let exprs = spec
            .fields
            .iter()
            .map(|(field, sign)| {
                let direction = Direction::from_sign(*sign).ok_or_else(|| {
                    Error::invalid_configuration(format!(
                        "sort direction for field {field} must be 1 or -1"
                    ))
                })?;

                Ok(OrderByExpr {
                    field: schema.map_field(field)?,
                    direction,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(exprs.into()))
    }
}
