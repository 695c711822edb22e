use crate::escape;

use arbiter_core::{stmt, Error, Result};
use serde_json::{Map, Value};

/// Substitutes `@name` placeholders in a raw query with parameter values.
///
/// Scalars are escaped and single-quoted when `quotes` is set, and inserted
/// verbatim otherwise. Arrays always render as a quoted `('a', 'b')` list.
/// Placeholders without a matching parameter are left in place.
pub fn inject(query: &str, params: &Map<String, Value>, quotes: bool) -> Result<String> {
    let mut ret = String::with_capacity(query.len());
    let mut rest = query;

    while let Some(at) = rest.find('@') {
        ret.push_str(&rest[..at]);

        let after = &rest[at + 1..];
        let len = after
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
            .unwrap_or(after.len());
        let name = &after[..len];

        match params.get(name) {
            Some(value) if !name.is_empty() => ret.push_str(&render(name, value, quotes)?),
            _ => {
                ret.push('@');
                ret.push_str(name);
            }
        }

        rest = &after[len..];
    }

    ret.push_str(rest);
    Ok(ret)
}

fn render(name: &str, value: &Value, quotes: bool) -> Result<String> {
    match value {
        Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| scalar(name, item).map(|item| quote(&item)))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("({})", items.join(", ")))
        }
        value => {
            let literal = scalar(name, value)?;
            if quotes {
                Ok(quote(&literal))
            } else {
                Ok(literal.as_text().unwrap_or_else(|| "null".to_string()))
            }
        }
    }
}

fn scalar(name: &str, value: &Value) -> Result<stmt::Value> {
    stmt::Value::try_from(value.clone())
        .map_err(|err| err.context(Error::invalid_configuration(format!("parameter @{name}"))))
}

fn quote(value: &stmt::Value) -> String {
    match value.as_text() {
        Some(text) => format!("'{}'", escape(&text)),
        None => "null".to_string(),
    }
}
