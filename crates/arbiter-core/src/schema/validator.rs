use super::{Field, FieldDefault, FieldType};
use crate::{Error, Result};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Number, Value};

/// A field records may write back, with its remote name and validator.
#[derive(Debug, Clone)]
pub struct Writable {
    remote: String,
    validator: Validator,
}

impl Writable {
    pub(crate) fn new(remote: String, validator: Validator) -> Writable {
        Writable { remote, validator }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn validate(&self, value: Option<Value>) -> Result<Option<Value>> {
        self.validator.validate(value)
    }
}

/// Validation pipeline for one writable field.
///
/// Steps run in a fixed order: `default` (only when no value is given), enum
/// membership, type coercion, then the `required` check. Each step sees the
/// previous step's output.
#[derive(Debug, Clone)]
pub struct Validator {
    field: String,
    default: Option<FieldDefault>,
    one_of: Option<Vec<Value>>,
    ty: Option<FieldType>,
    required: bool,
}

impl Validator {
    pub(crate) fn new(field: &str, config: &Field) -> Validator {
        Validator {
            field: field.to_string(),
            default: config.default.clone(),
            one_of: config.one_of.clone(),
            ty: config.ty,
            required: config.required,
        }
    }

    /// Validates `value`, where `None` means no value was provided at all.
    ///
    /// Returns the possibly coerced value to store.
    pub fn validate(&self, value: Option<Value>) -> Result<Option<Value>> {
        let value = match value {
            Some(value) => Some(value),
            None => self.default.as_ref().map(FieldDefault::get),
        };

        let value = match value {
            Some(value) if !value.is_null() => {
                self.check_one_of(&value)?;
                Some(self.coerce(value)?)
            }
            value => value,
        };

        if self.required && value.as_ref().map_or(true, Value::is_null) {
            return Err(Error::validation(
                &self.field,
                "required field does not have a value set",
            ));
        }

        Ok(value)
    }

    fn check_one_of(&self, value: &Value) -> Result<()> {
        let Some(one_of) = &self.one_of else {
            return Ok(());
        };

        if one_of.contains(value) {
            return Ok(());
        }

        let accepted = one_of
            .iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                value => value.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        Err(Error::validation(
            &self.field,
            format!("only accepts [{accepted}], got {value}"),
        ))
    }

    fn coerce(&self, value: Value) -> Result<Value> {
        let Some(ty) = self.ty else {
            return Ok(value);
        };

        let coerced = match ty {
            FieldType::String => coerce_string(value.clone()),
            FieldType::Number => coerce_number(&value),
            FieldType::Boolean => coerce_boolean(&value),
            FieldType::Date => coerce_date(&value),
        };

        coerced.ok_or_else(|| {
            Error::validation(&self.field, format!("expected type {ty}, got {value}"))
        })
    }
}

fn coerce_string(value: Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Some(Value::Number(n.into()));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        _ => None,
    }
}

fn coerce_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) if s == "true" => Some(Value::Bool(true)),
        Value::String(s) if s == "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

/// Dates travel as strings: full timestamps normalize to UTC RFC 3339 with
/// millisecond precision, bare dates stay `YYYY-MM-DD`. Numbers are read as
/// epoch milliseconds.
fn coerce_date(value: &Value) -> Option<Value> {
    let format = |dt: DateTime<Utc>| Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true));

    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(format(dt.with_timezone(&Utc)));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(format),
        _ => None,
    }
}
