use crate::Result;

use arbiter_core::Error;

/// Limit and offset of a query.
///
/// Bad amounts are recorded instead of rejected so calls can keep chaining;
/// they surface when the query is built.
#[derive(Debug, Clone, Default)]
pub(crate) struct Modifier {
    limit: Option<u64>,
    skip: Option<u64>,
    errors: Vec<Error>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) limit: Option<u64>,
    pub(crate) skip: Option<u64>,
}

/// A row count passed to `limit` or `skip`.
pub trait IntoAmount {
    /// Returns `None` when the input is not a non-negative whole number.
    fn into_amount(self) -> Option<u64>;
}

impl Modifier {
    pub(crate) fn add_limit(&mut self, amount: impl IntoAmount) {
        match amount.into_amount() {
            Some(amount) => self.limit = Some(amount),
            None => self.errors.push(amount_error("limit")),
        }
    }

    pub(crate) fn add_skip(&mut self, amount: impl IntoAmount) {
        match amount.into_amount() {
            Some(amount) => self.skip = Some(amount),
            None => self.errors.push(amount_error("[skip||offset]")),
        }
    }

    pub(crate) fn build(&self) -> Result<Bounds> {
        if !self.errors.is_empty() {
            return Err(Error::aggregate(self.errors.iter().cloned()));
        }

        Ok(Bounds {
            limit: self.limit,
            skip: self.skip,
        })
    }
}

fn amount_error(method: &str) -> Error {
    Error::invalid_configuration(format!("query.{method}(amount) must be passed a number"))
}

macro_rules! impl_into_amount_unsigned {
    ($($ty:ty),*) => {
        $(
            impl IntoAmount for $ty {
                fn into_amount(self) -> Option<u64> {
                    u64::try_from(self).ok()
                }
            }
        )*
    };
}

impl_into_amount_unsigned!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoAmount for &str {
    fn into_amount(self) -> Option<u64> {
        self.trim().parse().ok()
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> Option<u64> {
        self.as_str().into_amount()
    }
}

impl IntoAmount for serde_json::Value {
    fn into_amount(self) -> Option<u64> {
        match self {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.into_amount(),
            _ => None,
        }
    }
}
