use crate::Result;

use arbiter_core::Error;

/// Turns an empty result into an error when the caller asked for it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Thrower {
    message: Option<String>,
}

impl Thrower {
    pub(crate) fn add(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub(crate) fn is_set(&self) -> bool {
        self.message.is_some()
    }

    pub(crate) fn check<T>(&self, records: &[T]) -> Result<()> {
        match &self.message {
            Some(message) if records.is_empty() => {
                Err(Error::record_not_found(Some(message.clone())))
            }
            _ => Ok(()),
        }
    }
}
