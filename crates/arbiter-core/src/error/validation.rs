use super::Error;

/// Error when a value written to a record fails its field validator.
#[derive(Debug)]
pub(super) struct ValidationError {
    field: Box<str>,
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid value for field {}: {}", self.field, self.message)
    }
}

impl Error {
    /// Creates a validation error for the given local field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            field: field.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.any_in_chain(&|kind| matches!(kind, super::ErrorKind::Validation(_)))
    }
}
