use super::Error;

/// Error when a field path cannot be resolved against a schema.
///
/// Carries the offending path segment and the remote object name of the
/// schema node it was looked up on.
#[derive(Debug)]
pub(super) struct UnknownFieldError {
    field: Box<str>,
    object: Box<str>,
}

impl std::error::Error for UnknownFieldError {}

impl core::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown field {} has been requested from schema {}",
            self.field, self.object
        )
    }
}

impl Error {
    /// Creates an unknown field error.
    pub fn unknown_field(field: impl Into<String>, object: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownField(UnknownFieldError {
            field: field.into().into(),
            object: object.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown field error.
    pub fn is_unknown_field(&self) -> bool {
        self.any_in_chain(&|kind| matches!(kind, super::ErrorKind::UnknownField(_)))
    }
}
