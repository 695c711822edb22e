use super::Error;

/// Error when the caller hands Arbiter something it cannot use.
///
/// This occurs when:
/// - A query asks for an association the model does not declare
/// - A restriction names a field that is not writable
/// - A limit or skip amount is not a number
/// - A schema or model definition is malformed
/// - A model name is registered twice or looked up but never registered
#[derive(Debug)]
pub(super) struct InvalidConfiguration {
    message: Box<str>,
}

impl std::error::Error for InvalidConfiguration {}

impl core::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfiguration(InvalidConfiguration {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid configuration error.
    pub fn is_invalid_configuration(&self) -> bool {
        self.any_in_chain(&|kind| matches!(kind, super::ErrorKind::InvalidConfiguration(_)))
    }
}
