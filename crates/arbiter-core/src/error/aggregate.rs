use super::Error;

/// Several errors reported together.
///
/// Query builders accumulate their failures instead of failing on the first
/// bad call; the orchestrator folds them into one of these before any remote
/// call is made.
#[derive(Debug)]
pub(super) struct AggregateError {
    pub(super) errors: Vec<Error>,
}

impl std::error::Error for AggregateError {}

impl core::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut s = "";
        for err in &self.errors {
            write!(f, "{s}{err}")?;
            s = ", ";
        }
        Ok(())
    }
}

impl Error {
    /// Combines several errors into one.
    ///
    /// A single error is returned as-is.
    pub fn aggregate(errors: impl IntoIterator<Item = Error>) -> Error {
        let mut errors: Vec<_> = errors.into_iter().collect();

        if errors.len() == 1 {
            return errors.remove(0);
        }

        Error::from(super::ErrorKind::Aggregate(AggregateError { errors }))
    }

    /// Returns `true` if this error combines several errors.
    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Aggregate(_))
    }

    /// The errors folded into this one. A non-aggregate error yields itself.
    pub fn errors(&self) -> Vec<&Error> {
        match self.kind() {
            super::ErrorKind::Aggregate(aggregate) => aggregate.errors.iter().collect(),
            _ => vec![self],
        }
    }
}
