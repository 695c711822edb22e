use crate::{Error, Result};

/// How many associated records each parent receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    /// The first matching record, or null
    HasOne,

    /// Every matching record, possibly none
    HasMany,
}

/// A cross-model join the remote schema cannot express natively.
///
/// To resolve it, take the `from` values of the parent records and query
/// `model` where `to` is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationConfig {
    /// Local field on the parent holding the join key
    pub from: String,

    /// Local field on the associated model matched against `from`
    pub to: String,

    pub kind: AssociationKind,

    /// Registered name of the associated model
    pub model: String,
}

impl AssociationConfig {
    pub fn has_many(
        from: impl Into<String>,
        to: impl Into<String>,
        model: impl Into<String>,
    ) -> AssociationConfig {
        AssociationConfig {
            from: from.into(),
            to: to.into(),
            kind: AssociationKind::HasMany,
            model: model.into(),
        }
    }

    pub fn has_one(
        from: impl Into<String>,
        to: impl Into<String>,
        model: impl Into<String>,
    ) -> AssociationConfig {
        AssociationConfig {
            from: from.into(),
            to: to.into(),
            kind: AssociationKind::HasOne,
            model: model.into(),
        }
    }

    pub fn is_has_one(&self) -> bool {
        self.kind == AssociationKind::HasOne
    }

    pub(crate) fn verify(&self, name: &str) -> Result<()> {
        for (part, value) in [("from", &self.from), ("to", &self.to), ("model", &self.model)] {
            if value.is_empty() {
                return Err(Error::invalid_configuration(format!(
                    "association {name} is missing `{part}`"
                )));
            }
        }
        Ok(())
    }
}
