use super::IntoFields;
use crate::Result;

use arbiter_core::{Error, Schema};

use indexmap::IndexSet;
use std::sync::Arc;

/// Writable fields the records of a query may not change.
#[derive(Debug, Clone, Default)]
pub(crate) struct Restrictions {
    restricted: IndexSet<String>,
    error: Option<Error>,
}

impl Restrictions {
    /// Restrict every writable except `mutations`.
    pub(crate) fn allow(&mut self, schema: &Schema, mutations: impl IntoFields) {
        let mutations = mutations.into_fields();

        if self.verify(schema, "allow_mutations", &mutations) {
            self.restricted = schema
                .writables()
                .keys()
                .filter(|writable| !mutations.contains(writable))
                .cloned()
                .collect();
        }
    }

    /// Restrict exactly `mutations`.
    pub(crate) fn reject(&mut self, schema: &Schema, mutations: impl IntoFields) {
        let mutations = mutations.into_fields();

        if self.verify(schema, "reject_mutations", &mutations) {
            self.restricted = mutations.into_iter().collect();
        }
    }

    pub(crate) fn build(&self) -> Result<Arc<IndexSet<String>>> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(Arc::new(self.restricted.clone())),
        }
    }

    fn verify(&mut self, schema: &Schema, method: &str, mutations: &[String]) -> bool {
        let invalid = mutations
            .iter()
            .filter(|mutation| schema.writable(mutation).is_none())
            .map(String::as_str)
            .collect::<Vec<_>>();

        if invalid.is_empty() {
            return true;
        }

        self.error = Some(Error::invalid_configuration(format!(
            "mutations in query.{method}(..) must be declared writable in schema {}; got {}",
            schema.object(),
            invalid.join(", ")
        )));
        false
    }
}
