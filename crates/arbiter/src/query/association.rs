use super::Query;
use crate::{grunt::Associated, Grunt, Model, Result};

use arbiter_core::{schema::AssociationConfig, Error};

use futures_util::future::try_join_all;
use indexmap::IndexMap;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Refines the secondary query of an association before it runs.
pub type Refine = Arc<dyn Fn(Query) -> Query + Send + Sync>;

/// Associations requested on a query.
#[derive(Clone, Default)]
pub(crate) struct Associations {
    requested: Vec<Requested>,
    errors: Vec<Error>,
}

#[derive(Clone)]
struct Requested {
    name: String,
    config: AssociationConfig,
    model: Model,
    refine: Refine,
}

impl Associations {
    /// Records an association of `owner` to fetch. Returns the parent field
    /// the join reads, which the parent query must select.
    pub(crate) fn add(&mut self, owner: &Model, name: &str, refine: Refine) -> Option<String> {
        let Some(config) = owner.schema().association(name) else {
            self.errors.push(Error::invalid_configuration(format!(
                "cannot fetch association {name}; not configured on {}",
                owner.name()
            )));
            return None;
        };

        let model = match owner.db().model(&config.model) {
            Ok(model) => model,
            Err(err) => {
                self.errors.push(err.context(Error::invalid_configuration(format!(
                    "cannot fetch association {name} of {}",
                    owner.name()
                ))));
                return None;
            }
        };

        self.requested.push(Requested {
            name: name.to_string(),
            config: config.clone(),
            model,
            refine,
        });

        Some(config.from.clone())
    }

    pub(crate) fn build(&self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::aggregate(self.errors.iter().cloned()))
        }
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.requested.iter().map(|requested| requested.name.as_str()).collect()
    }

    /// Fetches every requested association for `parents` and attaches the
    /// results. Independent associations are fetched concurrently.
    pub(crate) async fn fetch(&self, parents: &mut [Grunt]) -> Result<()> {
        if parents.is_empty() || self.requested.is_empty() {
            return Ok(());
        }

        let fetched = try_join_all(
            self.requested
                .iter()
                .map(|requested| requested.fetch(&*parents)),
        )
        .await?;

        for (requested, groups) in self.requested.iter().zip(fetched) {
            requested.attach(parents, &groups);
        }

        Ok(())
    }
}

impl Requested {
    /// Runs the secondary query and groups its records by join key, keeping
    /// the order records came back in.
    async fn fetch(&self, parents: &[Grunt]) -> Result<IndexMap<String, Vec<Grunt>>> {
        let mut keys = IndexMap::new();
        for parent in parents {
            if let Some(value) = parent.get(&self.config.from) {
                if let Some(key) = join_key(value) {
                    keys.entry(key).or_insert_with(|| value.clone());
                }
            }
        }

        tracing::debug!(
            association = %self.name,
            model = self.model.name(),
            parents = parents.len(),
            keys = keys.len(),
            "arbiter.association"
        );

        if keys.is_empty() {
            return Ok(IndexMap::new());
        }

        let mut query = self.model.query().select(self.config.to.as_str());
        query.exec_disabled = true;
        let mut query = (self.refine)(query);
        query.exec_disabled = false;
        query
            .filter
            .scope(&self.config.to, Value::Array(keys.into_values().collect()));

        let mut groups: IndexMap<String, Vec<Grunt>> = IndexMap::new();
        for record in query.exec().await?.into_many() {
            if let Some(key) = record.get(&self.config.to).and_then(join_key) {
                groups.entry(key).or_default().push(record);
            }
        }

        Ok(groups)
    }

    fn attach(&self, parents: &mut [Grunt], groups: &IndexMap<String, Vec<Grunt>>) {
        for parent in parents {
            let group = parent
                .get(&self.config.from)
                .and_then(join_key)
                .and_then(|key| groups.get(&key));

            let associated = if self.config.is_has_one() {
                Associated::One(group.and_then(|group| group.first()).cloned().map(Box::new))
            } else {
                Associated::Many(group.cloned().unwrap_or_default())
            };

            parent.associate(&self.name, associated);
        }
    }
}

/// The text a join value is matched by. Nulls never join.
fn join_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        value => Some(value.to_string()),
    }
}

impl fmt::Debug for Associations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Associations")
            .field("requested", &self.names())
            .field("errors", &self.errors)
            .finish()
    }
}
