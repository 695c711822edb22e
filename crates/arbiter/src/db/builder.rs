use super::{Db, Session, SessionConfig, Shared};
use crate::Result;

use arbiter_core::{driver::Driver, Error, Schema};

use indexmap::IndexMap;
use std::{sync::Arc, time::Duration};

#[derive(Debug, Default)]
pub struct Builder {
    /// Model schemas keyed by model name, in registration order
    models: IndexMap<String, Arc<Schema>>,

    /// Names registered more than once
    duplicates: Vec<String>,

    session: SessionConfig,
}

impl Builder {
    /// Register a model under `name`. Associations refer to models by this
    /// name.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> &mut Self {
        let name = name.into();

        if self.models.contains_key(&name) {
            self.duplicates.push(name);
        } else {
            self.models.insert(name, Arc::new(schema));
        }

        self
    }

    /// How long an authenticated connection is reused before logging in again.
    pub fn max_connection_time(&mut self, max_connection_time: Duration) -> &mut Self {
        self.session.max_connection_time = max_connection_time;
        self
    }

    pub fn session_config(&mut self, config: SessionConfig) -> &mut Self {
        self.session = config;
        self
    }

    /// Checks the registry and binds it to `driver`. No connection is made
    /// until the first operation needs one.
    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let mut errors = self
            .duplicates
            .iter()
            .map(|name| Error::invalid_configuration(format!("model {name} is registered twice")))
            .collect::<Vec<_>>();

        for (name, schema) in &self.models {
            for (association, config) in schema.associations() {
                if !self.models.contains_key(&config.model) {
                    errors.push(Error::invalid_configuration(format!(
                        "association {association} on {name} refers to unregistered model {}",
                        config.model
                    )));
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::aggregate(errors));
        }

        Ok(Db {
            shared: Arc::new(Shared {
                models: std::mem::take(&mut self.models),
                session: Session::new(Arc::new(driver), self.session.clone()),
            }),
        })
    }
}
