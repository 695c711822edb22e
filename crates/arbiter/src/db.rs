mod builder;
pub use builder::Builder;

mod session;
pub use session::{Session, SessionConfig};

use crate::{Model, Result};

use arbiter_core::{driver::Connection, Error, Schema};

use indexmap::IndexMap;
use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
pub(crate) struct Shared {
    /// Registered schemas keyed by model name
    pub(crate) models: IndexMap<String, Arc<Schema>>,

    pub(crate) session: Session,
}

/// Registry of models bound to one remote API session.
///
/// Cloning is cheap; every clone shares the same models and session.
#[derive(Debug, Clone)]
pub struct Db {
    pub(crate) shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns a handle to the model registered under `name`.
    pub fn model(&self, name: &str) -> Result<Model> {
        let (name, schema) = self
            .shared
            .models
            .get_key_value(name)
            .ok_or_else(|| Error::invalid_configuration(format!("model {name} is not registered")))?;

        Ok(Model::new_handle(name.clone(), schema.clone(), self.clone()))
    }

    /// Names of every registered model, in registration order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.shared.models.keys().map(String::as_str)
    }

    /// The current authenticated connection, establishing one if needed.
    pub async fn connection(&self) -> Result<Arc<dyn Connection>> {
        self.shared.session.connection().await
    }

    /// Drops the cached connection; the next operation re-authenticates.
    pub async fn invalidate_session(&self) {
        self.shared.session.invalidate().await
    }
}
