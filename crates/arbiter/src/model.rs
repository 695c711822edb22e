use crate::{query::Criteria, Db, Grunt, Query, Result};

use arbiter_core::{
    driver::{operation::Raw, Connection},
    Schema,
};

use serde_json::{Map, Value};
use std::sync::Arc;

/// A registered remote object type, bound to its schema and session.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    schema: Arc<Schema>,
    db: Db,
}

impl Model {
    pub(crate) fn new_handle(name: String, schema: Arc<Schema>, db: Db) -> Model {
        Model { name, schema, db }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub(crate) async fn connection(&self) -> Result<Arc<dyn Connection>> {
        self.db.connection().await
    }

    /// Builds an unsaved record. Every field is assigned through
    /// [`Grunt::set`], so writables are validated as they would be on a
    /// fetched record.
    #[allow(clippy::new_ret_no_self)]
    pub fn new<K, V>(&self, fields: impl IntoIterator<Item = (K, V)>) -> Grunt
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut grunt = Grunt::new(self.clone(), Map::new(), Default::default());

        for (field, value) in fields {
            grunt.set(field.into(), value.into());
        }

        grunt
    }

    /// Query with no filter.
    pub fn query(&self) -> Query {
        Query::new(self.clone())
    }

    pub fn find(&self, filter: impl Into<Criteria>) -> Query {
        self.query().filter(filter)
    }

    /// Like [`find`](Self::find), but resolves to at most one record.
    pub fn find_one(&self, filter: impl Into<Criteria>) -> Query {
        self.find(filter).first()
    }

    /// Looks up records by id. A single id resolves to at most one record, a
    /// list of ids resolves to a list.
    pub fn find_by_id(&self, id: impl Into<Value>) -> Query {
        let id = id.into();
        let single = !id.is_array();

        let mut filter = Map::new();
        filter.insert(arbiter_core::schema::ID.to_string(), id);

        let query = self.find(filter);
        if single {
            query.first()
        } else {
            query
        }
    }

    pub fn find_by_ids<I>(&self, ids: impl IntoIterator<Item = I>) -> Query
    where
        I: Into<Value>,
    {
        let ids = ids.into_iter().map(Into::into).collect::<Vec<_>>();
        self.find_by_id(Value::Array(ids))
    }

    /// Runs a hand-written query and returns the records exactly as the
    /// remote API sent them: remote field names, no mapping, no proxies.
    pub async fn raw(&self, soql: impl Into<String>) -> Result<Vec<Value>> {
        let soql = soql.into();

        tracing::debug!(soql = %soql, model = %self.name, "arbiter.raw");

        self.connection()
            .await?
            .exec(
                Raw {
                    object: self.schema.object().to_string(),
                    soql,
                }
                .into(),
            )
            .await?
            .into_records()
    }

    /// Substitutes `@name` placeholders in a hand-written query.
    pub fn inject(&self, soql: &str, params: &Map<String, Value>, quotes: bool) -> Result<String> {
        arbiter_soql::inject(soql, params, quotes)
    }
}
