mod path;
pub(crate) use path::{get as get_path, set as set_path};

use crate::{Model, Result};

use arbiter_core::{
    driver::operation::{Create, Update},
    err,
    schema::ID,
    Error,
};

use indexmap::{IndexMap, IndexSet};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A record fetched through a query or built with [`Model::new`], tracking
/// validated writes for [`save`](Grunt::save).
///
/// Values are read and written by local field name. Writing a writable field
/// runs its validator when the value changes: a valid value is staged in the
/// changeset under its remote name, an invalid one is kept locally and
/// recorded as an error that blocks saving.
#[derive(Debug, Clone)]
pub struct Grunt {
    model: Model,

    /// Nested field values keyed by local name
    record: Map<String, Value>,

    /// Pending writes keyed by remote name
    changeset: Map<String, Value>,

    /// Last validation failure per local field
    errors: IndexMap<String, Error>,

    /// Writable fields the loading query does not allow to change
    restrictions: Arc<IndexSet<String>>,

    associations: IndexMap<String, Associated>,
}

/// Records attached to a parent by an association fetch.
#[derive(Debug, Clone)]
pub enum Associated {
    One(Option<Box<Grunt>>),
    Many(Vec<Grunt>),
}

impl Grunt {
    pub(crate) fn new(
        model: Model,
        record: Map<String, Value>,
        restrictions: Arc<IndexSet<String>>,
    ) -> Grunt {
        Grunt {
            model,
            record,
            changeset: Map::new(),
            errors: IndexMap::new(),
            restrictions,
            associations: IndexMap::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The record's identity, `None` until it has been created remotely.
    pub fn id(&self) -> Option<&Value> {
        self.record.get(ID).filter(|id| !id.is_null())
    }

    /// Reads a value by dotted local path, e.g. `project.name`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.record, path)
    }

    /// Every field value as a nested map.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Writes a value by dotted local path.
    ///
    /// The value is always stored. When `field` is writable and the value
    /// differs from the current one, it is validated as well; see the type
    /// level documentation.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let field = field.into();
        let value = value.into();

        if self.model.schema().writable(&field).is_some() && self.get(&field) != Some(&value) {
            self.stage(&field, Some(value.clone()));
        }

        set_path(&mut self.record, &field, value);
        self
    }

    /// Removes a field value. The `id` field can never be removed.
    pub fn delete(&mut self, field: &str) -> Result<Option<Value>> {
        if field.eq_ignore_ascii_case(ID) {
            return Err(Error::validation(field, "deleting id fields is not allowed"));
        }

        if let Some(writable) = self.model.schema().writable(field) {
            self.changeset.remove(writable.remote());
            self.errors.shift_remove(field);
        }

        Ok(path::remove(&mut self.record, field))
    }

    /// Pending writes keyed by remote field name.
    pub fn changeset(&self) -> &Map<String, Value> {
        &self.changeset
    }

    /// Validation failures keyed by local field name.
    pub fn errors(&self) -> &IndexMap<String, Error> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&Error> {
        self.errors.get(field)
    }

    pub fn is_dirty(&self) -> bool {
        !self.changeset.is_empty()
    }

    /// Writable fields this record may not change.
    pub fn restrictions(&self) -> &IndexSet<String> {
        &self.restrictions
    }

    pub fn association(&self, name: &str) -> Option<&Associated> {
        self.associations.get(name)
    }

    pub fn association_mut(&mut self, name: &str) -> Option<&mut Associated> {
        self.associations.get_mut(name)
    }

    /// The record attached by a has-one association, if any.
    pub fn one(&self, name: &str) -> Option<&Grunt> {
        match self.associations.get(name)? {
            Associated::One(one) => one.as_deref(),
            Associated::Many(many) => many.first(),
        }
    }

    /// The records attached by a has-many association. Empty when the
    /// association was not fetched.
    pub fn many(&self, name: &str) -> &[Grunt] {
        match self.associations.get(name) {
            Some(Associated::Many(many)) => many,
            Some(Associated::One(Some(one))) => std::slice::from_ref(&**one),
            _ => &[],
        }
    }

    pub(crate) fn associate(&mut self, name: impl Into<String>, associated: Associated) {
        self.associations.insert(name.into(), associated);
    }

    /// Persists pending writes.
    ///
    /// A record without an id is created, after every writable without a
    /// value is validated (defaults apply, required fields are enforced). A
    /// record with an id is updated with its changeset. Nothing is sent when
    /// there is nothing to write. The changeset is kept when the remote call
    /// fails.
    pub async fn save(&mut self) -> Result<()> {
        let id = self.id().cloned();

        if id.is_none() {
            self.validate_all();
        }

        if !self.errors.is_empty() {
            return Err(Error::aggregate(self.errors.values().cloned())
                .context(err!("{} could not be saved", self.model.name())));
        }

        if self.changeset.is_empty() {
            return Ok(());
        }

        let schema = self.model.schema();
        let connection = self.model.connection().await?;

        if let Some(id) = id {
            tracing::debug!(
                object = schema.object(),
                fields = ?self.changeset.keys().collect::<Vec<_>>(),
                "arbiter.update"
            );

            connection
                .exec(
                    Update {
                        object: schema.object().to_string(),
                        id,
                        fields: self.changeset.clone(),
                    }
                    .into(),
                )
                .await?;
        } else {
            tracing::debug!(
                object = schema.object(),
                fields = ?self.changeset.keys().collect::<Vec<_>>(),
                "arbiter.create"
            );

            let id = connection
                .exec(
                    Create {
                        object: schema.object().to_string(),
                        fields: self.changeset.clone(),
                    }
                    .into(),
                )
                .await?
                .into_created()?;

            self.record.insert(ID.to_string(), id);
        }

        self.changeset.clear();
        Ok(())
    }

    /// Runs the validator of `field`, staging or recording the outcome.
    fn stage(&mut self, field: &str, value: Option<Value>) {
        let Some(writable) = self.model.schema().writable(field) else {
            return;
        };
        let remote = writable.remote().to_string();

        let validated = if self.restrictions.contains(field) {
            Err(Error::validation(
                field,
                "mutation is not allowed on records of this query",
            ))
        } else {
            writable.validate(value)
        };

        match validated {
            Ok(Some(value)) => {
                self.changeset.insert(remote, value);
                self.errors.shift_remove(field);
            }
            Ok(None) => {
                self.changeset.remove(&remote);
                self.errors.shift_remove(field);
            }
            Err(err) => {
                self.changeset.remove(&remote);
                self.errors.insert(field.to_string(), err);
            }
        }
    }

    fn validate_all(&mut self) {
        let fields = self
            .model
            .schema()
            .writables()
            .iter()
            .filter(|(field, writable)| {
                !self.errors.contains_key(*field) && !self.changeset.contains_key(writable.remote())
            })
            .map(|(field, _)| field.clone())
            .collect::<Vec<_>>();

        for field in fields {
            let current = self.record.get(&field).cloned();
            self.stage(&field, current);

            let staged = self
                .model
                .schema()
                .writable(&field)
                .and_then(|writable| self.changeset.get(writable.remote()))
                .cloned();

            if let Some(value) = staged {
                self.record.entry(field).or_insert(value);
            }
        }
    }
}

impl Serialize for Grunt {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len() + self.associations.len()))?;

        for (field, value) in &self.record {
            if !self.associations.contains_key(field) {
                map.serialize_entry(field, value)?;
            }
        }

        for (name, associated) in &self.associations {
            match associated {
                Associated::One(one) => map.serialize_entry(name, one)?,
                Associated::Many(many) => map.serialize_entry(name, many)?,
            }
        }

        map.end()
    }
}
