use super::{FieldConfig, Schema, Tree};
use crate::{Error, Result};

/// Collects a schema declaration.
///
/// ```
/// use arbiter_core::schema::{Field, FieldType, Schema};
///
/// let schema = Schema::builder("Opportunity")
///     .field("name", "Name")
///     .field("status", Field::new("Status").writable().ty(FieldType::String))
///     .field(
///         "project",
///         Schema::builder("Project__c").field("name", "Name").build()?,
///     )
///     .build()?;
///
/// assert_eq!(schema.map_fields(["project.name"])?, vec!["Project__r.Name"]);
/// # Ok::<(), arbiter_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Builder {
    object: String,
    config: Vec<(String, FieldConfig)>,
    is_root: bool,
}

impl Builder {
    pub(super) fn new(object: String) -> Builder {
        Builder {
            object,
            config: vec![],
            is_root: true,
        }
    }

    /// Declare a field, child schema, or association under a local name.
    pub fn field(mut self, name: impl Into<String>, config: impl Into<FieldConfig>) -> Self {
        self.config.push((name.into(), config.into()));
        self
    }

    /// Build this schema as a nested node: rich descriptors only contribute
    /// their remote mapping, and associations are ignored.
    pub fn nested(mut self) -> Self {
        self.is_root = false;
        self
    }

    pub fn build(self) -> Result<Schema> {
        if self.object.is_empty() {
            return Err(Error::invalid_configuration(
                "schema requires a remote object name",
            ));
        }

        let tree = Tree::new(&self.object, self.config, self.is_root)?;
        Ok(Schema::from_tree(self.object, tree))
    }
}
