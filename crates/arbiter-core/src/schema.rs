mod association;
pub use association::{AssociationConfig, AssociationKind};

mod builder;
pub use builder::Builder;

mod field;
pub use field::{Field, FieldConfig, FieldDefault, FieldType, Relation};

mod name;
pub use name::relationship_name;

mod tree;
use tree::Tree;

mod validator;
pub use validator::{Validator, Writable};

use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Local name of the identity field every schema carries.
pub const ID: &str = "id";

/// Remote name of the identity field every schema carries.
pub const REMOTE_ID: &str = "Id";

/// Describes one remote object type: how its local field names map onto
/// remote field names, which related objects hang off it, which fields may be
/// written back, and which cross-model associations it declares.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Remote object name, e.g. `Opportunity` or `Project__c`
    object: String,

    tree: Tree,
}

impl Schema {
    /// Start declaring a schema for the given remote object.
    pub fn builder(object: impl Into<String>) -> Builder {
        Builder::new(object.into())
    }

    pub(crate) fn from_tree(object: String, tree: Tree) -> Schema {
        Schema { object, tree }
    }

    /// The remote object name this schema maps.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Returns the remote mapping of a local field on this node. Naming a
    /// child schema returns the child's remote object name.
    pub fn field_mapping(&self, field: &str) -> Option<&str> {
        if let Some(mapping) = self.tree.fields.get(field) {
            return Some(mapping);
        }

        self.tree.children.get(field).map(|child| child.object())
    }

    /// Returns the child schema registered at `name`.
    pub fn child(&self, name: &str) -> Option<&Schema> {
        self.tree.children.get(name).map(|child| &**child)
    }

    /// Every field reachable from this node, children included, as dotted
    /// local paths. `['name']` on a child named `project` becomes
    /// `['project.name']`.
    pub fn all_fields(&self) -> Vec<String> {
        let mut fields = self.local_fields();

        for (name, child) in &self.tree.children {
            fields.extend(
                child
                    .all_fields()
                    .into_iter()
                    .map(|field| format!("{name}.{field}")),
            );
        }

        fields
    }

    /// This node's own fields, children excluded. `id` always comes first.
    pub fn local_fields(&self) -> Vec<String> {
        self.tree.fields.keys().cloned().collect()
    }

    /// Writable fields of this node keyed by local name.
    pub fn writables(&self) -> &IndexMap<String, Writable> {
        &self.tree.writables
    }

    pub fn writable(&self, field: &str) -> Option<&Writable> {
        self.tree.writables.get(field)
    }

    /// Writable local field names mapped to their remote names.
    pub fn all_writables(&self) -> IndexMap<String, String> {
        self.tree
            .writables
            .iter()
            .map(|(field, writable)| (field.clone(), writable.remote().to_string()))
            .collect()
    }

    pub fn association(&self, name: &str) -> Option<&AssociationConfig> {
        self.tree.associations.get(name)
    }

    pub fn associations(&self) -> &IndexMap<String, AssociationConfig> {
        &self.tree.associations
    }

    pub fn relation(&self, field: &str) -> Option<&Relation> {
        self.tree.relations.get(field)
    }

    /// Local fields whose declared relation points at the given remote object.
    pub fn relation_fields(&self, object: &str) -> Vec<&str> {
        self.tree
            .relations
            .iter()
            .filter(|(_, relation)| relation.targets(object))
            .map(|(field, _)| field.as_str())
            .collect()
    }

    /// Expands requested paths into leaf field paths.
    ///
    /// A leaf is kept as-is. `*` expands to every local field of the node
    /// addressed by its prefix, and so does naming a child schema directly.
    /// Expansion is one level deep: grandchildren are not pulled in.
    pub fn expand_fields<I>(&self, fields: impl IntoIterator<Item = I>) -> Result<Vec<String>>
    where
        I: AsRef<str>,
    {
        let mut expanded = vec![];

        for field in fields {
            self.expand_field(field.as_ref(), &mut expanded)?;
        }

        Ok(expanded)
    }

    fn expand_field(&self, path: &str, expanded: &mut Vec<String>) -> Result<()> {
        match path.split_once('.') {
            None => {
                if path == "*" {
                    expanded.extend(self.local_fields());
                } else if self.tree.fields.contains_key(path) {
                    expanded.push(path.to_string());
                } else if let Some(child) = self.tree.children.get(path) {
                    expanded.extend(
                        child
                            .local_fields()
                            .into_iter()
                            .map(|field| format!("{path}.{field}")),
                    );
                } else {
                    return Err(Error::unknown_field(path, &self.object));
                }
            }
            Some((head, rest)) => {
                let child = self
                    .tree
                    .children
                    .get(head)
                    .ok_or_else(|| Error::unknown_field(head, &self.object))?;

                let mut nested = vec![];
                child.expand_field(rest, &mut nested)?;

                expanded.extend(nested.into_iter().map(|field| format!("{head}.{field}")));
            }
        }

        Ok(())
    }

    /// Maps dotted local paths to fully qualified remote paths.
    ///
    /// Nested segments are rendered with the child's relationship name, so a
    /// child declared as `Project__c` reads as `Project__r.Name`.
    pub fn map_fields<I>(&self, fields: impl IntoIterator<Item = I>) -> Result<Vec<String>>
    where
        I: AsRef<str>,
    {
        fields
            .into_iter()
            .map(|field| self.map_field(field.as_ref()))
            .collect()
    }

    pub fn map_field(&self, path: &str) -> Result<String> {
        match path.split_once('.') {
            None => self
                .field_mapping(path)
                .map(str::to_string)
                .ok_or_else(|| Error::unknown_field(path, &self.object)),
            Some((head, rest)) => {
                let child = self
                    .tree
                    .children
                    .get(head)
                    .ok_or_else(|| Error::unknown_field(head, &self.object))?;

                let mapped = child.map_field(rest)?;
                Ok(format!("{}.{mapped}", relationship_name(child.object())))
            }
        }
    }

    /// Grafts `schema` into the tree at a dotted path. Every segment but the
    /// last must already name a child schema.
    pub fn add_child_schema(&mut self, path: &str, schema: Schema) -> Result<()> {
        match path.split_once('.') {
            None => {
                if path.is_empty() {
                    return Err(Error::invalid_configuration(
                        "cannot add schema at an empty path",
                    ));
                }
                self.tree.children.insert(path.to_string(), Arc::new(schema));
                Ok(())
            }
            Some((head, rest)) => match self.tree.children.get_mut(head) {
                Some(child) => Arc::make_mut(child).add_child_schema(rest, schema),
                None => Err(Error::invalid_configuration(format!(
                    "cannot add schema; segment {head} does not exist in schema tree of {}",
                    self.object
                ))),
            },
        }
    }
}
