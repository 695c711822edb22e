use super::{AssociationConfig, FieldConfig, Relation, Schema, Validator, Writable, ID, REMOTE_ID};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Categorized maps built from a schema declaration.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    /// Local field name to remote field name. `id -> Id` is always first.
    pub(crate) fields: IndexMap<String, String>,

    pub(crate) children: IndexMap<String, Arc<Schema>>,

    pub(crate) writables: IndexMap<String, Writable>,

    pub(crate) associations: IndexMap<String, AssociationConfig>,

    pub(crate) relations: IndexMap<String, Relation>,
}

impl Tree {
    /// Classifies each declared entry.
    ///
    /// Only a root node registers writables, associations and relations. A
    /// node built as nested keeps the plain field mapping of rich descriptors
    /// and drops the rest, so a schema reused inside another never widens the
    /// parent's mutation surface.
    pub(crate) fn new(
        object: &str,
        config: Vec<(String, FieldConfig)>,
        is_root: bool,
    ) -> Result<Tree> {
        let mut tree = Tree {
            fields: IndexMap::new(),
            children: IndexMap::new(),
            writables: IndexMap::new(),
            associations: IndexMap::new(),
            relations: IndexMap::new(),
        };
        tree.fields.insert(ID.to_string(), REMOTE_ID.to_string());

        for (name, entry) in config {
            tree.verify_name(object, &name)?;

            match entry {
                FieldConfig::Simple(remote) => {
                    verify_remote(object, &name, &remote)?;
                    tree.fields.insert(name, remote);
                }
                FieldConfig::Child(schema) => {
                    tree.children.insert(name, Arc::new(schema));
                }
                FieldConfig::Association(association) => {
                    if !is_root {
                        continue;
                    }
                    association.verify(&name)?;
                    tree.associations.insert(name, association);
                }
                FieldConfig::Rich(field) => {
                    verify_remote(object, &name, &field.remote)?;
                    tree.fields.insert(name.clone(), field.remote.clone());

                    if !is_root {
                        continue;
                    }

                    if let Some(rel) = &field.rel {
                        tree.relations.insert(name.clone(), rel.clone());
                    }

                    if field.writable {
                        let validator = Validator::new(&name, &field);
                        tree.writables
                            .insert(name, Writable::new(field.remote, validator));
                    }
                }
            }
        }

        Ok(tree)
    }

    fn verify_name(&self, object: &str, name: &str) -> Result<()> {
        if name.is_empty() || name.contains('.') || name == "*" {
            return Err(Error::invalid_configuration(format!(
                "schema {object} declares invalid field name `{name}`"
            )));
        }

        if name == ID {
            return Err(Error::invalid_configuration(format!(
                "schema {object} cannot redeclare `{ID}`; it is always mapped to `{REMOTE_ID}`"
            )));
        }

        if self.fields.contains_key(name)
            || self.children.contains_key(name)
            || self.associations.contains_key(name)
        {
            return Err(Error::invalid_configuration(format!(
                "schema {object} declares `{name}` more than once"
            )));
        }

        Ok(())
    }
}

fn verify_remote(object: &str, name: &str, remote: &str) -> Result<()> {
    if remote.is_empty() {
        return Err(Error::invalid_configuration(format!(
            "field `{name}` on schema {object} has an empty remote name"
        )));
    }
    Ok(())
}
