use crate::Result;

use arbiter_core::{schema::ID, Schema};

use indexmap::IndexSet;

/// Field paths requested by a query. `id` is always selected.
#[derive(Debug, Clone)]
pub(crate) struct Fields {
    fields: IndexSet<String>,
}

/// Local field paths and their remote paths; the same index is the same
/// logical field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Selection {
    pub(crate) fields: Vec<String>,
    pub(crate) mappings: Vec<String>,
}

/// Anything that names a list of fields.
///
/// A single string may hold several comma separated names.
pub trait IntoFields {
    fn into_fields(self) -> Vec<String>;
}

impl Fields {
    pub(crate) fn new() -> Fields {
        Fields {
            fields: IndexSet::from([ID.to_string()]),
        }
    }

    pub(crate) fn add(&mut self, fields: impl IntoFields) {
        self.fields.extend(fields.into_fields());
    }

    pub(crate) fn build(&self, schema: &Schema) -> Result<Selection> {
        let fields = schema
            .expand_fields(&self.fields)?
            .into_iter()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let mappings = schema.map_fields(&fields)?;

        Ok(Selection { fields, mappings })
    }
}

fn split(fields: &str) -> impl Iterator<Item = String> + '_ {
    fields
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<String> {
        split(self).collect()
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<String> {
        self.as_str().into_fields()
    }
}

impl IntoFields for &String {
    fn into_fields(self) -> Vec<String> {
        self.as_str().into_fields()
    }
}

impl<T: AsRef<str>> IntoFields for Vec<T> {
    fn into_fields(self) -> Vec<String> {
        self.iter().flat_map(|field| split(field.as_ref())).collect()
    }
}

impl<T: AsRef<str>> IntoFields for &[T] {
    fn into_fields(self) -> Vec<String> {
        self.iter().flat_map(|field| split(field.as_ref())).collect()
    }
}

impl<T: AsRef<str>, const N: usize> IntoFields for [T; N] {
    fn into_fields(self) -> Vec<String> {
        self.iter().flat_map(|field| split(field.as_ref())).collect()
    }
}
