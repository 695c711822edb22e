use super::{AssociationConfig, Schema};

use serde_json::Value;
use std::{fmt, sync::Arc};

/// One entry of a schema declaration.
///
/// Declarations are resolved into the schema tree once, when the schema is
/// built.
#[derive(Debug, Clone)]
pub enum FieldConfig {
    /// Local name maps straight onto a remote field
    Simple(String),

    /// A related object, addressable through dotted paths
    Child(Schema),

    /// A cross-model join; not a field
    Association(AssociationConfig),

    /// A remote field with write and validation metadata
    Rich(Field),
}

impl From<&str> for FieldConfig {
    fn from(value: &str) -> Self {
        FieldConfig::Simple(value.to_string())
    }
}

impl From<String> for FieldConfig {
    fn from(value: String) -> Self {
        FieldConfig::Simple(value)
    }
}

impl From<Schema> for FieldConfig {
    fn from(value: Schema) -> Self {
        FieldConfig::Child(value)
    }
}

impl From<AssociationConfig> for FieldConfig {
    fn from(value: AssociationConfig) -> Self {
        FieldConfig::Association(value)
    }
}

impl From<Field> for FieldConfig {
    fn from(value: Field) -> Self {
        FieldConfig::Rich(value)
    }
}

/// Rich field descriptor.
#[derive(Debug, Clone)]
pub struct Field {
    /// Remote field name
    pub remote: String,

    pub writable: bool,

    pub required: bool,

    pub ty: Option<FieldType>,

    /// Accepted values, when the field is an enumeration
    pub one_of: Option<Vec<Value>>,

    pub default: Option<FieldDefault>,

    /// Remote object(s) the field refers to
    pub rel: Option<Relation>,
}

impl Field {
    pub fn new(remote: impl Into<String>) -> Field {
        Field {
            remote: remote.into(),
            writable: false,
            required: false,
            ty: None,
            one_of: None,
            default: None,
            rel: None,
        }
    }

    pub fn writable(mut self) -> Self {
        self.writable = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn ty(mut self, ty: FieldType) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Computes the default each time one is needed.
    pub fn default_with(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::With(Arc::new(f)));
        self
    }

    pub fn rel(mut self, object: impl Into<String>) -> Self {
        self.rel = Some(Relation::One(object.into()));
        self
    }

    pub fn rel_any<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rel = Some(Relation::Many(objects.into_iter().map(Into::into).collect()));
        self
    }
}

/// Value used when a writable field is validated without one.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    With(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl FieldDefault {
    pub fn get(&self) -> Value {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::With(f) => f(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(value) => f.debug_tuple("Value").field(value).finish(),
            FieldDefault::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Primitive type a writable field is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        })
    }
}

/// Remote object type(s) a field refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    One(String),
    Many(Vec<String>),
}

impl Relation {
    pub fn targets(&self, object: &str) -> bool {
        match self {
            Relation::One(target) => target == object,
            Relation::Many(targets) => targets.iter().any(|target| target == object),
        }
    }
}
