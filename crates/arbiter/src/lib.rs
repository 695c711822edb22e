pub mod db;
pub use db::Db;

pub mod grunt;
pub use grunt::{Associated, Grunt};

mod model;
pub use model::Model;

pub mod query;
pub use query::{Criteria, Output, Query};

pub use arbiter_core::{
    driver,
    schema::{self, AssociationConfig, Field, FieldType, Schema},
    stmt, Error, Result,
};

pub use arbiter_soql::inject;
