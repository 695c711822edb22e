mod inject;
pub use inject::inject;

pub mod serializer;
pub use serializer::{escape, Serializer};
