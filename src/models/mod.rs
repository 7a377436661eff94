pub mod journey;
pub mod schema;

pub use journey::{JourneyFields, JourneyRecord};
pub use schema::{JourneyField, SchemaMap};
