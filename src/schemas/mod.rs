//! JSON Schema plumbing for structured language-model payloads.

pub mod schema;
pub mod validation;

pub use schema::{apply_schema_metadata, CompletionSchema, SchemaHandle};
pub use validation::validate_structured_payload;
