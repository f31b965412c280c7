use schemars::schema::{RootSchema, SchemaObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{any::TypeId, sync::Arc};

/// Cached JSON schema handle associated with a payload type.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(
        schema_name: &'static str,
        type_name: &'static str,
        root: RootSchema,
    ) -> Self {
        let schema_json = serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("failed to serialize schema for {}: {}", type_name, err));

        Self {
            schema_name,
            type_name,
            type_id: TypeId::of::<T>(),
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// Pretty-printed schema for embedding in prompts.
    pub fn to_prompt_string(&self) -> String {
        serde_json::to_string_pretty(self.schema_json.as_ref())
            .unwrap_or_else(|_| self.schema_json.to_string())
    }
}

/// A payload type a language model is asked to produce.
///
/// Implemented through `#[derive(CompletionSchema)]`.
pub trait CompletionSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Set the root title to the completion name; fill in the description if missing.
pub fn apply_schema_metadata(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
) {
    let schema_object: &mut SchemaObject = &mut root.schema;
    let metadata = schema_object.metadata();

    metadata.title = Some(title.to_string());

    if let Some(description) = description {
        if metadata.description.is_none() {
            metadata.description = Some(description.to_string());
        }
    }
}
