mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `trip_planner_rs::schema::CompletionSchema` for a struct with named fields.
///
/// The generated schema is built once with `schemars` and cached for the lifetime of
/// the process. The schema name defaults to the struct name; both the name and the
/// description can be overridden:
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema, CompletionSchema)]
/// #[completion(name = "itinerary_plan", description = "Day-by-day activities")]
/// struct PlanningResponse { /* ... */ }
/// ```
#[proc_macro_derive(CompletionSchema, attributes(completion))]
pub fn derive_completion_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    completion_schema::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
