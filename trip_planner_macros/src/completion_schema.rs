use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, DeriveInput, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, ensure_named_struct, infer_description, infer_schema_name,
    parse_completion_args,
};

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    ensure_named_struct(&input)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "`CompletionSchema` cannot be derived for generic structs",
        ));
    }

    let args = parse_completion_args(&input.attrs)?;
    let ident = &input.ident;
    let schema_name = infer_schema_name(ident, args.name);
    let description = infer_description(args.description, collect_doc_comments(&input.attrs));

    let description_tokens = match description {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };
    let type_name = LitStr::new(&ident.to_string(), Span::call_site());

    Ok(quote! {
        impl trip_planner_rs::schema::CompletionSchema for #ident {
            fn schema() -> &'static trip_planner_rs::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<trip_planner_rs::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(#ident);
                    trip_planner_rs::schema::apply_schema_metadata(
                        &mut root,
                        #schema_name,
                        #description_tokens,
                    );
                    trip_planner_rs::schema::SchemaHandle::from_root_schema::<#ident>(
                        #schema_name,
                        #type_name,
                        root,
                    )
                })
            }
        }
    })
}
