use proc_macro2::Span;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, LitStr, Meta};

#[derive(Default)]
pub struct CompletionArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
}

/// Reads every `#[completion(...)]` attribute on the item.
pub fn parse_completion_args(attrs: &[Attribute]) -> syn::Result<CompletionArgs> {
    let mut args = CompletionArgs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("completion")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if args.name.is_some() {
                    return Err(meta.error("duplicate `name` argument"));
                }
                args.name = Some(meta.value()?.parse()?);
                return Ok(());
            }

            if meta.path.is_ident("description") {
                if args.description.is_some() {
                    return Err(meta.error("duplicate `description` argument"));
                }
                args.description = Some(meta.value()?.parse()?);
                return Ok(());
            }

            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<path>".to_string());
            Err(meta.error(format!("unsupported argument `{key}`")))
        })?;
    }

    Ok(args)
}

pub fn ensure_named_struct(input: &DeriveInput) -> syn::Result<()> {
    match &input.data {
        Data::Struct(data) if matches!(data.fields, Fields::Named(_)) => Ok(()),
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "`CompletionSchema` can only be derived for structs with named fields",
        )),
    }
}

/// Joins `///` lines into one description. `#[doc = "..."]` is a name-value attribute.
pub fn collect_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(pair) => match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

pub fn infer_schema_name(ident: &Ident, explicit: Option<LitStr>) -> LitStr {
    explicit.unwrap_or_else(|| LitStr::new(&ident.to_string(), Span::call_site()))
}

pub fn infer_description(explicit: Option<LitStr>, docs: Option<String>) -> Option<LitStr> {
    explicit.or_else(|| docs.map(|text| LitStr::new(&text, Span::call_site())))
}
