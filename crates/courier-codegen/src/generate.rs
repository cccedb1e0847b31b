//! Whole-file generation.
//!
//! Used by the CLI: parses a Rust source file, expands every trait marked
//! `#[api]` or `#[courier::api]`, and passes all other items through.

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{Attribute, Item, ItemTrait, Meta};

use crate::error::CodegenError;
use crate::expand::{expand_trait, ApiArgs, CodegenOptions};
use crate::scan::ApiDefinition;

fn is_api_attribute(attr: &Attribute) -> bool {
    let segments: Vec<String> = attr
        .path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    matches!(segments.as_slice(), ["api"] | ["courier", "api"])
}

/// Removes the `#[api]` marker and parses its arguments.
fn take_api_marker(item: &mut ItemTrait) -> syn::Result<Option<ApiArgs>> {
    let Some(index) = item.attrs.iter().position(is_api_attribute) else {
        return Ok(None);
    };
    let marker = item.attrs.remove(index);
    let args = match &marker.meta {
        Meta::List(list) => list.parse_args()?,
        _ => ApiArgs::default(),
    };
    Ok(Some(args))
}

/// Expands every API trait in `source` and returns the resulting source text.
pub fn generate_file(source: &str, options: &CodegenOptions) -> Result<String, CodegenError> {
    let file = syn::parse_file(source)?;
    let mut output = TokenStream::new();

    for attr in &file.attrs {
        attr.to_tokens(&mut output);
    }

    let mut expanded = 0usize;
    for item in file.items {
        match item {
            Item::Trait(mut item_trait) => match take_api_marker(&mut item_trait)? {
                Some(args) => {
                    output.extend(expand_trait(&args, item_trait, options)?);
                    expanded += 1;
                }
                None => item_trait.to_tokens(&mut output),
            },
            other => other.to_tokens(&mut output),
        }
    }

    tracing::info!(apis = expanded, "generated clients");
    Ok(output.to_string())
}

/// Scans every API trait in `source` without expanding it.
pub fn inspect_file(source: &str, options: &CodegenOptions) -> Result<Vec<ApiDefinition>, CodegenError> {
    let file = syn::parse_file(source)?;
    let scanner = options.scanner();

    let mut apis = Vec::new();
    for item in file.items {
        if let Item::Trait(mut item_trait) = item {
            if take_api_marker(&mut item_trait)?.is_some() {
                apis.push(scanner.scan(&item_trait)?);
            }
        }
    }
    Ok(apis)
}
