//! Bridge from `syn` attributes to [`RawAttribute`]s.
//!
//! Argument expressions are captured as their source text and never
//! interpreted. Token text stands in when no source is available.

use courier_core::{is_directive_name, RawAttribute};
use quote::ToTokens;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Expr, Ident, Meta, Token,
};

/// One argument inside an attribute's parentheses.
#[derive(Debug)]
enum AttributeArgument {
    /// `label = expr`
    Labeled(Ident, Expr),
    /// `expr`
    Positional(Expr),
}

impl Parse for AttributeArgument {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident) && input.peek2(Token![=]) && !input.peek2(Token![==]) {
            let label: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            Ok(Self::Labeled(label, value))
        } else {
            Ok(Self::Positional(input.parse()?))
        }
    }
}

/// The attribute's name: its identifier, or the `::`-joined path.
pub fn attribute_name(attr: &Attribute) -> String {
    let path = attr.path();
    match path.get_ident() {
        Some(ident) => ident.to_string(),
        None => path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join("::"),
    }
}

/// Returns `true` if the attribute is one of the directive helper attributes.
pub fn is_directive_attribute(attr: &Attribute) -> bool {
    attr.path()
        .get_ident()
        .is_some_and(|ident| is_directive_name(&ident.to_string()))
}

/// Splits an attribute into name, positional and labeled argument texts.
///
/// - `#[Name]` has no arguments.
/// - `#[Name(a, b, label = c)]` has positional `a`, `b` and labeled `label`.
/// - `#[Name = a]` has the single positional argument `a`.
pub fn raw_attribute(attr: &Attribute) -> syn::Result<RawAttribute> {
    let mut raw = RawAttribute::new(attribute_name(attr));

    match &attr.meta {
        Meta::Path(_) => {}
        Meta::List(list) => {
            let args =
                list.parse_args_with(Punctuated::<AttributeArgument, Token![,]>::parse_terminated)?;
            for arg in args {
                match arg {
                    AttributeArgument::Labeled(label, value) => {
                        raw.push_labeled(label.to_string(), expression_text(&value));
                    }
                    AttributeArgument::Positional(value) => {
                        raw.push_positional(expression_text(&value));
                    }
                }
            }
        }
        Meta::NameValue(name_value) => raw.push_positional(expression_text(&name_value.value)),
    }

    Ok(raw)
}

/// The expression as written, or its token text when the span does not cover
/// the whole expression (inside a compiler-driven macro, or for tokens built
/// with `quote!`).
fn expression_text(expr: &Expr) -> String {
    let tokens = expr.to_token_stream().to_string();
    match expr.span().source_text() {
        Some(source) if same_tokens(&source, &tokens) => source,
        _ => tokens,
    }
}

fn same_tokens(source: &str, tokens: &str) -> bool {
    source
        .chars()
        .filter(|c| !c.is_whitespace())
        .eq(tokens.chars().filter(|c| !c.is_whitespace()))
}

/// Removes directive helper attributes, keeping everything else in order.
pub fn strip_directive_attributes(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !is_directive_attribute(attr));
}
