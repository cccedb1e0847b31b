//! Declaration scanning.
//!
//! Walks an API trait, feeds every attribute through the classifier and
//! assembles the directives into an [`ApiDefinition`]: shared directives from
//! the trait, and one [`Endpoint`] per method with its route, method-level
//! directives and bound parameters.

use courier_core::{
    is_directive_name, unquote, Classifier, Directive, DirectiveLevel, RenderError, Renderer,
};
use proc_macro2::Span;
use serde::Serialize;
use syn::{spanned::Spanned, Attribute, FnArg, ItemTrait, Pat, PatIdent, PatType, TraitItem, TraitItemFn};

use crate::syntax::{is_directive_attribute, raw_attribute};

/// HTTP method and path of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Method token, e.g. `GET`.
    pub method: String,
    /// Path expression, verbatim.
    pub path: String,
}

impl Route {
    /// Placeholder names in the path template.
    ///
    /// Both `{name}` and `:name` segments count. A `:name` ends at the first
    /// character that cannot appear in an identifier, so `:file.json` names
    /// `file`.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        for segment in unquote(&self.path).split('/') {
            if let Some(rest) = segment.strip_prefix(':') {
                let end = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                if end > 0 {
                    names.push(rest[..end].to_string());
                }
                continue;
            }
            let mut rest = segment;
            while let Some(start) = rest.find('{') {
                let Some(len) = rest[start..].find('}') else {
                    break;
                };
                names.push(rest[start + 1..start + len].to_string());
                rest = &rest[start + len + 1..];
            }
        }
        names
    }
}

/// A method parameter and the directive it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name; also the rendered input.
    pub name: String,
    /// Parameter-level directive.
    pub directive: Directive,
    /// Whether the directive was inferred rather than written.
    pub inferred: bool,
}

/// One API method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Method name.
    pub name: String,
    /// Route from the method's HTTP attribute.
    pub route: Route,
    /// Method-level directives other than the route, in source order.
    pub directives: Vec<Directive>,
    /// Parameters in declaration order, receiver excluded.
    pub parameters: Vec<Parameter>,
}

/// A scanned API trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDefinition {
    /// Trait name.
    pub name: String,
    /// Trait-level directives, applied to every endpoint.
    pub shared: Vec<Directive>,
    /// Endpoints in declaration order.
    pub endpoints: Vec<Endpoint>,
}

impl ApiDefinition {
    /// Renders the builder statements for one endpoint.
    ///
    /// Order: shared directives, method directives, then parameters.
    pub fn statements(
        &self,
        endpoint: &Endpoint,
        renderer: &Renderer,
    ) -> Result<Vec<String>, RenderError> {
        let mut lines = Vec::new();
        for directive in self.shared.iter().chain(&endpoint.directives) {
            lines.extend(renderer.render(directive, None)?);
        }
        for parameter in &endpoint.parameters {
            lines.extend(renderer.render(&parameter.directive, Some(&parameter.name))?);
        }
        Ok(lines)
    }

    /// Looks up an endpoint by method name.
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }
}

/// Scans API traits into [`ApiDefinition`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiScanner {
    classifier: Classifier,
}

impl ApiScanner {
    /// Creates a scanner using `classifier`.
    pub const fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Scans one trait.
    pub fn scan(&self, item: &ItemTrait) -> syn::Result<ApiDefinition> {
        let mut shared = Vec::new();
        for (directive, span) in self.directives(&item.attrs)? {
            match directive.level() {
                DirectiveLevel::Declaration => shared.push(directive),
                DirectiveLevel::Function => {
                    return Err(syn::Error::new(
                        span,
                        format!("`{}` is only valid on a trait method", directive.kind()),
                    ))
                }
                DirectiveLevel::Parameter => return Err(parameter_only(span, &directive)),
            }
        }

        let endpoints = item
            .items
            .iter()
            .filter_map(|item| match item {
                TraitItem::Fn(function) => Some(function),
                _ => None,
            })
            .map(|function| self.scan_endpoint(function))
            .collect::<syn::Result<Vec<_>>>()?;

        tracing::debug!(
            api = %item.ident,
            shared = shared.len(),
            endpoints = endpoints.len(),
            "scanned API trait"
        );

        Ok(ApiDefinition {
            name: item.ident.to_string(),
            shared,
            endpoints,
        })
    }

    fn scan_endpoint(&self, function: &TraitItemFn) -> syn::Result<Endpoint> {
        let name = function.sig.ident.to_string();
        let mut route = None;
        let mut directives = Vec::new();

        for (directive, span) in self.directives(&function.attrs)? {
            match directive {
                Directive::HttpRoute { method, path } => {
                    if route.is_some() {
                        return Err(syn::Error::new(span, "multiple HTTP method attributes"));
                    }
                    route = Some(Route { method, path });
                }
                directive if directive.is_parameter() => {
                    return Err(parameter_only(span, &directive))
                }
                directive => directives.push(directive),
            }
        }

        let route = route.ok_or_else(|| {
            syn::Error::new(function.sig.ident.span(), "missing HTTP method attribute")
        })?;

        let placeholders = route.placeholders();
        let mut parameters = Vec::new();
        let mut body: Option<Span> = None;
        let mut field: Option<Span> = None;

        for input in &function.sig.inputs {
            let FnArg::Typed(arg) = input else {
                continue;
            };
            let (parameter, span) = self.scan_parameter(arg, &placeholders)?;
            match parameter.directive {
                Directive::Body if body.is_some() => {
                    return Err(syn::Error::new(span, "only one `Body` parameter is allowed"));
                }
                Directive::Body => body = Some(span),
                Directive::Field { .. } => field = field.or(Some(span)),
                _ => {}
            }
            parameters.push(parameter);
        }

        if let (Some(body), Some(_)) = (body, field) {
            return Err(syn::Error::new(
                body,
                format!("`{name}` cannot combine a `Body` parameter with `Field` parameters"),
            ));
        }

        Ok(Endpoint {
            name,
            route,
            directives,
            parameters,
        })
    }

    fn scan_parameter(
        &self,
        arg: &PatType,
        placeholders: &[String],
    ) -> syn::Result<(Parameter, Span)> {
        let name = match &*arg.pat {
            Pat::Ident(PatIdent { ident, .. }) => ident.to_string(),
            _ => return Err(syn::Error::new(arg.pat.span(), "expected identifier")),
        };
        let span = arg.pat.span();

        let mut found = None;
        for (directive, span) in self.directives(&arg.attrs)? {
            if !directive.is_parameter() {
                return Err(syn::Error::new(
                    span,
                    format!("`{}` is not valid on a parameter", directive.kind()),
                ));
            }
            if found.is_some() {
                return Err(syn::Error::new(
                    span,
                    format!("multiple parameter attributes on `{name}`"),
                ));
            }
            found = Some(directive);
        }

        let parameter = match found {
            Some(directive) => Parameter {
                name,
                directive,
                inferred: false,
            },
            None => {
                let directive = if placeholders.contains(&name) {
                    Directive::Path { key: None }
                } else {
                    Directive::Field { key: None }
                };
                Parameter {
                    name,
                    directive,
                    inferred: true,
                }
            }
        };

        Ok((parameter, span))
    }

    fn directives(&self, attrs: &[Attribute]) -> syn::Result<Vec<(Directive, Span)>> {
        let mut directives = Vec::new();
        for attr in attrs {
            let raw = match raw_attribute(attr) {
                Ok(raw) => raw,
                Err(err) if is_directive_attribute(attr) => return Err(err),
                // Someone else's attribute with arguments we do not parse.
                Err(_) => continue,
            };

            match self.classifier.accept(&raw) {
                Ok(Some(directive)) => directives.push((directive, attr.span())),
                Ok(None) => {
                    if is_directive_name(raw.name()) {
                        tracing::debug!(attribute = raw.name(), "skipping malformed attribute");
                    }
                }
                Err(err) => return Err(syn::Error::new(attr.span(), err)),
            }
        }
        Ok(directives)
    }
}

fn parameter_only(span: Span, directive: &Directive) -> syn::Error {
    syn::Error::new(
        span,
        format!("`{}` is only valid on a parameter", directive.kind()),
    )
}
