//! Client expansion for `#[api]` traits.
//!
//! This module contains the core logic for expanding an API trait into the
//! cleaned trait plus a client struct implementing it.

use courier_core::{Classifier, Renderer};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Expr, ExprLit, FnArg, Ident, ItemTrait, Lit, Meta, Pat, PatIdent, Path, Stmt, Token,
    TraitItem, TraitItemFn,
};

use crate::scan::{ApiDefinition, ApiScanner, Endpoint};
use crate::syntax::strip_directive_attributes;

/// Classifier and renderer used for one expansion.
#[derive(Debug, Clone, Default)]
pub struct CodegenOptions {
    /// Attribute classifier.
    pub classifier: Classifier,
    /// Statement renderer.
    pub renderer: Renderer,
}

impl CodegenOptions {
    /// Creates options from a classifier and renderer.
    pub const fn new(classifier: Classifier, renderer: Renderer) -> Self {
        Self {
            classifier,
            renderer,
        }
    }

    /// A scanner using these options' classifier.
    pub const fn scanner(&self) -> ApiScanner {
        ApiScanner::new(self.classifier)
    }
}

/// Parsed `#[api(...)]` arguments.
#[derive(Debug, Default)]
pub struct ApiArgs {
    /// Client struct name; defaults to `<Trait>Client`.
    pub client: Option<Ident>,
    /// Provider trait bound; defaults to `Provider`.
    pub provider: Option<Path>,
}

impl Parse for ApiArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();
        let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in meta_list {
            let nv = match meta {
                Meta::NameValue(nv) => nv,
                _ => return Err(syn::Error::new(meta.span(), "expected name = value")),
            };
            let ident = nv
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                .to_string();

            match ident.as_str() {
                "client" => args.client = Some(value_as(&nv.value)?),
                "provider" => args.provider = Some(value_as(&nv.value)?),
                _ => {
                    return Err(syn::Error::new(
                        nv.path.span(),
                        format!("unknown attribute: {ident}"),
                    ))
                }
            }
        }

        Ok(args)
    }
}

// Accepts either a bare path/identifier or a string literal containing one.
fn value_as<T: syn::parse::Parse>(value: &Expr) -> syn::Result<T> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => s.parse(),
        Expr::Path(path) => syn::parse2(quote!(#path)),
        _ => Err(syn::Error::new(value.span(), "expected a path or string literal")),
    }
}

/// Expands the `#[api]` attribute macro.
///
/// 1. Parse the attribute arguments and the trait
/// 2. Scan the trait into an [`ApiDefinition`]
/// 3. Re-emit the trait without directive attributes
/// 4. Generate the client struct and its trait implementation
pub fn expand_api(
    attr: TokenStream,
    item: TokenStream,
    options: &CodegenOptions,
) -> syn::Result<TokenStream> {
    let args: ApiArgs = syn::parse2(attr)?;
    let item_trait: ItemTrait = syn::parse2(item)?;
    expand_trait(&args, item_trait, options)
}

/// Expands an already-parsed API trait.
pub fn expand_trait(
    args: &ApiArgs,
    mut item_trait: ItemTrait,
    options: &CodegenOptions,
) -> syn::Result<TokenStream> {
    if !item_trait.generics.params.is_empty() {
        return Err(syn::Error::new(
            item_trait.generics.span(),
            "generic API traits are not supported",
        ));
    }

    let api = options.scanner().scan(&item_trait)?;
    strip_trait(&mut item_trait);

    let vis = &item_trait.vis;
    let trait_ident = &item_trait.ident;
    let client = args
        .client
        .clone()
        .unwrap_or_else(|| format_ident!("{}Client", trait_ident));
    let provider = args
        .provider
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(Provider));

    let functions = item_trait.items.iter().filter_map(|item| match item {
        TraitItem::Fn(function) => Some(function),
        _ => None,
    });

    let methods = functions
        .zip(&api.endpoints)
        .map(|(function, endpoint)| generate_method(function, endpoint, &api, &options.renderer))
        .collect::<syn::Result<Vec<_>>>()?;

    let client_doc = format!("Client for [`{trait_ident}`].");

    let expanded = quote! {
        #item_trait

        #[doc = #client_doc]
        #vis struct #client<P> {
            provider: P,
        }

        impl<P> #client<P> {
            /// Creates a client sending requests through `provider`.
            #vis const fn new(provider: P) -> Self {
                Self { provider }
            }

            /// The underlying provider.
            #vis const fn provider(&self) -> &P {
                &self.provider
            }
        }

        impl<P: #provider> #trait_ident for #client<P> {
            #(#methods)*
        }
    };

    Ok(expanded)
}

/// Generates one method implementation.
fn generate_method(
    function: &TraitItemFn,
    endpoint: &Endpoint,
    api: &ApiDefinition,
    renderer: &Renderer,
) -> syn::Result<TokenStream> {
    let sig = &function.sig;

    if sig.asyncness.is_none() {
        return Err(syn::Error::new(
            sig.fn_token.span,
            "API methods must be async functions",
        ));
    }
    if !matches!(sig.inputs.first(), Some(FnArg::Receiver(receiver)) if receiver.reference.is_some())
    {
        return Err(syn::Error::new(sig.ident.span(), "API methods must take `&self`"));
    }

    let receiver: Ident = syn::parse_str(renderer.receiver()).map_err(|_| {
        syn::Error::new(
            sig.ident.span(),
            format!("`{}` is not a valid request variable name", renderer.receiver()),
        )
    })?;
    reject_shadowed_parameter(sig, &receiver)?;

    let method = &endpoint.route.method;
    let path: Expr = syn::parse_str(&endpoint.route.path)?;

    let lines = api
        .statements(endpoint, renderer)
        .map_err(|e| syn::Error::new(sig.ident.span(), e))?;
    let statements = lines
        .iter()
        .map(|line| {
            syn::parse_str::<Stmt>(line).map_err(|e| {
                syn::Error::new(
                    sig.ident.span(),
                    format!("generated statement `{line}` is not valid Rust: {e}"),
                )
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        #sig {
            let mut #receiver = self.provider.builder(#method, #path);
            #(#statements)*
            self.provider.send(#receiver).await
        }
    })
}

/// The request variable is declared inside the method body, so a parameter
/// with the same name would be unreachable from the rendered statements.
fn reject_shadowed_parameter(sig: &syn::Signature, receiver: &Ident) -> syn::Result<()> {
    for input in &sig.inputs {
        let FnArg::Typed(arg) = input else {
            continue;
        };
        if let Pat::Ident(PatIdent { ident, .. }) = &*arg.pat {
            if ident == receiver {
                return Err(syn::Error::new(
                    ident.span(),
                    format!(
                        "parameter `{ident}` clashes with the request variable; rename it or set `[render] receiver`"
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Removes directive attributes from the trait, its methods and their parameters.
fn strip_trait(item_trait: &mut ItemTrait) {
    strip_directive_attributes(&mut item_trait.attrs);
    for item in &mut item_trait.items {
        let TraitItem::Fn(function) = item else {
            continue;
        };
        strip_directive_attributes(&mut function.attrs);
        for input in &mut function.sig.inputs {
            if let FnArg::Typed(arg) = input {
                strip_directive_attributes(&mut arg.attrs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<String> {
        expand_api(attr, item, &CodegenOptions::default()).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_parse_api_args() {
        let args: ApiArgs = syn::parse_quote!(client = GitHub, provider = "http::Provider");
        assert_eq!(args.client.unwrap().to_string(), "GitHub");
        assert_eq!(args.provider.unwrap().segments.len(), 2);
    }

    #[test]
    fn test_parse_api_args_unknown() {
        let result = syn::parse_str::<ApiArgs>("base_url = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_basic_api() {
        let out = expand(
            quote! {},
            quote! {
                #[JSON]
                pub trait Users {
                    #[GET("/users/{id}")]
                    async fn get_user(&self, id: u64, #[Header("X-Trace")] trace: String) -> Result<User, Error>;
                }
            },
        )
        .unwrap();

        assert!(out.contains("pub struct UsersClient < P >"));
        assert!(out.contains("impl < P : Provider > Users for UsersClient < P >"));
        assert!(out.contains("self . provider . builder (\"GET\" , \"/users/{id}\")"));
        assert!(out.contains("RequestEncoder :: json (JsonEncoder :: default ())"));
        assert!(out.contains("req . add_path_param (\"id\" , id) ;"));
        assert!(out.contains("req . add_header (\"X-Trace\" , trace) ;"));
        assert!(out.contains("self . provider . send (req) . await"));
    }

    #[test]
    fn test_expand_strips_directive_attributes() {
        let out = expand(
            quote! {},
            quote! {
                #[Authorization(TOKEN)]
                /// Docs stay.
                trait Api {
                    #[POST("/things")]
                    async fn create(&self, #[Body] thing: Thing) -> Result<(), Error>;
                }
            },
        )
        .unwrap();

        assert!(!out.contains("# [Authorization"));
        assert!(!out.contains("# [POST"));
        assert!(!out.contains("# [Body"));
        assert!(out.contains("Docs stay."));
        assert!(out.contains("req . add_authorization (TOKEN) ;"));
        assert!(out.contains("req . set_body (thing) ;"));
    }

    #[test]
    fn test_expand_custom_names() {
        let out = expand(
            quote! { client = Remote, provider = transport::Provider },
            quote! {
                trait Api {
                    #[HTTP("/cache", "PURGE")]
                    async fn purge(&self) -> Result<(), Error>;
                }
            },
        )
        .unwrap();

        assert!(out.contains("struct Remote < P >"));
        assert!(out.contains("impl < P : transport :: Provider > Api for Remote < P >"));
        assert!(out.contains("builder (\"PURGE\" , \"/cache\")"));
    }

    #[test]
    fn test_expand_custom_receiver() {
        let options = CodegenOptions::new(Classifier::new(), Renderer::new().with_receiver("request"));
        let out = expand_api(
            quote! {},
            quote! {
                trait Api {
                    #[GET("/search")]
                    async fn search(&self, #[Query] q: String) -> Result<(), Error>;
                }
            },
            &options,
        )
        .unwrap()
        .to_string();

        assert!(out.contains("let mut request = self . provider . builder"));
        assert!(out.contains("request . add_query (\"q\" , q) ;"));
    }

    #[test]
    fn test_non_async_method_rejected() {
        let result = expand(
            quote! {},
            quote! {
                trait Api {
                    #[GET("/")]
                    fn sync(&self) -> Result<(), Error>;
                }
            },
        );
        assert!(result.unwrap_err().to_string().contains("must be async"));
    }

    #[test]
    fn test_missing_receiver_rejected() {
        let result = expand(
            quote! {},
            quote! {
                trait Api {
                    #[GET("/")]
                    async fn free() -> Result<(), Error>;
                }
            },
        );
        assert!(result.unwrap_err().to_string().contains("must take `&self`"));
    }

    #[test]
    fn test_parameter_named_like_request_variable_rejected() {
        let result = expand(
            quote! {},
            quote! {
                trait Api {
                    #[POST("/x")]
                    async fn f(&self, #[Body] req: String) -> Result<(), Error>;
                }
            },
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("parameter `req` clashes with the request variable"));
    }

    #[test]
    fn test_parameter_named_req_allowed_with_other_receiver() {
        let options = CodegenOptions::new(Classifier::new(), Renderer::new().with_receiver("request"));
        let out = expand_api(
            quote! {},
            quote! {
                trait Api {
                    #[POST("/x")]
                    async fn f(&self, #[Body] req: String) -> Result<(), Error>;
                }
            },
            &options,
        )
        .unwrap()
        .to_string();
        assert!(out.contains("request . set_body (req) ;"));
    }

    #[test]
    fn test_generic_trait_rejected() {
        let result = expand(quote! {}, quote! { trait Api<T> {} });
        assert!(result.is_err());
    }

    #[test]
    fn test_path_constant_allowed() {
        let result = expand(
            quote! {},
            quote! {
                trait Api {
                    #[GET(PATHS::USERS)]
                    async fn users(&self) -> Result<(), Error>;
                }
            },
        );
        assert!(result.is_ok());
    }
}
