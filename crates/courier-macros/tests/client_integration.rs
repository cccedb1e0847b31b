//! Integration tests for the `#[api]` macro.
//!
//! These tests expand real API traits against a small in-memory runtime and
//! check the request each generated method builds.

use courier_macros::api;

/// Minimal runtime the generated statements are written against.
mod runtime {
    use std::fmt::Display;

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct JsonEncoder;
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct JsonDecoder;
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct UrlFormEncoder;
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct MultipartEncoder;

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub enum RequestEncoder {
        #[default]
        Unset,
        Json(JsonEncoder),
        UrlForm(UrlFormEncoder),
        Multipart(MultipartEncoder),
    }

    impl RequestEncoder {
        pub const fn json(encoder: JsonEncoder) -> Self {
            Self::Json(encoder)
        }
        pub const fn url_form(encoder: UrlFormEncoder) -> Self {
            Self::UrlForm(encoder)
        }
        pub const fn multipart(encoder: MultipartEncoder) -> Self {
            Self::Multipart(encoder)
        }
    }

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub enum ResponseDecoder {
        #[default]
        Unset,
        Json(JsonDecoder),
    }

    impl ResponseDecoder {
        pub const fn json(decoder: JsonDecoder) -> Self {
            Self::Json(decoder)
        }
    }

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum KeyMapping {
        #[default]
        UseDefault,
        SnakeCase,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Param {
        pub key: String,
        pub value: String,
        pub verbatim: bool,
        pub header_case: bool,
    }

    impl Param {
        pub fn verbatim_key(&mut self) -> &mut Self {
            self.verbatim = true;
            self
        }
        pub fn header_case(&mut self) -> &mut Self {
            self.header_case = true;
            self
        }
    }

    fn push<'a>(list: &'a mut Vec<Param>, key: &str, value: impl Display) -> &'a mut Param {
        list.push(Param {
            key: key.to_string(),
            value: value.to_string(),
            verbatim: false,
            header_case: false,
        });
        let last = list.len() - 1;
        &mut list[last]
    }

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct Request {
        pub method: String,
        pub path: String,
        pub path_params: Vec<Param>,
        pub query: Vec<Param>,
        pub headers: Vec<Param>,
        pub fields: Vec<Param>,
        pub body: Option<String>,
        pub authorization: Option<String>,
        pub request_encoder: RequestEncoder,
        pub response_decoder: ResponseDecoder,
        pub key_mapping: KeyMapping,
    }

    impl Request {
        pub fn set_body(&mut self, body: impl Display) {
            self.body = Some(body.to_string());
        }
        pub fn add_query(&mut self, key: &str, value: impl Display) -> &mut Param {
            push(&mut self.query, key, value)
        }
        pub fn add_header(&mut self, key: &str, value: impl Display) -> &mut Param {
            push(&mut self.headers, key, value)
        }
        pub fn add_path_param(&mut self, key: &str, value: impl Display) {
            push(&mut self.path_params, key, value);
        }
        pub fn add_field(&mut self, key: &str, value: impl Display) -> &mut Param {
            push(&mut self.fields, key, value)
        }
        pub fn add_headers(&mut self, headers: &[(&str, &str)]) {
            for (key, value) in headers {
                push(&mut self.headers, key, value);
            }
        }
        pub fn add_authorization(&mut self, token: &str) {
            self.authorization = Some(token.to_string());
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    pub struct Error;

    #[allow(async_fn_in_trait)]
    pub trait Provider {
        fn builder(&self, method: &str, path: &str) -> Request;
        async fn send(&self, req: Request) -> Result<Request, Error>;
    }

    /// Returns the request it was given.
    pub struct Echo;

    impl Provider for Echo {
        fn builder(&self, method: &str, path: &str) -> Request {
            Request {
                method: method.to_string(),
                path: path.to_string(),
                ..Request::default()
            }
        }

        async fn send(&self, req: Request) -> Result<Request, Error> {
            Ok(req)
        }
    }
}

use runtime::*;

const DEFAULT_HEADERS: &[(&str, &str)] = &[("Accept", "application/json")];

#[api]
#[JSON]
#[Headers(DEFAULT_HEADERS)]
#[allow(async_fn_in_trait)]
pub trait Users {
    #[GET("/users/{id}")]
    async fn user(&self, id: u64) -> Result<Request, Error>;

    #[GET("/users")]
    #[KeyMapping(KeyMapping::SnakeCase)]
    async fn search(
        &self,
        #[Query] page: u32,
        #[Query("per_page")] per_page: u32,
        #[Header] trace_id: String,
        #[Header("X-Api-Key")] key: String,
    ) -> Result<Request, Error>;

    #[POST("/users")]
    #[Authorization("Bearer t0k3n")]
    async fn create(&self, #[Body] user: String) -> Result<Request, Error>;
}

#[api(client = Forms)]
#[allow(async_fn_in_trait)]
trait Login {
    #[HTTP("/session", "PURGE")]
    #[URLForm]
    async fn logout(&self, user: String, #[Field("pass_word")] password: String) -> Result<Request, Error>;

    #[PUT("/avatar/:name")]
    #[Multipart]
    async fn upload(&self, #[Path("name")] file_name: String, #[Body] data: String) -> Result<Request, Error>;
}

#[tokio::test]
async fn test_path_param_and_shared_directives() {
    let req = UsersClient::new(Echo).user(42).await.unwrap();

    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/users/{id}");
    assert_eq!(req.path_params[0].key, "id");
    assert_eq!(req.path_params[0].value, "42");
    assert_eq!(req.request_encoder, RequestEncoder::Json(JsonEncoder));
    assert_eq!(req.response_decoder, ResponseDecoder::Json(JsonDecoder));
    assert_eq!(req.headers[0].key, "Accept");
}

#[tokio::test]
async fn test_query_and_header_modifiers() {
    let client = UsersClient::new(Echo);
    let req = client
        .search(2, 50, "abc".to_string(), "secret".to_string())
        .await
        .unwrap();

    assert_eq!(req.key_mapping, KeyMapping::SnakeCase);

    assert_eq!(req.query[0].key, "page");
    assert!(!req.query[0].verbatim);
    assert_eq!(req.query[1].key, "per_page");
    assert!(req.query[1].verbatim);

    // headers[0] comes from the shared `Headers` directive
    assert_eq!(req.headers[1].key, "trace_id");
    assert!(req.headers[1].header_case);
    assert_eq!(req.headers[2].key, "X-Api-Key");
    assert!(!req.headers[2].header_case);
}

#[tokio::test]
async fn test_body_and_authorization() {
    let req = UsersClient::new(Echo)
        .create("{\"name\":\"ada\"}".to_string())
        .await
        .unwrap();

    assert_eq!(req.method, "POST");
    assert_eq!(req.body.as_deref(), Some("{\"name\":\"ada\"}"));
    assert_eq!(req.authorization.as_deref(), Some("Bearer t0k3n"));
}

#[tokio::test]
async fn test_custom_method_and_form_fields() {
    let req = Forms::new(Echo)
        .logout("ada".to_string(), "hunter2".to_string())
        .await
        .unwrap();

    assert_eq!(req.method, "PURGE");
    assert_eq!(req.request_encoder, RequestEncoder::UrlForm(UrlFormEncoder));
    assert_eq!(req.fields[0].key, "user");
    assert!(!req.fields[0].verbatim);
    assert_eq!(req.fields[1].key, "pass_word");
    assert!(req.fields[1].verbatim);
}

#[tokio::test]
async fn test_colon_placeholder_and_multipart() {
    let client = Forms::new(Echo);
    let req = client
        .upload("me.png".to_string(), "bytes".to_string())
        .await
        .unwrap();

    assert_eq!(req.request_encoder, RequestEncoder::Multipart(MultipartEncoder));
    assert_eq!(req.path_params[0].key, "name");
    assert_eq!(req.path_params[0].value, "me.png");
    assert_eq!(req.body.as_deref(), Some("bytes"));
    assert_eq!(client.provider().builder("GET", "/").method, "GET");
}
