//! GitHub API client
//!
//! Minimal client for the REST and GraphQL endpoints this tool needs. REST calls are classified
//! into [`ApiResult`] so callers can tell a missing resource apart from a failed request.

use crate::Result;
use ohno::{EnrichableExt, IntoAppError, app_err, bail};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

const LOG_TARGET: &str = "   hosting";

/// Default REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "repo-stats";
const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// Result of a hosting API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded
    Success(T),

    /// The requested resource was not found (404)
    NotFound,

    /// Request failed for any other reason
    Failed(ohno::AppError),
}

impl<T> ApiResult<T> {
    /// Converts into `Ok(None)` for a missing resource, `Ok(Some(_))` on success.
    pub fn found(self) -> Result<Option<T>> {
        match self {
            Self::Success(data) => Ok(Some(data)),
            Self::NotFound => Ok(None),
            Self::Failed(e) => Err(e),
        }
    }

    /// Converts into a standard `Result`, treating a missing resource as an error.
    pub fn into_result(self, what: &str) -> Result<T> {
        match self {
            Self::Success(data) => Ok(data),
            Self::NotFound => Err(app_err!("{what} not found")),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Macro to unwrap `ApiResult::Success` or return the other variants unchanged
macro_rules! unwrap_or_return {
    ($expr:expr) => {
        match $expr {
            ApiResult::Success(data) => data,
            ApiResult::NotFound => return ApiResult::NotFound,
            ApiResult::Failed(e) => return ApiResult::Failed(e),
        }
    };
}

/// Error payload returned by the REST API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Hosting API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    api_url: Url,
    graphql_url: Url,
}

impl Client {
    /// Create a client with an optional authentication token.
    ///
    /// When `graphql_url` is `None` the GraphQL endpoint is `<api_url>/graphql`.
    pub fn new(token: Option<&str>, api_url: &str, graphql_url: Option<&str>) -> Result<Self> {
        let api_url = Url::parse(api_url).into_app_err_with(|| format!("parsing API URL '{api_url}'"))?;
        if api_url.cannot_be_a_base() {
            bail!("API URL '{api_url}' cannot be used as a base URL");
        }

        let graphql_url = match graphql_url {
            Some(url) => Url::parse(url).into_app_err_with(|| format!("parsing GraphQL URL '{url}'"))?,
            None => join_segments(&api_url, ["graphql"]),
        };

        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        let _ = headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder().user_agent(USER_AGENT).default_headers(headers).build()?;

        Ok(Self {
            client,
            api_url,
            graphql_url,
        })
    }

    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    #[must_use]
    pub const fn graphql_url(&self) -> &Url {
        &self.graphql_url
    }

    /// Build a REST endpoint URL from path segments. Each segment is percent-encoded.
    #[must_use]
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        join_segments(&self.api_url, segments)
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let resp = unwrap_or_return!(self.execute(Method::GET, url, |req| req).await);
        decode_json(resp).await
    }

    /// GET the raw contents of a file rather than its JSON description.
    pub async fn get_raw(&self, url: Url) -> ApiResult<String> {
        let resp = unwrap_or_return!(self.execute(Method::GET, url, |req| req.header(ACCEPT, RAW_MEDIA_TYPE)).await);
        match resp.text().await {
            Ok(text) => ApiResult::Success(text),
            Err(e) => ApiResult::Failed(e.into()),
        }
    }

    /// Send a JSON body with `method` and decode the JSON response.
    pub async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = unwrap_or_return!(self.execute(method, url, |req| req.json(body)).await);
        decode_json(resp).await
    }

    /// Run a GraphQL query and return its `data` member.
    ///
    /// Any entry in the response's `errors` list fails the call.
    pub async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let request = GraphQlRequest { query, variables };
        let response: GraphQlResponse<T> = self
            .send_json(Method::POST, self.graphql_url.clone(), &request)
            .await
            .into_result("GraphQL endpoint")?;

        if !response.errors.is_empty() {
            let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
            bail!("GraphQL query failed: {}", messages.join("; "));
        }

        response.data.into_app_err("GraphQL response contained no data")
    }

    /// Send a request and classify the response status
    async fn execute(&self, method: Method, url: Url, build: impl FnOnce(RequestBuilder) -> RequestBuilder) -> ApiResult<Response> {
        log::debug!(target: LOG_TARGET, "{method} {url}");

        let description = format!("{method} {url}");
        let resp = match build(self.client.request(method, url)).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(ohno::AppError::from(e).enrich_with(|| description)),
        };

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            log::debug!(target: LOG_TARGET, "{description} returned 404");
            return ApiResult::NotFound;
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body).map_or_else(|_| body.trim().to_string(), |b| b.message);
        ApiResult::Failed(app_err!("{description} failed with status {status}: {message}"))
    }
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let url = resp.url().clone();
    match resp.json().await {
        Ok(data) => ApiResult::Success(data),
        Err(e) => ApiResult::Failed(ohno::AppError::from(e).enrich_with(|| format!("decoding response from {url}"))),
    }
}

fn join_segments<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        let _ = path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_without_token() {
        let client = Client::new(None, DEFAULT_API_URL, None).unwrap();
        assert_eq!(client.api_url().as_str(), "https://api.github.com/");
        assert_eq!(client.graphql_url().as_str(), "https://api.github.com/graphql");
    }

    #[test]
    fn test_client_new_with_token() {
        let client = Client::new(Some("test_token"), DEFAULT_API_URL, None).unwrap();
        assert_eq!(client.api_url().as_str(), "https://api.github.com/");
    }

    #[test]
    fn test_client_explicit_graphql_url() {
        let client = Client::new(None, "https://ghe.example.com/api/v3", Some("https://ghe.example.com/api/graphql")).unwrap();
        assert_eq!(client.graphql_url().as_str(), "https://ghe.example.com/api/graphql");
    }

    #[test]
    fn test_client_invalid_url() {
        let _ = Client::new(None, "not a url", None).unwrap_err();
        let _ = Client::new(None, "mailto:someone@example.com", None).unwrap_err();
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let client = Client::new(None, DEFAULT_API_URL, None).unwrap();
        let url = client.endpoint(["repos", "octo-org", "widgets", "traffic", "views"]);
        assert_eq!(url.as_str(), "https://api.github.com/repos/octo-org/widgets/traffic/views");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = Client::new(None, "https://ghe.example.com/api/v3/", None).unwrap();
        let url = client.endpoint(["repos", "a", "b"]);
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/a/b");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = Client::new(None, DEFAULT_API_URL, None).unwrap();
        let url = client.endpoint(["repos", "a", "b", "contents", "my stats", "x?y"]);
        assert_eq!(url.as_str(), "https://api.github.com/repos/a/b/contents/my%20stats/x%3Fy");
    }

    #[test]
    fn test_api_result_found() {
        assert_eq!(ApiResult::Success(3).found().unwrap(), Some(3));
        assert_eq!(ApiResult::<u32>::NotFound.found().unwrap(), None);
        let _ = ApiResult::<u32>::Failed(app_err!("boom")).found().unwrap_err();
    }

    #[test]
    fn test_api_result_into_result() {
        assert_eq!(ApiResult::Success(3).into_result("thing").unwrap(), 3);

        let err = ApiResult::<u32>::NotFound.into_result("branch 'main'").unwrap_err();
        assert!(format!("{err}").contains("branch 'main' not found"));
    }

    #[test]
    fn test_graphql_response_deserialize_errors() {
        let json = r#"{"data": null, "errors": [{"message": "Could not resolve to a Repository"}]}"#;
        let response: GraphQlResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Could not resolve to a Repository");
    }

    #[test]
    fn test_graphql_response_without_errors_field() {
        let json = r#"{"data": {"value": 1}}"#;
        let response: GraphQlResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_some());
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_error_body_deserialize() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "Bad credentials", "documentation_url": "x"}"#).unwrap();
        assert_eq!(body.message, "Bad credentials");
    }
}
