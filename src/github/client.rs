// GitHub API HTTP client.
// Handles configuration, request dispatch and response decoding.

use std::time::Duration;

use reqwest::{
    Method, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::error::{OctokitError, Result};

use super::outcome::{Outcome, ResponseInfo};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const DEFAULT_USER_AGENT: &str = concat!("octokit-rs/", env!("CARGO_PKG_VERSION"));

/// A 2xx response with its metadata, or the failure and any metadata received.
type Sent = std::result::Result<(Response, ResponseInfo), (OctokitError, Option<ResponseInfo>)>;

/// Error document GitHub returns with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    documentation_url: Option<String>,
}

/// GitHub API client.
///
/// Holds immutable configuration only; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

/// Configuration for a [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// API root, `https://api.github.com` unless overridden.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Token sent as a bearer `Authorization` header.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = self.base_url.as_deref().unwrap_or(GITHUB_API_BASE);
        // Relative paths are appended to this root.
        let base_url = Url::parse(base_url)?.as_str().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();

        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| OctokitError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
                .map_err(|e| OctokitError::InvalidHeader(e.to_string()))?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(OctokitError::Api)?;

        Ok(Client { http, base_url })
    }
}

impl Client {
    /// Unauthenticated client against api.github.com.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from `GITHUB_TOKEN` and `GITHUB_API_URL`, both optional.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(token) = env_var("GITHUB_TOKEN") {
            builder = builder.token(token);
        }
        if let Some(base_url) = env_var("GITHUB_API_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request and decode the response body.
    pub async fn get<T>(&self, url: &str) -> Outcome<T>
    where
        T: DeserializeOwned + Default,
    {
        self.request(Method::GET, url, None::<&()>).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<B, T>(&self, url: &str, body: &B) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.request(Method::POST, url, Some(body)).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put<B, T>(&self, url: &str, body: &B) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.request(Method::PUT, url, Some(body)).await
    }

    /// Make a PATCH request with a JSON body.
    pub async fn patch<B, T>(&self, url: &str, body: &B) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.request(Method::PATCH, url, Some(body)).await
    }

    /// Make a DELETE request with an optional JSON body.
    ///
    /// The response body is never decoded; only the status decides success.
    pub async fn delete<B>(&self, url: &str, body: Option<&B>) -> Outcome<()>
    where
        B: Serialize + ?Sized,
    {
        match self.send(Method::DELETE, url, body).await {
            Ok((_, info)) => Outcome::success((), info),
            Err((err, info)) => Outcome::failure(err, info),
        }
    }

    /// Perform one request and decode the body. Never retries.
    async fn request<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let (response, info) = match self.send(method, url, body).await {
            Ok(sent) => sent,
            Err((err, info)) => return Outcome::failure(err, info),
        };

        let decoded = match response.bytes().await {
            Ok(bytes) => decode(&bytes),
            Err(err) => Err(OctokitError::Api(err)),
        };

        match decoded {
            Ok(value) => Outcome::success(value, info),
            Err(err) => Outcome::failure(err, Some(info)),
        }
    }

    /// Send one request and check its status. A failure carries the
    /// response metadata when the server answered.
    async fn send<B>(&self, method: Method, url: &str, body: Option<&B>) -> Sent
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(url).map_err(|err| (err, None))?;

        debug!(%method, %url, "sending GitHub API request");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| (OctokitError::Api(err), None))?;

        let info = ResponseInfo::from_response(&response);
        debug!(status = %info.status(), url = %info.url(), "received GitHub API response");

        match check_response(response).await {
            Ok(response) => Ok((response, info)),
            Err(err) => Err((err, Some(info))),
        }
    }

    /// Absolute links are used as is; paths are appended to the base URL.
    fn resolve_url(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let path = url.trim_start_matches('/');
                Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(OctokitError::Unauthorized),
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(OctokitError::NotFound(url))
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(OctokitError::Status {
                status,
                message: error_message(&body),
            })
        }
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message,
            documentation_url: Some(docs),
        }) => format!("{} ({})", message, docs),
        Ok(ErrorBody { message, .. }) => message,
        Err(_) => body.trim().to_string(),
    }
}

/// Decode a JSON body. An empty body decodes as `null`.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        trace!("empty response body");
        return Ok(T::deserialize(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}
