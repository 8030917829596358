// Uniform result envelope for API calls.
// Pairs the decoded value with the error and response metadata of one request.

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode, Url};

use crate::error::{OctokitError, Result};

/// Status line and headers of a received response.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
}

impl ResponseInfo {
    pub(crate) fn from_response(response: &Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text, if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Outcome of a single API call.
///
/// A failed outcome always holds `T::default()` as its value, so an empty
/// `Vec` or a default struct is all a caller sees when `has_error()` is true.
/// The response metadata is present whenever the server answered, including
/// for non-2xx statuses and bodies that failed to decode.
#[derive(Debug)]
pub struct Outcome<T> {
    value: T,
    error: Option<OctokitError>,
    response: Option<ResponseInfo>,
}

impl<T> Outcome<T> {
    pub(crate) fn success(value: T, response: ResponseInfo) -> Self {
        Self {
            value,
            error: None,
            response: Some(response),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&OctokitError> {
        self.error.as_ref()
    }

    pub fn response(&self) -> Option<&ResponseInfo> {
        self.response.as_ref()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Convert into a plain `Result`, for use with `?`.
    pub fn into_result(self) -> Result<T> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    /// Transform a successful value. Failures carry `U::default()`.
    pub fn map<U: Default>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        let value = match self.error {
            Some(_) => U::default(),
            None => f(self.value),
        };
        Outcome {
            value,
            error: self.error,
            response: self.response,
        }
    }
}

impl<T: Default> Outcome<T> {
    pub(crate) fn failure(error: OctokitError, response: Option<ResponseInfo>) -> Self {
        Self {
            value: T::default(),
            error: Some(error),
            response,
        }
    }
}

impl<T: Default> From<OctokitError> for Outcome<T> {
    fn from(error: OctokitError) -> Self {
        Self::failure(error, None)
    }
}
