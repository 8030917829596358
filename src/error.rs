// Error types for the octokit client.
// Covers template expansion, transport, HTTP status and decoding failures.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OctokitError {
    #[error("Invalid URI template {template:?} at byte {position}: {reason}")]
    Template {
        template: String,
        position: usize,
        reason: String,
    },

    #[error("Missing parameter {name:?} for URI template {template:?}")]
    MissingParameter { template: String, name: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl OctokitError {
    pub(crate) fn template(template: &str, position: usize, reason: impl Into<String>) -> Self {
        OctokitError::Template {
            template: template.to_string(),
            position,
            reason: reason.into(),
        }
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            OctokitError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            OctokitError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            OctokitError::Status { status, .. } => Some(*status),
            OctokitError::Api(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, OctokitError>;
