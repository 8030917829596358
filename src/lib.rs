//! Hypermedia-driven client for the GitHub REST API.
//!
//! Every service method resolves a link template (the caller's, or the
//! service default), expands it with [`Params`], performs one request and
//! returns an [`Outcome`] holding the decoded value, the error if any, and
//! the response metadata.
//!
//! ```no_run
//! use octokit::{Client, Params};
//!
//! # async fn run() -> octokit::Result<()> {
//! let client = Client::from_env()?;
//! let repos = client
//!     .organizations()
//!     .organization_repos(None, &Params::new().with("org", "rails"))
//!     .await
//!     .into_result()?;
//! println!("{} repositories", repos.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod github;
pub mod hyperlink;

pub use error::{OctokitError, Result};
pub use github::{Client, ClientBuilder, Hypermedia, Outcome, ResponseInfo};
pub use hyperlink::{Hyperlink, Params};
