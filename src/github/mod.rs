// GitHub API module.
// Provides the client, result envelope, services and types for the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod hypermedia;
pub mod outcome;
pub mod types;

pub use client::{Client, ClientBuilder};
pub use endpoints::{OrganizationsService, PublicKeysService, RepositoriesService, UsersService};
pub use hypermedia::{Hypermedia, Link, Links};
pub use outcome::{Outcome, ResponseInfo};
pub use types::*;
