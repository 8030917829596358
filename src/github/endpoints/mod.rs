// GitHub API services.
// Each service binds default link templates to typed client calls.

pub mod organizations;
pub mod public_keys;
pub mod repositories;
pub mod users;

pub use organizations::OrganizationsService;
pub use public_keys::PublicKeysService;
pub use repositories::RepositoriesService;
pub use users::UsersService;
