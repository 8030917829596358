// Organization endpoints.
// Organization info, organization repositories and membership listings.

use crate::github::client::Client;
use crate::github::outcome::Outcome;
use crate::github::types::{Organization, Repository};
use crate::hyperlink::{Hyperlink, Params, resolve};

pub const ORGANIZATION_URL: Hyperlink = Hyperlink::from_static("/orgs/{org}");
pub const ORGANIZATION_REPOS_URL: Hyperlink =
    Hyperlink::from_static("/orgs/{org}/repos{?type,page,per_page,sort}");
pub const YOUR_ORGANIZATIONS_URL: Hyperlink = Hyperlink::from_static("/user/orgs");
pub const USER_ORGANIZATIONS_URL: Hyperlink = Hyperlink::from_static("/users/{username}/orgs");

impl Client {
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService { client: self }
    }
}

/// Organization endpoints. Every method takes an optional link that
/// replaces the default template.
#[derive(Debug, Clone, Copy)]
pub struct OrganizationsService<'a> {
    client: &'a Client,
}

impl OrganizationsService<'_> {
    /// List repositories of an organization (`org`).
    pub async fn organization_repos(
        &self,
        uri: Option<&Hyperlink>,
        params: &Params,
    ) -> Outcome<Vec<Repository>> {
        let url = match resolve(uri, &ORGANIZATION_REPOS_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// Get an organization (`org`).
    pub async fn organization_info(
        &self,
        uri: Option<&Hyperlink>,
        params: &Params,
    ) -> Outcome<Organization> {
        let url = match resolve(uri, &ORGANIZATION_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// List organizations of the authenticated user.
    pub async fn your_organizations(
        &self,
        uri: Option<&Hyperlink>,
        params: &Params,
    ) -> Outcome<Vec<Organization>> {
        let url = match resolve(uri, &YOUR_ORGANIZATIONS_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// List public organizations of a user (`username`).
    pub async fn user_organizations(
        &self,
        uri: Option<&Hyperlink>,
        params: &Params,
    ) -> Outcome<Vec<Organization>> {
        let url = match resolve(uri, &USER_ORGANIZATIONS_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }
}
