// Repository endpoints.

use reqwest::StatusCode;
use serde::Serialize;

use crate::github::client::Client;
use crate::github::outcome::Outcome;
use crate::github::types::Repository;
use crate::hyperlink::{Hyperlink, Params, resolve};

pub const REPOSITORY_URL: Hyperlink = Hyperlink::from_static("/repos/{owner}/{repo}");
pub const USER_REPOSITORIES_URL: Hyperlink =
    Hyperlink::from_static("/users/{user}/repos{?type,page,per_page,sort}");
pub const YOUR_REPOSITORIES_URL: Hyperlink =
    Hyperlink::from_static("/user/repos{?type,page,per_page,sort}");

impl Client {
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService { client: self }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RepositoriesService<'a> {
    client: &'a Client,
}

impl RepositoriesService<'_> {
    /// Get a repository (`owner`, `repo`).
    pub async fn one(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<Repository> {
        let url = match resolve(uri, &REPOSITORY_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// List public repositories of a user (`user`).
    pub async fn all(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<Vec<Repository>> {
        let url = match resolve(uri, &USER_REPOSITORIES_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// List repositories of the authenticated user.
    pub async fn yours(
        &self,
        uri: Option<&Hyperlink>,
        params: &Params,
    ) -> Outcome<Vec<Repository>> {
        let url = match resolve(uri, &YOUR_REPOSITORIES_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// Create a repository. Pass [`ORGANIZATION_REPOS_URL`] to create it in
    /// an organization instead of the user's account.
    ///
    /// [`ORGANIZATION_REPOS_URL`]: crate::github::endpoints::organizations::ORGANIZATION_REPOS_URL
    pub async fn create<B>(
        &self,
        uri: Option<&Hyperlink>,
        params: &Params,
        body: &B,
    ) -> Outcome<Repository>
    where
        B: Serialize + ?Sized,
    {
        let url = match resolve(uri, &YOUR_REPOSITORIES_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.post(&url, body).await
    }

    /// Delete a repository (`owner`, `repo`). True only for a 204 response.
    pub async fn delete(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<bool> {
        let url = match resolve(uri, &REPOSITORY_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        let outcome = self.client.delete(&url, None::<&()>).await;
        let deleted = outcome
            .response()
            .is_some_and(|response| response.status() == StatusCode::NO_CONTENT);
        outcome.map(|()| deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OctokitError;
    use crate::github::NewRepository;
    use crate::github::endpoints::organizations::ORGANIZATION_REPOS_URL;
    use crate::github::endpoints::testing::{client_for, stub_get};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REPOSITORIES: &str = include_str!("../../../fixtures/repositories.json");

    fn rails_repo() -> serde_json::Value {
        let repos: Vec<serde_json::Value> = serde_json::from_str(REPOSITORIES).unwrap();
        repos[0].clone()
    }

    #[tokio::test]
    async fn test_one_repository() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/rails/rails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rails_repo()))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .repositories()
            .one(None, &Params::from([("owner", "rails"), ("repo", "rails")]))
            .await;

        assert!(!outcome.has_error(), "{:?}", outcome.error());
        let repo = outcome.value();
        assert_eq!(repo.id, 8514);
        assert_eq!(repo.full_name, "rails/rails");
        assert_eq!(repo.language.as_deref(), Some("Ruby"));
        assert_eq!(repo.homepage.as_deref(), Some("http://rubyonrails.org"));
        assert_eq!(repo.default_branch.as_deref(), Some("master"));
        assert!(repo.permissions.is_some_and(|p| p.pull && !p.push));
    }

    #[tokio::test]
    async fn test_user_repositories() {
        let server = MockServer::start().await;
        stub_get(&server, "/users/rails/repos", REPOSITORIES).await;

        let outcome = client_for(&server)
            .repositories()
            .all(None, &Params::new().with("user", "rails"))
            .await;

        assert!(!outcome.has_error(), "{:?}", outcome.error());
        assert_eq!(outcome.value().len(), 30);
    }

    #[tokio::test]
    async fn test_your_repositories_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .and(query_param("type", "owner"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([rails_repo()])))
            .expect(1)
            .mount(&server)
            .await;

        let params = Params::new().with("type", "owner").with("per_page", 100);
        let outcome = client_for(&server)
            .repositories()
            .yours(None, &params)
            .await;

        assert!(!outcome.has_error(), "{:?}", outcome.error());
        assert_eq!(outcome.value()[0].name, "rails");
    }

    #[tokio::test]
    async fn test_create_in_organization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orgs/octokit/repos"))
            .and(body_json(json!({ "name": "go-octokit", "private": false })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 10575811,
                "name": "go-octokit",
                "full_name": "octokit/go-octokit",
                "owner": { "id": 3430433, "login": "octokit", "type": "Organization" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let body = NewRepository {
            name: "go-octokit".to_string(),
            private: Some(false),
            ..Default::default()
        };
        let outcome = client_for(&server)
            .repositories()
            .create(
                Some(&ORGANIZATION_REPOS_URL),
                &Params::new().with("org", "octokit"),
                &body,
            )
            .await;

        assert!(!outcome.has_error(), "{:?}", outcome.error());
        let repo = outcome.value();
        assert_eq!(repo.full_name, "octokit/go-octokit");
        assert_eq!(repo.owner.id, 3430433);
    }

    #[tokio::test]
    async fn test_delete_repository() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octokit/scratch"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .repositories()
            .delete(None, &Params::from([("owner", "octokit"), ("repo", "scratch")]))
            .await;

        assert!(!outcome.has_error(), "{:?}", outcome.error());
        assert!(*outcome.value());
    }

    #[tokio::test]
    async fn test_forbidden_create_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "message": "Resource not accessible by integration"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .repositories()
            .create(None, &Params::new(), &NewRepository::default())
            .await;

        assert_eq!(outcome.value(), &Repository::default());
        match outcome.into_result() {
            Err(OctokitError::Status { status, message }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, "Resource not accessible by integration");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_link_fails_without_request() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let repos = client.repositories();
        let url = Hyperlink::from_static("/repos/{owner");

        assert!(repos.one(Some(&url), &Params::new()).await.has_error());
        assert!(repos.all(Some(&url), &Params::new()).await.value().is_empty());
        assert!(repos.yours(Some(&url), &Params::new()).await.has_error());
        let created = repos
            .create(Some(&url), &Params::new(), &NewRepository::default())
            .await;
        assert_eq!(created.value(), &Repository::default());
        assert!(!*repos.delete(Some(&url), &Params::new()).await.value());

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
