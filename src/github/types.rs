// GitHub API resource types.
// Defines structs for deserializing responses and serializing request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hyperlink::Hyperlink;

use super::hypermedia::{Hypermedia, Links};

/// Account type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserType {
    #[default]
    User,
    Organization,
    Bot,
    #[serde(other)]
    Unknown,
}

/// GitHub user account. Also used for repository owners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub login: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub site_admin: bool,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub hireable: Option<bool>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<Hyperlink>,
    pub repos_url: Option<Hyperlink>,
    pub organizations_url: Option<Hyperlink>,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    links: Links,
}

/// GitHub organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub url: Option<Hyperlink>,
    pub repos_url: Option<Hyperlink>,
    pub events_url: Option<Hyperlink>,
    /// Template of the form `.../members{/member}`.
    pub members_url: Option<Hyperlink>,
    pub public_members_url: Option<Hyperlink>,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    links: Links,
}

/// Caller's permissions on a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub admin: bool,
    pub push: bool,
    pub pull: bool,
}

/// GitHub repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: User,
    pub private: bool,
    pub fork: bool,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub default_branch: Option<String>,
    pub url: Option<Hyperlink>,
    pub html_url: Option<String>,
    pub clone_url: Option<String>,
    pub git_url: Option<String>,
    pub ssh_url: Option<String>,
    pub svn_url: Option<String>,
    pub mirror_url: Option<String>,
    pub forks_count: u64,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub open_issues_count: u64,
    pub size: u64,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_downloads: bool,
    pub permissions: Option<Permissions>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    links: Links,
}

/// Public SSH key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Key {
    pub id: u64,
    pub key: String,
    pub url: Option<Hyperlink>,
    pub title: String,
    pub verified: bool,
    pub read_only: bool,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    links: Links,
}

impl Hypermedia for User {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Hypermedia for Organization {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Hypermedia for Repository {
    fn links(&self) -> &Links {
        &self.links
    }
}

impl Hypermedia for Key {
    fn links(&self) -> &Links {
        &self.links
    }
}

/// Request body for adding a public key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewKey {
    pub title: String,
    pub key: String,
}

/// Request body for creating a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
}

/// Request body for updating the authenticated user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hireable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_with_links() {
        let key: Key = serde_json::from_str(
            r#"{
                "id": 1,
                "key": "ssh-rsa AAA...",
                "title": "laptop",
                "verified": true,
                "created_at": "2013-07-16T20:04:07Z",
                "_links": { "self": { "href": "https://api.github.com/user/keys/1" } }
            }"#,
        )
        .unwrap();

        assert_eq!(key.id, 1);
        assert_eq!(key.title, "laptop");
        assert!(key.verified);
        assert!(!key.read_only);
        assert_eq!(
            key.link("self").map(Hyperlink::as_str),
            Some("https://api.github.com/user/keys/1")
        );
        assert_eq!(
            key.created_at.map(|t| t.to_rfc3339()),
            Some("2013-07-16T20:04:07+00:00".to_string())
        );
    }

    fn timestamp(text: &str) -> Option<DateTime<Utc>> {
        Some(text.parse().unwrap())
    }

    fn link(text: &'static str) -> Option<Hyperlink> {
        Some(Hyperlink::from_static(text))
    }

    #[test]
    fn test_key_fixture_decodes_every_field() {
        let key: Key = serde_json::from_str(include_str!("../../fixtures/key.json")).unwrap();

        let expected = Key {
            id: 7644286,
            key: "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQDIWe7ot3gvC1S2s2mm4Vbc3MF5ylvLl9d+3kwZDDk2gKIz9+BtHUvmb2ZEdgfIOJvRAvUbHRCX".to_string(),
            url: link("https://api.github.com/user/keys/7644286"),
            title: "work laptop".to_string(),
            verified: true,
            read_only: false,
            created_at: timestamp("2013-07-16T20:04:07Z"),
            links: Links::default(),
        };
        assert_eq!(key, expected);
    }

    #[test]
    fn test_organization_fixture_decodes_every_field() {
        let org: Organization =
            serde_json::from_str(include_str!("../../fixtures/organization.json")).unwrap();

        let expected = Organization {
            id: 3430433,
            login: "octokit".to_string(),
            name: Some("Octokit".to_string()),
            description: None,
            company: None,
            blog: Some("http://octokit.github.io".to_string()),
            location: None,
            email: None,
            avatar_url: Some("https://avatars.githubusercontent.com/u/3430433?".to_string()),
            html_url: Some("https://github.com/octokit".to_string()),
            url: link("https://api.github.com/orgs/octokit"),
            repos_url: link("https://api.github.com/orgs/octokit/repos"),
            events_url: link("https://api.github.com/orgs/octokit/events"),
            members_url: link("https://api.github.com/orgs/octokit/members{/member}"),
            public_members_url: link(
                "https://api.github.com/orgs/octokit/public_members{/member}",
            ),
            public_repos: 9,
            public_gists: 0,
            followers: 0,
            following: 0,
            created_at: timestamp("2013-01-30T18:42:45Z"),
            updated_at: timestamp("2013-09-06T20:57:21Z"),
            links: Links::default(),
        };
        assert_eq!(org, expected);
    }

    #[test]
    fn test_unknown_user_type() {
        let user: User = serde_json::from_str(r#"{"id": 7, "login": "x", "type": "Mannequin"}"#)
            .unwrap();
        assert_eq!(user.user_type, UserType::Unknown);
        assert!(user.links().is_empty());
    }

    #[test]
    fn test_new_repository_skips_unset_fields() {
        let body = serde_json::to_value(NewRepository {
            name: "hello".to_string(),
            private: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "name": "hello", "private": true }));
    }
}
