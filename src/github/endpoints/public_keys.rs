// Public key endpoints.
// Lists, fetches, adds and removes SSH keys.

use reqwest::StatusCode;
use serde::Serialize;

use crate::github::client::Client;
use crate::github::outcome::Outcome;
use crate::github::types::Key;
use crate::hyperlink::{Hyperlink, Params, resolve};

pub const CURRENT_PUBLIC_KEY_URL: Hyperlink = Hyperlink::from_static("/user/keys{/id}");
pub const PUBLIC_KEY_URL: Hyperlink = Hyperlink::from_static("/users/{user}/keys");

impl Client {
    pub fn public_keys(&self) -> PublicKeysService<'_> {
        PublicKeysService { client: self }
    }
}

/// Public keys of the authenticated user, or of any user via [`PUBLIC_KEY_URL`].
#[derive(Debug, Clone, Copy)]
pub struct PublicKeysService<'a> {
    client: &'a Client,
}

impl PublicKeysService<'_> {
    /// List keys.
    pub async fn all(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<Vec<Key>> {
        let url = match resolve(uri, &CURRENT_PUBLIC_KEY_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// Get a single key (`id`).
    pub async fn one(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<Key> {
        let url = match resolve(uri, &CURRENT_PUBLIC_KEY_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// Add a key for the authenticated user. See [`NewKey`](crate::github::NewKey).
    pub async fn create<B>(&self, uri: Option<&Hyperlink>, params: &Params, body: &B) -> Outcome<Key>
    where
        B: Serialize + ?Sized,
    {
        let url = match resolve(uri, &CURRENT_PUBLIC_KEY_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.post(&url, body).await
    }

    /// Remove a key (`id`). The value is true only for a 204 response.
    pub async fn delete(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<bool> {
        let url = match resolve(uri, &CURRENT_PUBLIC_KEY_URL).expand(params) {
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
