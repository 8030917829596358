// User endpoints.

use serde::Serialize;

use crate::github::client::Client;
use crate::github::outcome::Outcome;
use crate::github::types::User;
use crate::hyperlink::{Hyperlink, Params, resolve};

pub const USER_URL: Hyperlink = Hyperlink::from_static("/users/{user}");
pub const CURRENT_USER_URL: Hyperlink = Hyperlink::from_static("/user");

impl Client {
    pub fn users(&self) -> UsersService<'_> {
        UsersService { client: self }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UsersService<'a> {
    client: &'a Client,
}

impl UsersService<'_> {
    /// Get a user (`user`).
    pub async fn one(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<User> {
        let url = match resolve(uri, &USER_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// Get the authenticated user.
    pub async fn current(&self, uri: Option<&Hyperlink>, params: &Params) -> Outcome<User> {
        let url = match resolve(uri, &CURRENT_USER_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.get(&url).await
    }

    /// Update the authenticated user's profile. See [`UserUpdate`](crate::github::UserUpdate).
    pub async fn update<B>(&self, uri: Option<&Hyperlink>, params: &Params, body: &B) -> Outcome<User>
    where
        B: Serialize + ?Sized,
    {
        let url = match resolve(uri, &CURRENT_USER_URL).expand(params) {
            Ok(url) => url,
            Err(err) => return err.into(),
        };
        self.client.patch(&url, body).await
    }
}
