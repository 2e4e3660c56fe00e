use serde::Serialize;
use serde_json::Value;

use crate::{
    api::Api,
    error::{Error, ResultExt},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetails {
    email: String,
    permission: String,
}

pub struct UserBuilder<'a, C, S> {
    client: &'a C,
    state: S,
}

pub fn new<C>(client: &C) -> UserBuilder<'_, C, NoEmail> {
    UserBuilder {
        client,
        state: NoEmail,
    }
}

pub struct NoEmail;

impl<'a, C> UserBuilder<'a, C, NoEmail> {
    pub fn email(self, email: impl Into<String>) -> UserBuilder<'a, C, NoPermission> {
        UserBuilder {
            client: self.client,
            state: NoPermission {
                email: email.into(),
            },
        }
    }
}

pub struct NoPermission {
    email: String,
}

impl<'a, C> UserBuilder<'a, C, NoPermission> {
    /// The role granted to the user, e.g. `admin`
    pub fn permission(self, permission: impl Into<String>) -> UserBuilder<'a, C, UserDetails> {
        UserBuilder {
            client: self.client,
            state: UserDetails {
                email: self.state.email,
                permission: permission.into(),
            },
        }
    }
}

impl<C> UserBuilder<'_, C, UserDetails>
where
    C: Api,
{
    pub async fn send(self) -> Result<Value, Error> {
        let client = self.client;

        async {
            let url = client.path_to_url("users")?;
            client.post_json_map(url, &self.state).await
        }
        .await
        .context("Failed to add user")
    }
}
