use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{Error, ResultExt},
    models::User,
};

use super::{post, Api};

/// User management endpoints. Users are addressed by email.
#[async_trait]
pub trait UserApi: Api {
    async fn get_users(&self) -> Result<Vec<User>, Error> {
        async {
            let uri = self.path_to_url("users")?;
            self.get_objects(uri).await
        }
        .await
        .context("Failed to get users")
    }

    async fn delete_user<E>(&self, email: E) -> Result<Value, Error>
    where
        E: Into<String> + Send,
    {
        let body = serde_json::json!({ "email": email.into() });

        async {
            let uri = self.path_to_url("user")?;
            self.delete_json_map(uri, Some(body)).await
        }
        .await
        .context("Failed to delete user")
    }

    /// Invite a user to the account
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cnheat_api::prelude::*;
    /// # tokio_test::block_on(async {
    /// let client = Client::connect(Config::from_env()?).await?;
    ///
    /// client
    ///     .new_user()
    ///     .email("planner@example.com")
    ///     .permission("admin")
    ///     .send()
    ///     .await?;
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// # });
    /// ```
    fn new_user(&self) -> post::UserBuilder<'_, Self, post::user::NoEmail>
    where
        Self: Sized,
    {
        post::user::new(self)
    }
}

impl<T> UserApi for T where T: Api {}
