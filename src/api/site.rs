use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{Error, ResultExt},
    models::{Id, Site},
};

use super::{post, Api};

/// Site endpoints
#[async_trait]
pub trait SiteApi: Api {
    /// Fetch every site on the account
    async fn get_sites(&self) -> Result<Vec<Site>, Error> {
        async {
            let uri = self.path_to_url("sites")?;
            self.get_objects(uri).await
        }
        .await
        .context("Failed to fetch sites")
    }

    /// Rename the site matching the provided id
    async fn rename_site<I, N>(&self, site_id: I, name: N) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
        N: Into<String> + Send,
    {
        let site_id = site_id.into();
        let body = serde_json::json!({ "name": name.into() });

        async {
            let uri = self.path_to_url(format!("site/{site_id}"))?;
            self.patch_json_map(uri, Some(body)).await
        }
        .await
        .context("Failed to update site")
    }

    /// Create a new site
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cnheat_api::prelude::*;
    /// # tokio_test::block_on(async {
    /// let client = Client::connect(Config::from_env()?).await?;
    ///
    /// client
    ///     .new_site()
    ///     .name("denver")
    ///     .location(39.74, -104.99)
    ///     .credits("credit-1")
    ///     .send()
    ///     .await?;
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// # });
    /// ```
    fn new_site(&self) -> post::site::SiteBuilder<'_, Self, post::site::NoName>
    where
        Self: Sized,
    {
        post::site::new(self)
    }
}

impl<T> SiteApi for T where T: Api {}
