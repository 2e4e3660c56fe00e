use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{Error, ResultExt},
    models::{Id, Radio},
};

use super::{post, Api};

/// Radio endpoints
#[async_trait]
pub trait RadioApi: Api {
    /// Fetch the radios configured under a site
    async fn get_site_radios<I>(&self, site_id: I) -> Result<Vec<Radio>, Error>
    where
        I: Into<Id> + Send,
    {
        let site_id = site_id.into();

        async {
            let uri = self.path_to_url(format!("radios/{site_id}"))?;
            self.get_objects(uri).await
        }
        .await
        .context(format!("Failed to fetch radios for site {site_id}"))
    }

    async fn get_radio<I>(&self, radio_id: I) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
    {
        let radio_id = radio_id.into();

        async {
            let uri = self.path_to_url(format!("radio/{radio_id}"))?;
            self.get_json_map(uri).await
        }
        .await
        .context("Failed to fetch radio")
    }

    async fn delete_radio<I>(&self, radio_id: I) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
    {
        let radio_id = radio_id.into();

        async {
            let uri = self.path_to_url(format!("radio/{radio_id}"))?;
            self.delete_json_map(uri, None::<()>).await
        }
        .await
        .context("Failed to delete radio")
    }

    /// Create a new radio under the provided site
    ///
    /// Every setting other than frequency, antenna and azimuth has a default. When no name is
    /// given, one is generated from the antenna, azimuth, frequency and site name; see
    /// [`default_radio_name`](crate::post::radio::default_radio_name).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cnheat_api::prelude::*;
    /// # tokio_test::block_on(async {
    /// let client = Client::connect(Config::from_env()?).await?;
    ///
    /// client
    ///     .new_radio("site-1")
    ///     .frequency(5.8)
    ///     .antenna("antenna-7")
    ///     .azimuth(120)
    ///     .height(30)
    ///     .send()
    ///     .await?;
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// # });
    /// ```
    fn new_radio(
        &self,
        site_id: impl Into<Id>,
    ) -> post::RadioBuilder<'_, Self, post::radio::Create, post::radio::NoFrequency>
    where
        Self: Sized,
    {
        post::radio::create(self, site_id.into())
    }

    /// Replace the settings of an existing radio
    ///
    /// Settings which are not provided are reset to their defaults, and the name to
    /// [`UNNAMED_RADIO`](crate::post::radio::UNNAMED_RADIO).
    fn update_radio(
        &self,
        radio_id: impl Into<Id>,
    ) -> post::RadioBuilder<'_, Self, post::radio::Update, post::radio::NoFrequency>
    where
        Self: Sized,
    {
        post::radio::update(self, radio_id.into())
    }
}

impl<T> RadioApi for T where T: Api {}
