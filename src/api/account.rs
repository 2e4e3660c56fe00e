use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{Error, ResultExt},
    models::Antenna,
};

use super::Api;

/// Account level lookups: credit balances and the antenna catalogue
#[async_trait]
pub trait AccountApi: Api {
    /// Fetch the credit balances for the account, as returned by the server
    async fn get_credits(&self) -> Result<Value, Error> {
        async {
            let uri = self.path_to_url("credits")?;
            self.get_json_map(uri).await
        }
        .await
        .context("Failed to fetch credits")
    }

    /// Fetch the antennas available for the provided frequency, in GHz
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cnheat_api::prelude::*;
    /// # tokio_test::block_on(async {
    /// let client = Client::connect(Config::from_env()?).await?;
    ///
    /// for antenna in client.get_antennas(5.8).await? {
    ///     println!("{} {:?}", antenna.id, antenna.antenna);
    /// }
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// # });
    /// ```
    async fn get_antennas(&self, frequency: f64) -> Result<Vec<Antenna>, Error> {
        async {
            let mut uri = self.path_to_url("antennas")?;
            uri.query_pairs_mut()
                .append_pair("frequency", &frequency.to_string());
            self.get_objects(uri).await
        }
        .await
        .context("Failed to fetch antennas")
    }
}

impl<T> AccountApi for T where T: Api {}
