use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{Error, ResultExt},
    models::{Id, Prediction, PredictionStatus},
};

use super::{post, Api};

/// Prediction endpoints
///
/// Predictions are computed asynchronously by the server; poll
/// [`get_prediction_statuses`](Self::get_prediction_statuses) to follow a job.
#[async_trait]
pub trait PredictionApi: Api {
    async fn get_predictions(&self) -> Result<Vec<Prediction>, Error> {
        async {
            let uri = self.path_to_url("predictions")?;
            self.get_objects(uri).await
        }
        .await
        .context("Failed to fetch predictions")
    }

    async fn get_prediction_statuses(&self) -> Result<Vec<PredictionStatus>, Error> {
        async {
            let uri = self.path_to_url("predictions/jobmanagement")?;
            self.get_objects(uri).await
        }
        .await
        .context("Failed to fetch prediction statuses")
    }

    /// Rename a prediction, returning the server's response unchanged
    async fn rename_prediction<I, N>(&self, prediction_id: I, name: N) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
        N: Into<String> + Send,
    {
        let prediction_id = prediction_id.into();
        let body = serde_json::json!({ "name": name.into() });

        async {
            let uri = self.path_to_url(format!("prediction/{prediction_id}/rename"))?;
            self.patch_json_map(uri, Some(body)).await
        }
        .await
        .context("Failed to rename prediction")
    }

    async fn delete_prediction<I>(&self, prediction_id: I) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
    {
        let prediction_id = prediction_id.into();

        async {
            let uri = self.path_to_url(format!("prediction/{prediction_id}"))?;
            self.delete_json_map(uri, None::<()>).await
        }
        .await
        .context("Failed to delete prediction")
    }

    /// Start a prediction over a set of radios
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cnheat_api::prelude::*;
    /// # tokio_test::block_on(async {
    /// let client = Client::connect(Config::from_env()?).await?;
    ///
    /// client
    ///     .new_prediction()
    ///     .name("Q3-Plan")
    ///     .radios(["radio-1", "radio-2"])
    ///     .send()
    ///     .await?;
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// # });
    /// ```
    fn new_prediction(&self) -> post::PredictionBuilder<'_, Self, post::prediction::NoName>
    where
        Self: Sized,
    {
        post::prediction::new(self)
    }
}

impl<T> PredictionApi for T where T: Api {}
