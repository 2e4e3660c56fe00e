use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{Error, ResultExt},
    models::{Id, Subscription},
};

use super::Api;

/// Site subscription endpoints
#[async_trait]
pub trait SubscriptionApi: Api {
    async fn get_subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        async {
            let uri = self.path_to_url("subscriptions")?;
            self.get_objects(uri).await
        }
        .await
        .context("Failed to get subscriptions")
    }

    async fn renew_subscription<I>(&self, site_id: I) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
    {
        let site_id = site_id.into();

        async {
            let uri = self.path_to_url(format!("subscription/{site_id}/renew"))?;
            self.patch_json_map(uri, None::<()>).await
        }
        .await
        .context("Failed to renew subscription")
    }

    async fn terminate_subscription<I>(&self, site_id: I) -> Result<Value, Error>
    where
        I: Into<Id> + Send,
    {
        let site_id = site_id.into();

        async {
            let uri = self.path_to_url(format!("subscription/{site_id}/terminate"))?;
            self.patch_json_map(uri, None::<()>).await
        }
        .await
        .context("Failed to terminate subscription")
    }
}

impl<T> SubscriptionApi for T where T: Api {}
