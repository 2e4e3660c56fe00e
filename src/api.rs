//! # cnHeat API
//!
//! This module defines the [`Api`] trait, which holds the transport primitives and the generic
//! request pattern, along with one extension trait per resource family. The extension traits are
//! implemented for every [`Api`], so bringing the prelude into scope exposes all endpoints on a
//! [`Client`](crate::Client).
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    config::Config,
    error::{Error, RuntimeError},
    models::Objects,
};

pub(crate) mod account;
pub mod post;
pub(crate) mod prediction;
pub(crate) mod radio;
pub(crate) mod site;
pub(crate) mod subscription;
pub(crate) mod user;

pub use self::{
    account::AccountApi, prediction::PredictionApi, radio::RadioApi, site::SiteApi,
    subscription::SubscriptionApi, user::UserApi,
};

/// A super trait containing all the requirements for decoded response values
pub trait Value: std::fmt::Debug + DeserializeOwned + Send + Sync {}

impl<T> Value for T where T: std::fmt::Debug + DeserializeOwned + Send + Sync {}

/// The primary trait for interfacing with cnHeat
///
/// Implementors only provide the four HTTP verbs. Every verb must attach the bearer token; the
/// provided methods layer status checking and JSON decoding on top.
#[async_trait]
pub trait Api: Send + Sync {
    /// Creates a GET request at the provided absolute URI.
    ///
    /// Returns the raw binary body, and the status code.
    async fn get(&self, url: Url) -> Result<(Bytes, StatusCode), Error>;

    async fn post<S>(&self, url: Url, msg: S) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync;

    /// Creates a PATCH request, with a JSON body when `msg` is `Some`
    async fn patch<S>(&self, url: Url, msg: Option<S>) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync;

    /// Creates a DELETE request, with a JSON body when `msg` is `Some`
    async fn delete<S>(&self, url: Url, msg: Option<S>) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync;

    fn config(&self) -> &Config;

    fn config_mut(&mut self) -> &mut Config;

    /// Join the provided path onto the configured entrypoint
    fn path_to_url(&self, path: impl AsRef<str>) -> Result<Url, Error> {
        self.config()
            .entrypoint()
            .join(path.as_ref())
            .map_err(From::from)
    }

    /// Creates a GET request and deserializes the JSON body into the required type, erroring on a
    /// non-success status or a failed deserialization.
    async fn get_json_map<T>(&self, url: Url) -> Result<T, Error>
    where
        T: Value,
    {
        let (body, status) = self.get(url).await?;

        error_on_non_success(&status, &body)?;

        decode(&body)
    }

    /// Creates a GET request against a list endpoint and returns the items found under `objects`.
    ///
    /// A response without `objects` is treated as an empty list.
    async fn get_objects<T>(&self, url: Url) -> Result<Vec<T>, Error>
    where
        T: Value,
    {
        Ok(self.get_json_map::<Objects<T>>(url).await?.objects)
    }

    async fn post_json_map<S, T>(&self, url: Url, msg: S) -> Result<T, Error>
    where
        S: Serialize + Send + Sync,
        T: Value,
    {
        let resp = self.post(url, msg).await?;
        json_from_response(resp).await
    }

    async fn patch_json_map<S, T>(&self, url: Url, msg: Option<S>) -> Result<T, Error>
    where
        S: Serialize + Send + Sync,
        T: Value,
    {
        let resp = self.patch(url, msg).await?;
        json_from_response(resp).await
    }

    async fn delete_json_map<S, T>(&self, url: Url, msg: Option<S>) -> Result<T, Error>
    where
        S: Serialize + Send + Sync,
        T: Value,
    {
        let resp = self.delete(url, msg).await?;
        json_from_response(resp).await
    }
}

pub(crate) async fn json_from_response<T>(resp: Response) -> Result<T, Error>
where
    T: Value,
{
    let status = resp.status();
    let url = resp.url().clone();
    let body = resp
        .bytes()
        .await
        .inspect_err(|error| tracing::warn!(%url, %error, %status, "Failed to get response body"))?;

    tracing::debug!(%url, body = %String::from_utf8_lossy(&body), %status, "Received response body");
    error_on_non_success(&status, &body)?;

    decode(&body)
}

// Mutations may answer with an empty body, which is read as JSON `null`
fn decode<T>(body: &[u8]) -> Result<T, Error>
where
    T: Value,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null").map_err(From::from);
    }

    serde_json::from_slice(body).map_err(From::from)
}

pub(crate) fn error_on_non_success(status: &StatusCode, body: &[u8]) -> Result<(), Error> {
    if !status.is_success() {
        let body = String::from_utf8_lossy(body);
        let message = match body.trim() {
            "" => status.to_string(),
            body => format!("{status} {body}"),
        };
        return Err(Error::Runtime(RuntimeError::Response(message)));
    }

    Ok(())
}
