use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    api::{error_on_non_success, Api, PredictionApi, SiteApi, UserApi},
    config::Config,
    error::{Error, ResultExt, RuntimeError},
    models::{Prediction, Site, User},
};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// The sites, predictions and users most recently fetched by [`Client::refresh`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub sites: Vec<Site>,
    pub predictions: Vec<Prediction>,
    pub users: Vec<User>,
}

/// An asynchronous `Client` for interfacing with the cnHeat API.
///
/// The client is defined by its [`Config`], the bearer token obtained from
/// [`authenticate`](Client::authenticate), and a [`Snapshot`] of the account's sites, predictions
/// and users.
///
/// The snapshot is only ever written by [`refresh`](Client::refresh). Creating, renaming or
/// deleting resources through the client does **not** update it, so it goes stale as soon as a
/// mutating call succeeds.
#[derive(Clone, Debug)]
pub struct Client {
    pub(crate) config: Config,
    pub(crate) client: reqwest::Client,
    universal_headers: Vec<(String, String)>,
    token: Option<SecretString>,
    snapshot: Snapshot,
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Client {
    /// Construct an unauthenticated API client from the provided config.
    ///
    /// No requests are made. Call [`authenticate`](Self::authenticate) before using any endpoint,
    /// or use [`connect`](Self::connect) to authenticate and populate the snapshot in one step.
    ///
    /// # Example
    ///
    /// ```
    /// # use cnheat_api::prelude::*;
    /// let config = Config::builder()
    ///     .client_id("foo")
    ///     .client_secret("bar")
    ///     .build()
    ///     .unwrap();
    /// let client = Client::from_config(config);
    ///
    /// assert_eq!(client.config().client_id(), "foo");
    /// assert!(!client.is_authenticated());
    /// ```
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            universal_headers: Vec::new(),
            token: None,
            snapshot: Snapshot::default(),
        }
    }

    /// A convenience method for constructing a client from environment variables.
    ///
    /// See [`Config::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, Error> {
        let config = Config::from_env()?;
        Ok(Self::from_config(config))
    }

    /// Authenticate, then fetch the sites, predictions and users snapshot.
    ///
    /// Fails if any one of the four requests fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cnheat_api::prelude::*;
    /// # tokio_test::block_on(async {
    /// let client = Client::connect(Config::from_env()?).await?;
    ///
    /// for site in client.sites() {
    ///     println!("{}: {:?}", site.id, site.name);
    /// }
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// # });
    /// ```
    pub async fn connect(config: Config) -> Result<Self, Error> {
        let mut client = Self::from_config(config);
        client.authenticate().await?;
        client.refresh().await?;

        Ok(client)
    }

    /// Adds a universal header key and value to all requests made with the client
    pub fn with_universal_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.universal_headers.push((key.into(), value.into()));
        self
    }

    /// Use an access token obtained elsewhere instead of calling [`authenticate`](Self::authenticate)
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange the configured client credentials for a bearer token.
    ///
    /// The token is kept for the lifetime of the client and is never refreshed.
    pub async fn authenticate(&mut self) -> Result<(), Error> {
        let token = self
            .request_token()
            .await
            .context("Authentication failed")?;
        self.token = Some(token);

        Ok(())
    }

    async fn request_token(&self) -> Result<SecretString, Error> {
        let url = self.path_to_url("oauth/token")?;
        tracing::trace!("POST to {}", url);

        let form = [
            ("client_id", self.config.client_id()),
            ("client_secret", self.config.expose_secret()),
        ];

        let resp = self
            .append_headers(self.client.post(url.clone()))
            .form(&form)
            .send()
            .await
            .inspect_err(|error| tracing::warn!(%error, %url, "Failed to authenticate"))?;

        // The body holds the token, so only its size is logged
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::debug!(%url, %status, len = body.len(), "Received token response");
        error_on_non_success(&status, &body)?;

        let token = serde_json::from_slice::<TokenResponse>(&body)?
            .access_token
            .ok_or_else(|| Error::missing_field("access_token"))?;

        tracing::debug!(%url, client_id = self.config.client_id(), "Authenticated");
        Ok(SecretString::from(token))
    }

    /// Re-fetch the sites, predictions and users snapshot.
    ///
    /// The previous snapshot is only replaced once all three requests succeed.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let sites = self.get_sites().await?;
        let predictions = self.get_predictions().await?;
        let users = self.get_users().await?;

        tracing::debug!(
            sites = sites.len(),
            predictions = predictions.len(),
            users = users.len(),
            "Refreshed snapshot"
        );

        self.snapshot = Snapshot {
            sites,
            predictions,
            users,
        };

        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Sites as of the last [`refresh`](Self::refresh)
    pub fn sites(&self) -> &[Site] {
        &self.snapshot.sites
    }

    /// Predictions as of the last [`refresh`](Self::refresh)
    pub fn predictions(&self) -> &[Prediction] {
        &self.snapshot.predictions
    }

    /// Users as of the last [`refresh`](Self::refresh)
    pub fn users(&self) -> &[User] {
        &self.snapshot.users
    }

    fn append_headers(&self, mut req: RequestBuilder) -> RequestBuilder {
        for (header, value) in self.universal_headers.iter() {
            req = req.header(header, value);
        }
        req
    }

    fn request<S>(&self, method: Method, url: &Url, msg: Option<S>) -> Result<RequestBuilder, Error>
    where
        S: Serialize,
    {
        let token = self.token.as_ref().ok_or(RuntimeError::Unauthenticated)?;

        let mut req = self
            .append_headers(self.client.request(method, url.clone()))
            .bearer_auth(token.expose_secret());

        if let Some(msg) = msg {
            req = req.json(&msg);
        }

        Ok(req)
    }

    async fn send<S>(&self, method: Method, url: Url, msg: Option<S>) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync,
    {
        tracing::trace!("{} to {}", method, url);

        self.request(method.clone(), &url, msg)?
            .send()
            .await
            .inspect_err(|error| tracing::warn!(%error, %method, %url, "Request failed"))
            .inspect(|ok| tracing::info!(status = %ok.status(), %method, %url, "Received response"))
            .map_err(From::from)
    }
}

#[async_trait]
impl Api for Client {
    async fn get(&self, url: Url) -> Result<(Bytes, StatusCode), Error> {
        tracing::trace!("GET to {}", url);

        let resp = self
            .request(Method::GET, &url, None::<()>)?
            .send()
            .await
            .inspect_err(|error| tracing::warn!(%error, %url, "Failed to GET"))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .inspect_err(|error| tracing::warn!(%url, %error, %status, "Failed to get response body"))
            .inspect(|body| tracing::debug!(%url, body = %String::from_utf8_lossy(body), %status, "Received response body"))?;

        Ok((body, status))
    }

    async fn post<S>(&self, url: Url, msg: S) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync,
    {
        self.send(Method::POST, url, Some(msg)).await
    }

    async fn patch<S>(&self, url: Url, msg: Option<S>) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync,
    {
        self.send(Method::PATCH, url, msg).await
    }

    async fn delete<S>(&self, url: Url, msg: Option<S>) -> Result<Response, Error>
    where
        S: Serialize + Send + Sync,
    {
        self.send(Method::DELETE, url, msg).await
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
