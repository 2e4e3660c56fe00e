//! Configuration options for the cnHeat API
//!
//! A [`Config`] holds the OAuth client credentials and the API entrypoint which every resource
//! path is joined onto.
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::BuilderError;

/// The production cnHeat API entrypoint
pub const DEFAULT_ENTRYPOINT: &str = "https://internal.cnheat.cambiumnetworks.com/api/v1/";

pub const ENV_CLIENT_ID: &str = "CNHEAT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CNHEAT_CLIENT_SECRET";
pub const ENV_URL: &str = "CNHEAT_URL";

#[derive(Debug, Clone)]
pub struct Config {
    entrypoint: Url,
    client_id: String,
    client_secret: SecretString,
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.entrypoint == other.entrypoint
            && self.client_id == other.client_id
            && self.expose_secret() == other.expose_secret()
    }
}

impl Eq for Config {}

impl Config {
    /// # Example
    ///
    /// ```
    /// # use cnheat_api::config::Config;
    /// let config = Config::builder()
    ///     .client_id("foo")
    ///     .client_secret("bar")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.client_id(), "foo");
    /// assert_eq!(config.expose_secret(), "bar");
    /// ```
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from the environment.
    ///
    /// + CNHEAT_CLIENT_ID: The OAuth client id
    /// + CNHEAT_CLIENT_SECRET: The OAuth client secret
    /// + CNHEAT_URL (optional): Overrides the API entrypoint
    pub fn from_env() -> Result<Self, BuilderError> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| BuilderError::MissingEnv(name.to_string()))
        };

        let mut builder = Self::builder()
            .client_id(var(ENV_CLIENT_ID)?)
            .client_secret(var(ENV_CLIENT_SECRET)?);

        if let Ok(url) = std::env::var(ENV_URL) {
            builder = builder.entrypoint(url);
        }

        builder.build()
    }

    pub fn entrypoint(&self) -> &Url {
        &self.entrypoint
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    pub fn expose_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    pub fn set_entrypoint(&mut self, entrypoint: Url) {
        self.entrypoint = normalize(entrypoint);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    entrypoint: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
}

impl ConfigBuilder {
    pub fn entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::from(client_secret.into()));
        self
    }

    pub fn build(self) -> Result<Config, BuilderError> {
        let client_id = self.client_id.ok_or(BuilderError::MissingClientId)?;
        let client_secret = self
            .client_secret
            .ok_or(BuilderError::MissingClientSecret)?;

        let raw = self.entrypoint.as_deref().unwrap_or(DEFAULT_ENTRYPOINT);
        let entrypoint =
            Url::parse(raw).map_err(|error| BuilderError::InvalidEntrypoint(error.to_string()))?;
        if entrypoint.cannot_be_a_base() {
            return Err(BuilderError::InvalidEntrypoint(raw.to_string()));
        }

        Ok(Config {
            entrypoint: normalize(entrypoint),
            client_id,
            client_secret,
        })
    }
}

// `Url::join` replaces the final segment unless the path ends in a slash
fn normalize(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
