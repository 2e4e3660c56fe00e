#![doc = include_str!("../README.md")]

mod api;
mod client;
pub mod config;
pub mod error;
pub mod models;

pub use self::{
    api::{
        post, AccountApi, Api, PredictionApi, RadioApi, SiteApi, SubscriptionApi, UserApi, Value,
    },
    client::{Client, Snapshot},
    error::Error,
};

/// Contains the client, configuration, data models, and traits necessary for queries
pub mod prelude {
    pub use crate::{
        api::{
            post::{PredictionBuilder, RadioBuilder, SiteBuilder, UserBuilder},
            AccountApi, Api, PredictionApi, RadioApi, SiteApi, SubscriptionApi, UserApi, Value,
        },
        client::{Client, Snapshot},
        config::{Config, ConfigBuilder},
        error::{BuilderError, Error, ResultExt, RuntimeError},
        models::*,
    };
    pub use secrecy::{ExposeSecret, SecretString};
}
