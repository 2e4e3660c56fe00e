use serde::Serialize;
use serde_json::Value;

use crate::{
    api::Api,
    error::{Error, ResultExt},
    models::Id,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDetails {
    name: String,
    lat: f64,
    lon: f64,
    /// The credit allocation the site draws from
    credits: Id,
}

pub struct SiteBuilder<'a, C, S> {
    pub(crate) client: &'a C,
    state: S,
}

pub struct NoName;

pub fn new<C>(client: &C) -> SiteBuilder<'_, C, NoName> {
    SiteBuilder {
        client,
        state: NoName,
    }
}

impl<'a, C> SiteBuilder<'a, C, NoName> {
    pub fn name(self, name: impl Into<String>) -> SiteBuilder<'a, C, NoLocation> {
        SiteBuilder {
            client: self.client,
            state: NoLocation { name: name.into() },
        }
    }
}

pub struct NoLocation {
    name: String,
}

impl<'a, C> SiteBuilder<'a, C, NoLocation> {
    /// The site coordinates, in decimal degrees
    pub fn location(
        self,
        latitude: impl Into<f64>,
        longitude: impl Into<f64>,
    ) -> SiteBuilder<'a, C, NoCredits> {
        SiteBuilder {
            client: self.client,
            state: NoCredits {
                name: self.state.name,
                lat: latitude.into(),
                lon: longitude.into(),
            },
        }
    }
}

pub struct NoCredits {
    name: String,
    lat: f64,
    lon: f64,
}

impl<'a, C> SiteBuilder<'a, C, NoCredits> {
    pub fn credits(self, credit_id: impl Into<Id>) -> SiteBuilder<'a, C, SiteDetails> {
        let state = SiteDetails {
            name: self.state.name,
            lat: self.state.lat,
            lon: self.state.lon,
            credits: credit_id.into(),
        };

        SiteBuilder {
            client: self.client,
            state,
        }
    }
}

impl<C> SiteBuilder<'_, C, SiteDetails>
where
    C: Api,
{
    pub async fn send(self) -> Result<Value, Error> {
        let client = self.client;

        async {
            let url = client.path_to_url("sites")?;
            client.post_json_map(url, &self.state).await
        }
        .await
        .context("Failed to create site")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_credits_field() {
        let builder = new(&()).name("denver").location(39.74, -104.99).credits(12_u32);

        assert_eq!(
            serde_json::to_value(&builder.state).unwrap(),
            serde_json::json!({
                "name": "denver",
                "lat": 39.74,
                "lon": -104.99,
                "credits": "12",
            })
        );
    }
}
