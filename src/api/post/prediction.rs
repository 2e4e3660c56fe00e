use serde::Serialize;
use serde_json::Value;

use crate::{
    api::Api,
    error::{Error, ResultExt},
    models::Id,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDetails {
    name: String,
    radio_list: Vec<Id>,
}

pub struct PredictionBuilder<'a, C, S> {
    pub(crate) client: &'a C,
    state: S,
}

pub struct NoName;

pub fn new<C>(client: &C) -> PredictionBuilder<'_, C, NoName> {
    PredictionBuilder {
        client,
        state: NoName,
    }
}

impl<'a, C> PredictionBuilder<'a, C, NoName> {
    pub fn name(self, name: impl Into<String>) -> PredictionBuilder<'a, C, PredictionDetails> {
        PredictionBuilder {
            client: self.client,
            state: PredictionDetails {
                name: name.into(),
                radio_list: Vec::new(),
            },
        }
    }
}

impl<C> PredictionBuilder<'_, C, PredictionDetails> {
    pub fn add_radio(mut self, radio_id: impl Into<Id>) -> Self {
        self.state.radio_list.push(radio_id.into());
        self
    }

    pub fn radios<I, T>(mut self, radio_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Id>,
    {
        for radio_id in radio_ids {
            self = self.add_radio(radio_id);
        }

        self
    }
}

impl<C> PredictionBuilder<'_, C, PredictionDetails>
where
    C: Api,
{
    pub async fn send(self) -> Result<Value, Error> {
        let client = self.client;

        async {
            let url = client.path_to_url("predictions")?;
            client.post_json_map(url, &self.state).await
        }
        .await
        .context("Failed to create prediction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_radio_ids() {
        let builder = new(&())
            .name("Q3-Plan")
            .add_radio("r1")
            .radios(["r2", "r3"]);

        assert_eq!(
            serde_json::to_value(&builder.state).unwrap(),
            serde_json::json!({"name": "Q3-Plan", "radio_list": ["r1", "r2", "r3"]})
        );
    }
}
