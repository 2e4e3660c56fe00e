//! Data types returned by the cnHeat API
//!
//! The service does not publish a schema, so each type names only the fields this crate relies
//! on. Everything else the server sends is preserved in the flattened `extra` map.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wrapper for list responses, which place their items under `objects`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Objects<T> {
    #[serde(default = "Vec::new")]
    pub objects: Vec<T>,
}

/// An identifier as sent by the server, which may be either a JSON string or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for Id {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&Id> for Id {
    fn from(value: &Id) -> Self {
        value.clone()
    }
}

macro_rules! id_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Id {
                fn from(value: $int) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

id_from_int!(u32, u64, i32, i64);

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = Id;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a string or integer identifier")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Id, E> {
                Ok(Id(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Antenna {
    pub id: Id,
    /// The antenna model name, e.g. `HPA-90`
    #[serde(default)]
    pub antenna: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Antenna {
    /// The model family, i.e. everything before the first `-` of the name
    pub fn prefix(&self) -> Option<&str> {
        self.antenna.as_deref()?.split('-').next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radio {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub radio_list: Option<Vec<Id>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A prediction job as reported by `predictions/jobmanagement`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionStatus {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub site_id: Option<Id>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ids_accept_strings_and_numbers() {
        let ids: Vec<Id> = serde_json::from_value(json!(["abc", 42, -7])).unwrap();
        assert_eq!(ids, vec![Id::from("abc"), Id::from(42_u64), Id::from(-7_i64)]);
        assert_eq!(ids[1], "42");
    }

    #[test]
    fn missing_objects_is_empty() {
        let list: Objects<Site> = serde_json::from_value(json!({"total": 0})).unwrap();
        assert!(list.objects.is_empty());
    }

    #[test]
    fn site_keeps_unknown_fields() {
        let site: Site = serde_json::from_value(json!({
            "id": 14,
            "name": "denver",
            "lat": 39.74,
            "lon": -104.99,
        }))
        .unwrap();

        assert_eq!(site.id, "14");
        assert_eq!(site.name.as_deref(), Some("denver"));
        assert_eq!(site.extra.get("lat"), Some(&json!(39.74)));

        let value = serde_json::to_value(&site).unwrap();
        assert_eq!(value["id"], json!("14"));
        assert_eq!(value["lon"], json!(-104.99));
    }

    #[test]
    fn antenna_prefix() {
        let antenna: Antenna =
            serde_json::from_value(json!({"id": "a1", "antenna": "HPA-90"})).unwrap();
        assert_eq!(antenna.prefix(), Some("HPA"));

        let antenna: Antenna =
            serde_json::from_value(json!({"id": "a2", "antenna": "Omni"})).unwrap();
        assert_eq!(antenna.prefix(), Some("Omni"));

        let antenna: Antenna = serde_json::from_value(json!({"id": "a3"})).unwrap();
        assert_eq!(antenna.prefix(), None);
    }

    #[test]
    fn list_items_without_names() {
        let list: Objects<Site> = serde_json::from_value(json!({"objects": [
            {"id": "s1", "name": "denver"},
            {"id": "s2", "lat": 1.0},
        ]}))
        .unwrap();

        assert_eq!(list.objects.len(), 2);
        assert_eq!(list.objects[1].name, None);
        assert_eq!(list.objects[1].extra.get("lat"), Some(&json!(1.0)));
    }

    #[test]
    fn prediction_with_radio_ids() {
        let prediction: Prediction = serde_json::from_value(json!({
            "id": "p1",
            "name": "Q3-Plan",
            "radio_list": ["r1", 2],
        }))
        .unwrap();

        assert_eq!(prediction.radio_list, Some(vec![Id::from("r1"), Id::from(2_u32)]));
    }
}
