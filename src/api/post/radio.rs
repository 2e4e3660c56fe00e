use serde::Serialize;
use serde_json::Value;

use crate::{
    api::{AccountApi, Api, SiteApi},
    error::{Error, ResultExt, RuntimeError},
    models::{Antenna, Id, Site},
};

pub const DEFAULT_HEIGHT_M: f64 = 20.0;
pub const DEFAULT_FOLIAGE_TUNING: f64 = -1.0;
pub const DEFAULT_HEIGHT_ROOFTOP_M: f64 = 0.0;
pub const DEFAULT_RADIUS_M: f64 = 12875.0;
pub const DEFAULT_SM_GAIN_DBI: f64 = 18.5;
pub const DEFAULT_TILT: f64 = -2.0;
pub const DEFAULT_TX_CLEARANCE_M: f64 = 30.0;
pub const DEFAULT_TX_POWER_DBM: f64 = 27.2;

/// Name sent when updating a radio without an explicit name
pub const UNNAMED_RADIO: &str = "No Name";

/// The body of a radio create or update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadioDetails {
    antenna: Id,
    name: Option<String>,
    azimuth: f64,
    foliage_tuning: f64,
    #[serde(rename = "frequency(ghz)")]
    frequency_ghz: f64,
    #[serde(rename = "height(m)")]
    height_m: f64,
    #[serde(rename = "height_rooftop(m)")]
    height_rooftop_m: f64,
    #[serde(rename = "radius(m)")]
    radius_m: f64,
    #[serde(rename = "sm_gain(dbi)")]
    sm_gain_dbi: f64,
    tilt: f64,
    #[serde(rename = "txclearance(m)")]
    tx_clearance_m: f64,
    #[serde(rename = "txpower(dbm)")]
    tx_power_dbm: f64,
}

/// Build the name given to a radio created without one
///
/// `AP-{antenna family}-{azimuth}-{whole GHz} GHZ.{SITE}`, e.g. `AP-HPA-120-5 GHZ.DENVER`.
/// Returns `None` when either the antenna or the site has no name.
pub fn default_radio_name(
    antenna: &Antenna,
    azimuth: f64,
    frequency_ghz: f64,
    site: &Site,
) -> Option<String> {
    Some(format!(
        "AP-{}-{}-{} GHZ.{}",
        antenna.prefix()?,
        azimuth,
        frequency_ghz.trunc(),
        site.name.as_deref()?.to_uppercase()
    ))
}

/// Marker for a builder which POSTs a new radio under a site
pub struct Create {
    site_id: Id,
}

/// Marker for a builder which PATCHes an existing radio
pub struct Update {
    radio_id: Id,
}

pub struct RadioBuilder<'a, C, T, S> {
    pub(crate) client: &'a C,
    target: T,
    state: S,
}

pub fn create<C>(client: &C, site_id: Id) -> RadioBuilder<'_, C, Create, NoFrequency> {
    RadioBuilder {
        client,
        target: Create { site_id },
        state: NoFrequency,
    }
}

pub fn update<C>(client: &C, radio_id: Id) -> RadioBuilder<'_, C, Update, NoFrequency> {
    RadioBuilder {
        client,
        target: Update { radio_id },
        state: NoFrequency,
    }
}

pub struct NoFrequency;

impl<'a, C, T> RadioBuilder<'a, C, T, NoFrequency> {
    /// The operating frequency in GHz
    pub fn frequency(self, frequency_ghz: impl Into<f64>) -> RadioBuilder<'a, C, T, NoAntenna> {
        RadioBuilder {
            client: self.client,
            target: self.target,
            state: NoAntenna {
                frequency_ghz: frequency_ghz.into(),
            },
        }
    }
}

pub struct NoAntenna {
    frequency_ghz: f64,
}

impl<'a, C, T> RadioBuilder<'a, C, T, NoAntenna> {
    pub fn antenna(self, antenna_id: impl Into<Id>) -> RadioBuilder<'a, C, T, NoAzimuth> {
        RadioBuilder {
            client: self.client,
            target: self.target,
            state: NoAzimuth {
                frequency_ghz: self.state.frequency_ghz,
                antenna: antenna_id.into(),
            },
        }
    }
}

pub struct NoAzimuth {
    frequency_ghz: f64,
    antenna: Id,
}

impl<'a, C, T> RadioBuilder<'a, C, T, NoAzimuth> {
    pub fn azimuth(self, azimuth: impl Into<f64>) -> RadioBuilder<'a, C, T, RadioDetails> {
        let state = RadioDetails {
            antenna: self.state.antenna,
            name: None,
            azimuth: azimuth.into(),
            foliage_tuning: DEFAULT_FOLIAGE_TUNING,
            frequency_ghz: self.state.frequency_ghz,
            height_m: DEFAULT_HEIGHT_M,
            height_rooftop_m: DEFAULT_HEIGHT_ROOFTOP_M,
            radius_m: DEFAULT_RADIUS_M,
            sm_gain_dbi: DEFAULT_SM_GAIN_DBI,
            tilt: DEFAULT_TILT,
            tx_clearance_m: DEFAULT_TX_CLEARANCE_M,
            tx_power_dbm: DEFAULT_TX_POWER_DBM,
        };

        RadioBuilder {
            client: self.client,
            target: self.target,
            state,
        }
    }
}

impl<C, T> RadioBuilder<'_, C, T, RadioDetails> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.state.name = Some(name.into());
        self
    }

    /// Antenna height above ground level, in meters
    pub fn height(mut self, meters: impl Into<f64>) -> Self {
        self.state.height_m = meters.into();
        self
    }

    /// Height of the rooftop the radio is mounted on, in meters
    pub fn height_rooftop(mut self, meters: impl Into<f64>) -> Self {
        self.state.height_rooftop_m = meters.into();
        self
    }

    pub fn foliage_tuning(mut self, tuning: impl Into<f64>) -> Self {
        self.state.foliage_tuning = tuning.into();
        self
    }

    /// Coverage radius, in meters
    pub fn radius(mut self, meters: impl Into<f64>) -> Self {
        self.state.radius_m = meters.into();
        self
    }

    /// Subscriber module gain, in dBi
    pub fn sm_gain(mut self, dbi: impl Into<f64>) -> Self {
        self.state.sm_gain_dbi = dbi.into();
        self
    }

    pub fn tilt(mut self, tilt: impl Into<f64>) -> Self {
        self.state.tilt = tilt.into();
        self
    }

    pub fn tx_clearance(mut self, meters: impl Into<f64>) -> Self {
        self.state.tx_clearance_m = meters.into();
        self
    }

    pub fn tx_power(mut self, dbm: impl Into<f64>) -> Self {
        self.state.tx_power_dbm = dbm.into();
        self
    }

    pub fn details(&self) -> &RadioDetails {
        &self.state
    }
}

impl<C> RadioBuilder<'_, C, Create, RadioDetails>
where
    C: Api,
{
    /// Create the radio.
    ///
    /// Without an explicit [`name`](Self::name), the site and antenna are looked up from fresh
    /// `sites` and `antennas` listings to build one with [`default_radio_name`]. If either id is
    /// absent from its listing, nothing is created and a [`RuntimeError::NotFound`] is returned.
    pub async fn send(self) -> Result<Value, Error> {
        let RadioBuilder {
            client,
            target: Create { site_id },
            mut state,
        } = self;

        async {
            if state.name.is_none() {
                let name = lookup_default_name(client, &site_id, &state).await?;
                tracing::debug!(%site_id, %name, "Generated radio name");
                state.name = Some(name);
            }

            let url = client.path_to_url(format!("radio/{site_id}"))?;
            client.post_json_map(url, &state).await
        }
        .await
        .context("Failed to create radio")
    }
}

impl<C> RadioBuilder<'_, C, Update, RadioDetails>
where
    C: Api,
{
    /// Update the radio, replacing every setting with the builder's values.
    ///
    /// Without an explicit [`name`](Self::name) the radio is renamed to [`UNNAMED_RADIO`].
    pub async fn send(self) -> Result<Value, Error> {
        let RadioBuilder {
            client,
            target: Update { radio_id },
            mut state,
        } = self;

        if state.name.is_none() {
            state.name = Some(UNNAMED_RADIO.to_string());
        }

        async {
            let url = client.path_to_url(format!("radio/{radio_id}"))?;
            client.patch_json_map(url, Some(&state)).await
        }
        .await
        .context("Failed to update radio")
    }
}

async fn lookup_default_name<C>(
    client: &C,
    site_id: &Id,
    details: &RadioDetails,
) -> Result<String, Error>
where
    C: Api,
{
    let antennas = client.get_antennas(details.frequency_ghz).await?;
    let sites = client.get_sites().await?;

    let site = sites
        .iter()
        .find(|site| &site.id == site_id)
        .ok_or_else(|| RuntimeError::NotFound(format!("site {site_id}")))?;
    let antenna = antennas
        .iter()
        .find(|antenna| antenna.id == details.antenna)
        .ok_or_else(|| {
            RuntimeError::NotFound(format!(
                "antenna {} at {} GHz",
                details.antenna, details.frequency_ghz
            ))
        })?;

    if site.name.is_none() {
        return Err(RuntimeError::NotFound(format!("name of site {site_id}")).into());
    }

    default_radio_name(antenna, details.azimuth, details.frequency_ghz, site).ok_or_else(|| {
        RuntimeError::NotFound(format!("name of antenna {}", details.antenna)).into()
    })
}
