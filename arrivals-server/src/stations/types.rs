//! Station records.

use serde::{Deserialize, Serialize};

/// A rider-facing station from the reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Station id without direction suffix, e.g. `127`.
    pub id: String,

    /// Display name, e.g. `Times Sq-42 St`.
    pub name: String,

    /// Underlying platform ids when this station is a complex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_ids: Option<Vec<String>>,
}

impl Station {
    /// The stop ids to query for this station, in dataset order.
    ///
    /// A station without complex ids (or with an empty list) is its own
    /// sole stop.
    pub fn stop_ids(&self) -> Vec<String> {
        match &self.complex_ids {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ => vec![self.id.clone()],
        }
    }
}

/// Public view of a station; complex membership is an internal detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSummary {
    pub id: String,
    pub name: String,
}

impl From<&Station> for StationSummary {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
        }
    }
}
