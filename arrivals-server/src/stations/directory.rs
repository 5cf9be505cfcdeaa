//! File-backed station directory.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::error::StationError;
use super::types::{Station, StationSummary};

/// Maps a requested station id to the stop ids that serve it.
///
/// Resolution is best effort: an empty result means "unknown", and callers
/// fall back to treating the id as a stop id itself.
pub trait StationResolver: Send + Sync {
    fn resolve_stops(&self, station_id: &str) -> Vec<String>;

    /// Display name per stop id, used to label trips by their destination.
    fn stop_names(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Station list read from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    path: PathBuf,
}

impl StationDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the full station list.
    pub fn load(&self) -> Result<Vec<Station>, StationError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StationError::Missing {
                path: self.path.clone(),
            },
            _ => StationError::Io(e),
        })?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// The public `{id, name}` view of every station.
    pub fn summaries(&self) -> Result<Vec<StationSummary>, StationError> {
        Ok(self.load()?.iter().map(StationSummary::from).collect())
    }
}

impl StationDirectory {
    /// Load for best-effort lookups: failures are logged, never returned.
    fn load_or_log(&self) -> Option<Vec<Station>> {
        match self.load() {
            Ok(stations) => Some(stations),
            Err(e @ StationError::Missing { .. }) => {
                debug!(error = %e, "No station data");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load station data");
                None
            }
        }
    }
}

impl StationResolver for StationDirectory {
    fn resolve_stops(&self, station_id: &str) -> Vec<String> {
        let Some(stations) = self.load_or_log() else {
            return Vec::new();
        };

        stations
            .iter()
            .find(|s| s.id == station_id)
            .map(Station::stop_ids)
            .unwrap_or_default()
    }

    /// A station's own id always maps to its own name. Complex members not
    /// listed as stations themselves take the name of their complex.
    fn stop_names(&self) -> HashMap<String, String> {
        let Some(stations) = self.load_or_log() else {
            return HashMap::new();
        };

        let mut names: HashMap<String, String> = stations
            .iter()
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect();
        for station in &stations {
            for stop_id in station.complex_ids.iter().flatten() {
                names
                    .entry(stop_id.clone())
                    .or_insert_with(|| station.name.clone());
            }
        }
        names
    }
}
