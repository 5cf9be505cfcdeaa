//! Server configuration from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Upper bound for every timeout and TTL setting, in seconds.
const MAX_TIMEOUT_SECS: u64 = 60 * 60;

/// Upper bound for the grace window, in minutes.
const MAX_GRACE_MINS: i64 = 60;

use crate::arrivals::{ArrivalConfig, MinuteRounding};
use crate::cache::{CacheConfig, CachedFeedClient};
use crate::feed::{FeedBackend, FeedClient, FeedClientConfig, FeedError, MockFeedClient};

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Optional feed API key (`MTA_API_KEY`).
    pub api_key: String,

    /// Station reference dataset.
    pub stations_path: PathBuf,

    /// Static front-end assets.
    pub static_dir: String,

    /// Serve mock feeds from this directory instead of the live ones.
    pub mock_feeds_dir: Option<PathBuf>,

    /// Snapshot cache TTL; zero disables the cache.
    pub cache_ttl: Duration,

    /// Arrival pipeline tuning.
    pub arrivals: ArrivalConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            api_key: String::new(),
            stations_path: PathBuf::from("stations.json"),
            static_dir: "static".to_string(),
            mock_feeds_dir: None,
            cache_ttl: Duration::ZERO,
            arrivals: ArrivalConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let arrival_defaults = &defaults.arrivals;

        let feed_timeout = parse_in_range(
            &lookup,
            "FEED_TIMEOUT_SECS",
            arrival_defaults.fetch_timeout.as_secs(),
            1..=MAX_TIMEOUT_SECS,
        );
        let request_deadline = parse_in_range(
            &lookup,
            "REQUEST_DEADLINE_SECS",
            arrival_defaults.request_deadline.as_secs(),
            1..=MAX_TIMEOUT_SECS,
        );

        let arrivals = ArrivalConfig::default()
            .with_horizon(parse_or(
                &lookup,
                "ARRIVAL_HORIZON_MINS",
                arrival_defaults.horizon_mins,
            ))
            .with_grace(parse_in_range(
                &lookup,
                "ARRIVAL_GRACE_MINS",
                arrival_defaults.grace_mins,
                0..=MAX_GRACE_MINS,
            ))
            .with_rounding(parse_or::<MinuteRounding>(
                &lookup,
                "MINUTE_ROUNDING",
                arrival_defaults.rounding,
            ))
            .with_fetch_timeout(Duration::from_secs(feed_timeout))
            .with_request_deadline(Duration::from_secs(request_deadline));

        Self {
            addr: parse_or(&lookup, "ARRIVALS_ADDR", defaults.addr),
            api_key: lookup("MTA_API_KEY").unwrap_or_default(),
            stations_path: lookup("STATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.stations_path),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            mock_feeds_dir: lookup("MOCK_FEEDS_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            cache_ttl: Duration::from_secs(parse_in_range(
                &lookup,
                "FEED_CACHE_TTL_SECS",
                0,
                0..=MAX_TIMEOUT_SECS,
            )),
            arrivals,
        }
    }

    /// Build the feed backend this configuration asks for.
    pub fn feed_backend(&self) -> Result<FeedBackend, FeedError> {
        if let Some(dir) = &self.mock_feeds_dir {
            return Ok(FeedBackend::Mock(MockFeedClient::new(dir)?));
        }

        let client_config = FeedClientConfig::new(&self.api_key)
            .with_timeout(self.arrivals.effective_fetch_timeout().as_secs().max(1));
        let client = FeedClient::new(client_config)?;

        let cache_config = CacheConfig::with_ttl(self.cache_ttl);
        if cache_config.is_disabled() {
            Ok(FeedBackend::Live(client))
        } else {
            Ok(FeedBackend::Cached(CachedFeedClient::new(client, &cache_config)))
        }
    }
}

/// Parse `key` with `FromStr`, warning and using `default` on bad input.
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid setting");
            default
        }
    }
}

/// Like [`parse_or`], but also rejects values outside `range`.
fn parse_in_range<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    range: RangeInclusive<T>,
) -> T
where
    T: FromStr + PartialOrd + Display + Copy,
    T::Err: Display,
{
    let value = parse_or(lookup, key, default);
    if range.contains(&value) {
        value
    } else {
        warn!(
            key,
            %value,
            min = %range.start(),
            max = %range.end(),
            "Ignoring out-of-range setting"
        );
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 5000)));
        assert!(config.api_key.is_empty());
        assert_eq!(config.stations_path, PathBuf::from("stations.json"));
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.mock_feeds_dir, None);
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.arrivals.horizon_mins, 30);
        assert_eq!(config.arrivals.grace_mins, 1);
        assert_eq!(config.arrivals.rounding, MinuteRounding::Round);
    }

    #[test]
    fn reads_every_setting() {
        let config = config_from(&[
            ("ARRIVALS_ADDR", "0.0.0.0:8080"),
            ("MTA_API_KEY", "secret"),
            ("STATIONS_PATH", "/data/stations.json"),
            ("STATIC_DIR", "/srv/static"),
            ("MOCK_FEEDS_DIR", "/data/mock"),
            ("FEED_CACHE_TTL_SECS", "20"),
            ("FEED_TIMEOUT_SECS", "4"),
            ("REQUEST_DEADLINE_SECS", "6"),
            ("ARRIVAL_HORIZON_MINS", "45"),
            ("ARRIVAL_GRACE_MINS", "0"),
            ("MINUTE_ROUNDING", "truncate"),
        ]);

        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.stations_path, PathBuf::from("/data/stations.json"));
        assert_eq!(config.static_dir, "/srv/static");
        assert_eq!(config.mock_feeds_dir, Some(PathBuf::from("/data/mock")));
        assert_eq!(config.cache_ttl, Duration::from_secs(20));
        assert_eq!(config.arrivals.fetch_timeout, Duration::from_secs(4));
        assert_eq!(config.arrivals.request_deadline, Duration::from_secs(6));
        assert_eq!(config.arrivals.horizon_mins, 45);
        assert_eq!(config.arrivals.grace_mins, 0);
        assert_eq!(config.arrivals.rounding, MinuteRounding::Truncate);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("ARRIVALS_ADDR", "not-an-addr"),
            ("ARRIVAL_HORIZON_MINS", "-5"),
            ("MINUTE_ROUNDING", "floor"),
        ]);

        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 5000)));
        assert_eq!(config.arrivals.horizon_mins, 30);
        assert_eq!(config.arrivals.rounding, MinuteRounding::Round);
    }

    #[test]
    fn oversized_timeouts_fall_back() {
        let config = config_from(&[
            ("FEED_TIMEOUT_SECS", "18446744073709551615"),
            ("REQUEST_DEADLINE_SECS", "9999999999"),
            ("FEED_CACHE_TTL_SECS", "9999999999"),
        ]);

        assert_eq!(config.arrivals.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.arrivals.request_deadline, Duration::from_secs(15));
        assert_eq!(config.cache_ttl, Duration::ZERO);
    }

    #[test]
    fn zero_timeout_falls_back() {
        let config = config_from(&[("FEED_TIMEOUT_SECS", "0")]);
        assert_eq!(config.arrivals.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn negative_or_huge_grace_falls_back() {
        for grace in ["-9223372036854775808", "-1", "100000"] {
            let config = config_from(&[("ARRIVAL_GRACE_MINS", grace)]);
            assert_eq!(config.arrivals.grace_mins, 1, "grace {grace}");
        }

        let config = config_from(&[("ARRIVAL_GRACE_MINS", "5")]);
        assert_eq!(config.arrivals.grace_mins, 5);
    }

    #[test]
    fn backend_selection() {
        let live = config_from(&[]).feed_backend().unwrap();
        assert_eq!(live.describe(), "live");

        let cached = config_from(&[("FEED_CACHE_TTL_SECS", "15")])
            .feed_backend()
            .unwrap();
        assert_eq!(cached.describe(), "live (cached)");

        let missing_mock = config_from(&[("MOCK_FEEDS_DIR", "/nonexistent/mock")]).feed_backend();
        assert!(matches!(missing_mock, Err(FeedError::MockData(_))));
    }
}
