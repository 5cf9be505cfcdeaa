//! Upstream feed endpoints.

/// Base URL shared by every subway division feed.
const MTA_FEED_BASE: &str = "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds/nyct%2F";

/// One upstream feed covering a subset of lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedEndpoint {
    /// Short identifier, the comma-separated lines the feed carries.
    pub id: String,

    /// Full URL of the GTFS-realtime protobuf feed.
    pub url: String,
}

impl FeedEndpoint {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// The nine subway division feeds, one per physical division.
pub fn default_endpoints() -> Vec<FeedEndpoint> {
    [
        ("1,2,3,4,5,6,S", "gtfs"),
        ("A,C,E,H,FS", "gtfs-ace"),
        ("N,Q,R,W", "gtfs-nqrw"),
        ("B,D,F,M", "gtfs-bdfm"),
        ("L", "gtfs-l"),
        ("G", "gtfs-g"),
        ("J,Z", "gtfs-jz"),
        ("7", "gtfs-7"),
        ("SIR", "gtfs-si"),
    ]
    .into_iter()
    .map(|(id, path)| FeedEndpoint::new(id, format!("{MTA_FEED_BASE}{path}")))
    .collect()
}
