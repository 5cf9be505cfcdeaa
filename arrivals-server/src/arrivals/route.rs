//! Route and direction normalization for display.

/// Lines in service order, as they appear on station signage.
pub const ROUTE_ORDER: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "A", "B", "C", "D", "E", "F", "G", "J", "Z", "L", "M", "N",
    "Q", "R", "W", "S", "SIR", "H", "FS",
];

/// Rank given to routes missing from [`ROUTE_ORDER`]; sorts after all of them.
pub const UNKNOWN_ROUTE_RANK: usize = usize::MAX;

const INBOUND_KEYWORDS: &[&str] = &["uptown", "north", "manhattan", "inwood", "harlem"];
const OUTBOUND_KEYWORDS: &[&str] = &["downtown", "south", "brooklyn", "queens", "coney"];

/// Fold an upstream route id to the route riders see.
///
/// Express variants are marked with a trailing `X` (`6X`, `7X`, `FX`) and run
/// on the same line as their local, so they collapse into it. A bare `X` is
/// left alone.
///
/// ```
/// use arrivals_server::arrivals::normalize_route;
///
/// assert_eq!(normalize_route("6X"), "6");
/// assert_eq!(normalize_route("6"), "6");
/// assert_eq!(normalize_route("SIR"), "SIR");
/// ```
pub fn normalize_route(route_id: &str) -> &str {
    route_id
        .strip_suffix('X')
        .filter(|base| !base.is_empty())
        .unwrap_or(route_id)
}

/// Position of `route` in [`ROUTE_ORDER`], or [`UNKNOWN_ROUTE_RANK`].
pub fn route_rank(route: &str) -> usize {
    ROUTE_ORDER
        .iter()
        .position(|r| *r == route)
        .unwrap_or(UNKNOWN_ROUTE_RANK)
}

/// Which way a direction label points, for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectionGroup {
    /// Uptown / northbound / Manhattan-bound.
    Inbound,
    /// Downtown / southbound / Brooklyn- or Queens-bound.
    Outbound,
    Other,
}

/// Classify a direction label by keyword, case-insensitively.
///
/// Inbound keywords win when a label mentions both.
pub fn direction_group(label: &str) -> DirectionGroup {
    let label = label.to_lowercase();
    if INBOUND_KEYWORDS.iter().any(|k| label.contains(k)) {
        DirectionGroup::Inbound
    } else if OUTBOUND_KEYWORDS.iter().any(|k| label.contains(k)) {
        DirectionGroup::Outbound
    } else {
        DirectionGroup::Other
    }
}

/// The two directional stop records behind every station id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
}

impl Heading {
    pub const ALL: [Heading; 2] = [Heading::North, Heading::South];

    /// Suffix appended to a station id to get the directional stop id.
    pub fn suffix(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::South => 'S',
        }
    }

    /// Directional stop id for `stop_id`, e.g. `127` → `127N`.
    pub fn stop_id(self, stop_id: &str) -> String {
        format!("{stop_id}{}", self.suffix())
    }

    /// Label used when a trip has no headsign.
    pub fn fallback_label(self) -> &'static str {
        match self {
            Heading::North => "Northbound",
            Heading::South => "Southbound",
        }
    }
}

/// The direction shown to riders: the headsign when there is one.
pub fn direction_label(headsign: Option<&str>, heading: Heading) -> String {
    headsign
        .filter(|h| !h.trim().is_empty())
        .unwrap_or(heading.fallback_label())
        .to_string()
}
