//! Arrival pipeline error types.

/// Errors that reach the caller of the aggregator.
///
/// Upstream feed failures are deliberately absent: they are absorbed into
/// [`super::FeedReport`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrivalError {
    /// Missing or malformed request input
    #[error("{0}")]
    InvalidInput(String),
}
