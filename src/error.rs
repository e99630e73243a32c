//! Error types for gridpost operations.

use thiserror::Error;

/// Errors returned by gridpost operations.
///
/// "No containing district" is deliberately not represented here: it is an
/// expected outcome of a containment query and surfaces as `Option::None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridpostError {
    /// Malformed or empty boundary input at index-build time.
    #[error("invalid boundary data: {0}")]
    InvalidBoundaryData(String),

    /// Coordinate outside the configured regional bounding rectangle.
    #[error("coordinate ({latitude}, {longitude}) is outside the configured bounds")]
    OutOfBounds { latitude: f64, longitude: f64 },

    /// Malformed digital address string. Always carries the offending input.
    #[error("malformed digital address {address:?}: {reason}")]
    InvalidFormat { address: String, reason: String },

    /// Invalid input to a compose/encode operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The boundary data collaborator failed to supply a collection.
    #[error("boundary fetch failed: {0}")]
    FetchFailed(String),

    /// Timed out waiting for an in-flight index build.
    #[error("timed out waiting for the boundary index build")]
    BuildTimeout,
}

/// Result type alias for gridpost operations.
pub type Result<T> = std::result::Result<T, GridpostError>;
