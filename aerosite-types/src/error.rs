//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AerositeTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),

    /// Coordinates are out of range or could not be parsed.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Polygon ring does not end with its first position.
    #[error("polygon ring is not closed")]
    OpenRing,

    /// Geometry has fewer positions than its type requires.
    #[error("expected at least {expected} positions, got {actual}")]
    TooFewPositions {
        /// Minimum number of positions.
        expected: usize,
        /// Number of positions found.
        actual: usize,
    },
}
