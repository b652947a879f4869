//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate with a non-finite latitude or longitude
    #[error("coordinate is not finite: lat={lat}, lon={lon}")]
    NonFiniteCoordinate { lat: f64, lon: f64 },

    /// Air quality payload without a usable location
    #[error("air quality report has no valid location")]
    InvalidAirQualityLocation,
}
