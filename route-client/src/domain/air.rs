//! Air quality report types.

use super::{Coordinate, Pollutants};

/// Coarse air quality level reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirLevel {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    /// Backend sent a label this client does not know
    Unknown,
}

impl AirLevel {
    /// Parses the backend's level label, mapping unrecognized labels to
    /// `Unknown` rather than failing the report.
    pub fn parse(label: &str) -> Self {
        match label {
            "good" => AirLevel::Good,
            "moderate" => AirLevel::Moderate,
            "unhealthy_sensitive" => AirLevel::UnhealthySensitive,
            "unhealthy" => AirLevel::Unhealthy,
            _ => AirLevel::Unknown,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            AirLevel::Good => "Good",
            AirLevel::Moderate => "Moderate",
            AirLevel::UnhealthySensitive => "Unhealthy for sensitive groups",
            AirLevel::Unhealthy => "Unhealthy",
            AirLevel::Unknown => "Unknown",
        }
    }
}

/// Air quality at a point, interpolated by the backend from nearby
/// monitoring stations.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualitySummary {
    /// Coarse quality level
    pub level: AirLevel,
    /// Pollutant concentrations in µg/m³
    pub pollutants: Pollutants,
    /// Quality score, 0 to 100
    pub score: f64,
    /// The point the report applies to
    pub location: Coordinate,
    /// Names of the monitoring stations the reading was derived from
    pub nearest_stations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parse() {
        assert_eq!(AirLevel::parse("good"), AirLevel::Good);
        assert_eq!(
            AirLevel::parse("unhealthy_sensitive"),
            AirLevel::UnhealthySensitive
        );
        assert_eq!(AirLevel::parse("apocalyptic"), AirLevel::Unknown);
    }

    #[test]
    fn level_labels() {
        assert_eq!(AirLevel::Good.label(), "Good");
        assert_eq!(
            AirLevel::UnhealthySensitive.label(),
            "Unhealthy for sensitive groups"
        );
    }
}
