//! Routing preference selected by the rider.

use serde::Serialize;

/// Which criterion the backend should optimize route ordering for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    /// Minimize pollutant exposure
    AirQuality,
    /// Minimize total distance
    Distance,
    /// Minimize riding time
    Time,
    /// Blend of all three criteria
    #[default]
    Balanced,
}

impl RoutePreference {
    /// The backend's wire label for this preference.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePreference::AirQuality => "air_quality",
            RoutePreference::Distance => "distance",
            RoutePreference::Time => "time",
            RoutePreference::Balanced => "balanced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_labels() {
        for pref in [
            RoutePreference::AirQuality,
            RoutePreference::Distance,
            RoutePreference::Time,
            RoutePreference::Balanced,
        ] {
            let json = serde_json::to_string(&pref).unwrap();
            assert_eq!(json, format!("\"{}\"", pref.as_str()));
        }
    }

    #[test]
    fn default_is_balanced() {
        assert_eq!(RoutePreference::default(), RoutePreference::Balanced);
    }
}
