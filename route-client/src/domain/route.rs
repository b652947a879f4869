//! Route candidate types.
//!
//! A `RouteCandidate` is one proposed route between the selected origin
//! and destination, scored by the backend on distance, time, and
//! pollutant exposure. A `RoutePlan` is the converted response of one
//! route calculation: the full candidate list plus the backend's
//! recommendation label.

use super::Coordinate;

/// The optimization profile a candidate was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Fastest,
    Shortest,
    Eco,
    Balanced,
}

impl RouteKind {
    /// Parses the backend's type label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "fastest" => Some(RouteKind::Fastest),
            "shortest" => Some(RouteKind::Shortest),
            "eco" => Some(RouteKind::Eco),
            "balanced" => Some(RouteKind::Balanced),
            _ => None,
        }
    }

    /// The backend's wire label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Fastest => "fastest",
            RouteKind::Shortest => "shortest",
            RouteKind::Eco => "eco",
            RouteKind::Balanced => "balanced",
        }
    }

    /// Human-readable label for notices and the results list.
    pub fn label(&self) -> &'static str {
        match self {
            RouteKind::Fastest => "Fast route",
            RouteKind::Shortest => "Short route",
            RouteKind::Eco => "Eco route",
            RouteKind::Balanced => "Balanced route",
        }
    }
}

/// Coarse quality bucket driving route styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationTier {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl RecommendationTier {
    /// Parses the backend's recommendation label.
    ///
    /// Unrecognized labels yield `None`; callers fall back to default
    /// styling for those.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "excellent" => Some(RecommendationTier::Excellent),
            "good" => Some(RecommendationTier::Good),
            "moderate" => Some(RecommendationTier::Moderate),
            "poor" => Some(RecommendationTier::Poor),
            _ => None,
        }
    }
}

/// Average pollutant concentrations along a route, in µg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pollutants {
    pub no2: f64,
    pub pm10: f64,
    pub pm2_5: f64,
}

/// One proposed route between origin and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Optimization profile
    pub kind: RouteKind,
    /// Path coordinates in travel order; empty when the backend sent no
    /// usable geometry (such candidates are skipped at render time)
    pub geometry: Vec<Coordinate>,
    /// Average pollutant exposure along the path
    pub pollutants: Pollutants,
    /// Total length in kilometres
    pub distance_km: f64,
    /// Estimated riding time in minutes
    pub duration_min: f64,
    /// Emission exposure score, 0 (cleanest) to 100
    pub emission_score: u8,
    /// Quality tier, `None` when the backend label was unrecognized
    pub recommendation: Option<RecommendationTier>,
    /// Whether the backend flagged this candidate as the one to take
    pub is_recommended: bool,
    /// Free-text health guidance for the exposure level
    pub health_impact: String,
}

/// The converted result of one route calculation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePlan {
    /// Candidates in backend order
    pub candidates: Vec<RouteCandidate>,
    /// The backend's recommended route type, if it sent a known label
    pub recommended: Option<RouteKind>,
}

impl RoutePlan {
    /// Returns true if the plan contains no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
