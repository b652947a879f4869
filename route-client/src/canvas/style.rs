//! Route path styling.

use crate::domain::{RecommendationTier, RouteCandidate};

/// Route colors by recommendation tier.
const EXCELLENT_COLOR: &str = "#10b981";
const GOOD_COLOR: &str = "#84cc16";
const MODERATE_COLOR: &str = "#f59e0b";
const POOR_COLOR: &str = "#ef4444";
const DEFAULT_COLOR: &str = "#2563eb";

/// Color for a tier, falling back to the default for unrecognized tiers.
pub fn tier_color(tier: Option<RecommendationTier>) -> &'static str {
    match tier {
        Some(RecommendationTier::Excellent) => EXCELLENT_COLOR,
        Some(RecommendationTier::Good) => GOOD_COLOR,
        Some(RecommendationTier::Moderate) => MODERATE_COLOR,
        Some(RecommendationTier::Poor) => POOR_COLOR,
        None => DEFAULT_COLOR,
    }
}

/// Visual style of a rendered path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    /// CSS hex color
    pub color: &'static str,
    /// Stroke weight in pixels
    pub weight: u32,
    /// Stroke opacity, 0.0–1.0
    pub opacity: f64,
}

impl PathStyle {
    /// Base style for a candidate: tier color, with the recommended
    /// candidate drawn heavier and fully opaque.
    pub fn for_candidate(candidate: &RouteCandidate) -> Self {
        Self {
            color: tier_color(candidate.recommendation),
            weight: if candidate.is_recommended { 6 } else { 4 },
            opacity: if candidate.is_recommended { 1.0 } else { 0.6 },
        }
    }

    /// Style while the pointer is over the path.
    pub fn hovered(self) -> Self {
        Self {
            color: self.color,
            weight: self.weight + 2,
            opacity: 1.0,
        }
    }
}
