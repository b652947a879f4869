//! The UI consumer boundary.
//!
//! Everything the orchestrator tells the user goes through `UserView`:
//! selection echoes (so a coordinate form and the canvas pins never
//! disagree mid-transition), notices, errors, the results list, and air
//! quality reports. The DOM side of this boundary is out of scope; the
//! crate ships a log-backed implementation for headless embeddings.

use tracing::{error, info};

use crate::domain::{AirQualitySummary, Coordinate, RoutePlan};

/// Consumer of user-facing output and selection echoes.
pub trait UserView {
    /// The selection changed; both endpoints are reported together.
    fn selection_changed(&mut self, origin: Option<Coordinate>, destination: Option<Coordinate>);

    /// A non-blocking informational notice.
    fn show_info(&mut self, message: &str);

    /// An error notice, optionally with detail.
    fn show_error(&mut self, message: &str, detail: Option<&str>);

    /// A fresh set of route results to list.
    fn show_results(&mut self, plan: &RoutePlan);

    /// An air quality report for a probed point.
    fn show_air_quality(&mut self, summary: &AirQualitySummary);
}

/// View that writes everything to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogView;

impl UserView for LogView {
    fn selection_changed(&mut self, origin: Option<Coordinate>, destination: Option<Coordinate>) {
        info!(?origin, ?destination, "selection changed");
    }

    fn show_info(&mut self, message: &str) {
        info!("{message}");
    }

    fn show_error(&mut self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => error!(detail, "{message}"),
            None => error!("{message}"),
        }
    }

    fn show_results(&mut self, plan: &RoutePlan) {
        for candidate in &plan.candidates {
            info!(
                kind = candidate.kind.as_str(),
                distance_km = candidate.distance_km,
                duration_min = candidate.duration_min,
                emission_score = candidate.emission_score,
                recommended = candidate.is_recommended,
                "route candidate"
            );
        }
    }

    fn show_air_quality(&mut self, summary: &AirQualitySummary) {
        info!(
            level = summary.level.label(),
            score = summary.score,
            no2 = summary.pollutants.no2,
            pm10 = summary.pollutants.pm10,
            pm2_5 = summary.pollutants.pm2_5,
            location = %summary.location,
            "air quality"
        );
    }
}
