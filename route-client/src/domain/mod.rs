//! Domain types for the route planner client.
//!
//! This module contains the core domain model: validated coordinates,
//! station and route candidate types, the rider's selection state
//! machine, and air quality reports. Types enforce their invariants at
//! construction time, so code that receives them can trust their
//! validity.

mod air;
mod coordinate;
mod error;
mod preference;
mod route;
mod selection;
mod station;

pub use air::{AirLevel, AirQualitySummary};
pub use coordinate::Coordinate;
pub use error::DomainError;
pub use preference::RoutePreference;
pub use route::{Pollutants, RecommendationTier, RouteCandidate, RouteKind, RoutePlan};
pub use selection::{PickOutcome, Selection, SelectionPhase};
pub use station::Station;
