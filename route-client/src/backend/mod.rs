//! Route API gateway.
//!
//! This module wraps every call to the routing backend:
//! - deadlines (15 s reads, 30 s writes) raced against the transport,
//!   with late completions discarded;
//! - a three-kind error taxonomy (`Network` / `Http` / `Timeout`) that
//!   every failure is normalized into;
//! - in-flight bookkeeping keyed by `METHOD:endpoint`, released on every
//!   exit path;
//! - wire DTOs and per-item conversion into domain types.

mod client;
pub mod convert;
mod deadline;
mod error;
mod types;

pub use client::{RouteApiClient, RouteApiConfig};
pub use deadline::{Deadline, READ_DEADLINE, WRITE_DEADLINE};
pub use error::{ApiError, ErrorDetail};
pub use types::{
    AirQualityResponse, CoordinateDto, GeometryDto, HealthResponse, NearestStationDto,
    PollutantsDto, RouteDto, RouteRequest, RouteResponse, StationDto, StationsResponse,
};
