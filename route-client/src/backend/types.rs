//! Wire types for the route API.
//!
//! These mirror the backend's JSON shapes exactly; conversion to domain
//! types (with per-item validation) happens in `convert`.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RoutePreference};

/// Response from `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// True when the backend reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// A `{lat, lon}` pair on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for CoordinateDto {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lon: c.lon(),
        }
    }
}

/// Request body for `POST /calculate-route`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRequest {
    pub origin: CoordinateDto,
    pub destination: CoordinateDto,
    pub preference: RoutePreference,
}

impl RouteRequest {
    /// Builds a request from domain values.
    pub fn new(origin: Coordinate, destination: Coordinate, preference: RoutePreference) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            preference,
        }
    }
}

/// Response from `GET /stations`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub stations: Vec<StationDto>,
}

/// One station in a `/stations` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub dock_bikes: u32,
    #[serde(default)]
    pub free_bases: u32,
    #[serde(default)]
    pub total_bases: u32,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Response from `POST /calculate-route`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
    #[serde(default)]
    pub recommended_route: Option<String>,
}

/// One candidate in a `/calculate-route` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    #[serde(rename = "type")]
    pub route_type: String,
    #[serde(default)]
    pub geometry: Option<GeometryDto>,
    #[serde(default)]
    pub pollutants: PollutantsDto,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub duration_min: f64,
    #[serde(default)]
    pub emission_score: f64,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default)]
    pub health_impact: String,
}

/// GeoJSON LineString geometry. Pairs are `[lon, lat]` on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct GeometryDto {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

/// Pollutant concentrations on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PollutantsDto {
    #[serde(rename = "NO2", default)]
    pub no2: f64,
    #[serde(rename = "PM10", default)]
    pub pm10: f64,
    #[serde(rename = "PM2.5", default)]
    pub pm2_5: f64,
}

/// Response from `GET /air-quality`.
#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityResponse {
    pub level: String,
    #[serde(default)]
    pub pollutants: PollutantsDto,
    #[serde(default)]
    pub score: f64,
    pub location: CoordinateDto,
    #[serde(default)]
    pub nearest_stations: Option<Vec<NearestStationDto>>,
}

/// A monitoring station reference in an air quality response.
#[derive(Debug, Clone, Deserialize)]
pub struct NearestStationDto {
    pub name: String,
}
