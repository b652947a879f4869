//! Conversion from wire types to domain types.
//!
//! Batches are converted item by item: a malformed entry (unusable
//! coordinates, unrecognized route type) is skipped with a warning and
//! the rest of the batch survives. Route geometry arrives as GeoJSON
//! `[lon, lat]` pairs and is swapped into `Coordinate` order here.

use tracing::warn;

use crate::domain::{
    AirLevel, AirQualitySummary, Coordinate, DomainError, Pollutants, RecommendationTier,
    RouteCandidate, RouteKind, RoutePlan, Station,
};

use super::types::{
    AirQualityResponse, GeometryDto, PollutantsDto, RouteDto, RouteResponse, StationsResponse,
};

impl From<PollutantsDto> for Pollutants {
    fn from(dto: PollutantsDto) -> Self {
        Pollutants {
            no2: dto.no2,
            pm10: dto.pm10,
            pm2_5: dto.pm2_5,
        }
    }
}

/// Converts a stations snapshot, dropping entries whose coordinates are
/// unusable.
pub fn stations(response: StationsResponse) -> Vec<Station> {
    response
        .stations
        .into_iter()
        .filter_map(|dto| match Coordinate::new(dto.latitude, dto.longitude) {
            Ok(location) => Some(Station {
                id: dto.id,
                name: dto.name,
                location,
                dock_bikes: dto.dock_bikes,
                free_bases: dto.free_bases,
                total_bases: dto.total_bases,
                distance_km: dto.distance_km,
            }),
            Err(e) => {
                warn!(station = dto.id, error = %e, "skipping station with malformed location");
                None
            }
        })
        .collect()
}

/// Converts a route calculation response.
pub fn route_plan(response: RouteResponse) -> RoutePlan {
    let candidates = response
        .routes
        .into_iter()
        .filter_map(candidate)
        .collect();

    let recommended = response
        .recommended_route
        .as_deref()
        .and_then(RouteKind::parse);

    RoutePlan {
        candidates,
        recommended,
    }
}

fn candidate(dto: RouteDto) -> Option<RouteCandidate> {
    let Some(kind) = RouteKind::parse(&dto.route_type) else {
        warn!(route_type = %dto.route_type, "skipping route with unrecognized type");
        return None;
    };

    Some(RouteCandidate {
        kind,
        geometry: dto.geometry.map(path_points).unwrap_or_default(),
        pollutants: dto.pollutants.into(),
        distance_km: dto.distance_km,
        duration_min: dto.duration_min,
        emission_score: dto.emission_score.round().clamp(0.0, 100.0) as u8,
        recommendation: RecommendationTier::parse(&dto.recommendation),
        is_recommended: dto.is_recommended,
        health_impact: dto.health_impact,
    })
}

/// Swaps GeoJSON `[lon, lat]` pairs into coordinates, dropping
/// non-finite points.
fn path_points(geometry: GeometryDto) -> Vec<Coordinate> {
    geometry
        .coordinates
        .into_iter()
        .filter_map(|[lon, lat]| match Coordinate::new(lat, lon) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(error = %e, "skipping malformed geometry point");
                None
            }
        })
        .collect()
}

/// Converts an air quality response.
pub fn air_quality(response: AirQualityResponse) -> Result<AirQualitySummary, DomainError> {
    let location = Coordinate::new(response.location.lat, response.location.lon)
        .map_err(|_| DomainError::InvalidAirQualityLocation)?;

    Ok(AirQualitySummary {
        level: AirLevel::parse(&response.level),
        pollutants: response.pollutants.into(),
        score: response.score,
        location,
        nearest_stations: response
            .nearest_stations
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.name)
            .collect(),
    })
}
