//! Caching layer for station snapshots.
//!
//! Station availability changes on the order of minutes, and panning
//! around the same neighbourhood re-requests nearly identical snapshots.
//! Spatial bucketing (a fixed grid of lat/lon cells) bounds cache
//! cardinality while keeping reasonable freshness; the TTL does the
//! rest. Route calculations and air quality reads are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::backend::{ApiError, RouteApiClient, RouteRequest};
use crate::domain::{AirQualitySummary, Coordinate, RoutePlan, Station};

/// Cache key for station snapshots: (lat cell, lon cell, radius in
/// tenths of a km, max results).
type SnapshotKey = (i32, i32, u32, u8);

/// Cached snapshot entry.
type SnapshotEntry = Arc<Vec<Station>>;

/// Configuration for the station cache.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    /// TTL for cached snapshots.
    pub ttl: Duration,

    /// Maximum number of cached snapshots.
    pub max_capacity: u64,

    /// Grid resolution: cells per degree of latitude/longitude.
    pub cells_per_degree: u32,
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 256,
            cells_per_degree: 100,
        }
    }
}

/// Cache for station snapshots.
pub struct StationCache {
    snapshots: MokaCache<SnapshotKey, SnapshotEntry>,
    cells_per_degree: f64,
}

impl StationCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &StationCacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            snapshots,
            cells_per_degree: f64::from(config.cells_per_degree),
        }
    }

    /// Compute the cache key for a query.
    fn key(&self, center: Coordinate, radius_km: f64, max_results: u8) -> SnapshotKey {
        let cell = |degrees: f64| (degrees * self.cells_per_degree).floor() as i32;
        (
            cell(center.lat()),
            cell(center.lon()),
            (radius_km * 10.0).round() as u32,
            max_results,
        )
    }

    /// Get a cached snapshot.
    async fn get(&self, key: &SnapshotKey) -> Option<SnapshotEntry> {
        self.snapshots.get(key).await
    }

    /// Insert a snapshot.
    async fn insert(&self, key: SnapshotKey, entry: SnapshotEntry) {
        self.snapshots.insert(key, entry).await;
    }

    /// Number of cached snapshots (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.snapshots.entry_count()
    }

    /// Invalidate all cached snapshots.
    pub fn invalidate_all(&self) {
        self.snapshots.invalidate_all();
    }
}

/// Route API client with station snapshot caching.
///
/// Wraps a `RouteApiClient`; station reads are served from the cache
/// when a snapshot for the same grid cell is fresh.
pub struct CachedRouteClient {
    client: RouteApiClient,
    cache: StationCache,
}

impl CachedRouteClient {
    /// Create a new cached client.
    pub fn new(client: RouteApiClient, cache_config: &StationCacheConfig) -> Self {
        Self {
            client,
            cache: StationCache::new(cache_config),
        }
    }

    /// Stations near a point, using the cache when fresh.
    pub async fn nearby_stations(
        &self,
        center: Coordinate,
        radius_km: f64,
        max_results: u8,
    ) -> Result<SnapshotEntry, ApiError> {
        let key = self.cache.key(center, radius_km, max_results);

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let stations = self
            .client
            .nearby_stations(center, radius_km, max_results)
            .await?;

        let entry = Arc::new(stations);
        self.cache.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Route candidates between the requested endpoints (uncached).
    pub async fn calculate_route(&self, request: &RouteRequest) -> Result<RoutePlan, ApiError> {
        self.client.calculate_route(request).await
    }

    /// Air quality at a point (uncached).
    pub async fn air_quality(&self, point: Coordinate) -> Result<AirQualitySummary, ApiError> {
        self.client.air_quality(point).await
    }

    /// Backend health probe (uncached).
    pub async fn health(&self) -> Result<crate::backend::HealthResponse, ApiError> {
        self.client.health().await
    }

    /// Whether any call is still in flight.
    pub fn has_pending_requests(&self) -> bool {
        self.client.has_pending_requests()
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &RouteApiClient {
        &self.client
    }

    /// Number of cached snapshots.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached snapshots.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::backend::RouteApiConfig;

    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn grid_cell_calculation() {
        let cache = StationCache::new(&StationCacheConfig::default());

        // 100 cells per degree: points ~11 m apart share a cell.
        let a = cache.key(coord(40.4168, -3.7038), 2.0, 10);
        let b = cache.key(coord(40.4169, -3.7039), 2.0, 10);
        assert_eq!(a, b);

        // A point one cell north differs.
        let c = cache.key(coord(40.4268, -3.7038), 2.0, 10);
        assert_ne!(a, c);

        // Same cell but different radius or result cap differs.
        assert_ne!(a, cache.key(coord(40.4168, -3.7038), 1.5, 10));
        assert_ne!(a, cache.key(coord(40.4168, -3.7038), 2.0, 5));
    }

    #[test]
    fn default_config() {
        let config = StationCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 256);
        assert_eq!(config.cells_per_degree, 100);
    }

    fn stations_body() -> serde_json::Value {
        json!({"stations": [{
            "id": 1,
            "name": "Sol",
            "latitude": 40.4168,
            "longitude": -3.7038,
            "dock_bikes": 3,
            "free_bases": 9,
            "total_bases": 12
        }]})
    }

    async fn cached_client(server: &MockServer) -> CachedRouteClient {
        let config = RouteApiConfig::new().with_base_url(server.uri());
        let client = RouteApiClient::new(config).unwrap();
        CachedRouteClient::new(client, &StationCacheConfig::default())
    }

    #[tokio::test]
    async fn second_fetch_in_same_cell_hits_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = cached_client(&server).await;
        let first = client
            .nearby_stations(coord(40.4168, -3.7038), 2.0, 10)
            .await
            .unwrap();
        let second = client
            .nearby_stations(coord(40.4169, -3.7039), 2.0, 10)
            .await
            .unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn different_cells_fetch_separately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(stations_body()))
            .expect(2)
            .mount(&server)
            .await;

        let client = cached_client(&server).await;
        client
            .nearby_stations(coord(40.4168, -3.7038), 2.0, 10)
            .await
            .unwrap();
        client
            .nearby_stations(coord(40.4468, -3.7038), 2.0, 10)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stations"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = cached_client(&server).await;
        let center = coord(40.4168, -3.7038);
        assert!(client.nearby_stations(center, 2.0, 10).await.is_err());
        assert!(client.nearby_stations(center, 2.0, 10).await.is_err());
        assert_eq!(client.cache_entry_count(), 0);
    }
}
