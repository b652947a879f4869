//! Route API HTTP client.
//!
//! Normalizes every outbound call to the routing backend: attaches a
//! deadline (15 s for reads, 30 s for writes), maps every failure into
//! the three-kind error taxonomy, and tracks in-flight calls so callers
//! can observe pending work. The in-flight entry is released by an RAII
//! guard, so it is removed on every exit path, including timeouts and
//! the caller dropping the call mid-flight.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{AirQualitySummary, Coordinate, RoutePlan, Station};

use super::convert;
use super::deadline::{Deadline, READ_DEADLINE, WRITE_DEADLINE};
use super::error::{ApiError, ErrorDetail};
use super::types::{AirQualityResponse, HealthResponse, RouteRequest, RouteResponse, StationsResponse};

/// Default base URL for the route API (local backend emulator).
const DEFAULT_BASE_URL: &str = "http://localhost:7071/api";

/// Configuration for the route API client.
#[derive(Debug, Clone)]
pub struct RouteApiConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Deadline for GET calls
    pub read_deadline: Deadline,
    /// Deadline for POST calls
    pub write_deadline: Deadline,
}

impl RouteApiConfig {
    /// Create a config pointing at the default base URL.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            read_deadline: READ_DEADLINE,
            write_deadline: WRITE_DEADLINE,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the read deadline.
    pub fn with_read_deadline(mut self, deadline: Deadline) -> Self {
        self.read_deadline = deadline;
        self
    }

    /// Set the write deadline.
    pub fn with_write_deadline(mut self, deadline: Deadline) -> Self {
        self.write_deadline = deadline;
        self
    }
}

impl Default for RouteApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight call registry keyed by `METHOD:endpoint`.
///
/// Entries are duplicates-allowed: two overlapping calls to the same
/// endpoint register two entries, and each guard removes exactly one.
#[derive(Debug, Clone, Default)]
struct InFlightRegistry {
    entries: Arc<Mutex<Vec<String>>>,
}

impl InFlightRegistry {
    fn track(&self, method: &str, endpoint: &str) -> InFlightGuard {
        let key = format!("{method}:{endpoint}");
        lock_entries(&self.entries).push(key.clone());
        InFlightGuard {
            entries: Arc::clone(&self.entries),
            key,
        }
    }

    fn is_empty(&self) -> bool {
        lock_entries(&self.entries).is_empty()
    }

    fn keys(&self) -> Vec<String> {
        lock_entries(&self.entries).clone()
    }
}

fn lock_entries(entries: &Mutex<Vec<String>>) -> std::sync::MutexGuard<'_, Vec<String>> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}

struct InFlightGuard {
    entries: Arc<Mutex<Vec<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut entries = lock_entries(&self.entries);
        if let Some(pos) = entries.iter().position(|k| k == &self.key) {
            entries.remove(pos);
        }
    }
}

/// Route API client.
///
/// Provides generic `get`/`post` plus typed methods for each backend
/// endpoint, returning converted domain types.
#[derive(Debug, Clone)]
pub struct RouteApiClient {
    http: reqwest::Client,
    base_url: String,
    read_deadline: Deadline,
    write_deadline: Deadline,
    in_flight: InFlightRegistry,
}

impl RouteApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RouteApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            read_deadline: config.read_deadline,
            write_deadline: config.write_deadline,
            in_flight: InFlightRegistry::default(),
        })
    }

    /// GET a JSON resource under the read deadline.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let _guard = self.in_flight.track("GET", endpoint);
        let request = self
            .http
            .get(format!("{}{}", self.base_url, endpoint))
            .query(query);
        self.read_deadline.race(Self::execute(request)).await
    }

    /// POST a JSON body under the write deadline.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let _guard = self.in_flight.track("POST", endpoint);
        let request = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .json(body);
        self.write_deadline.race(Self::execute(request)).await
    }

    async fn execute<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let phrase = status.canonical_reason().unwrap_or("unknown status");
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str(&body)
                .unwrap_or_else(|_| ErrorDetail::from_phrase(phrase));
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Network {
            message: format!("invalid response body: {e}"),
        })
    }

    /// Whether any call is still in flight.
    pub fn has_pending_requests(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Keys of all in-flight calls (for introspection and tests).
    pub fn pending_requests(&self) -> Vec<String> {
        self.in_flight.keys()
    }

    /// Backend health probe.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get("/health", &[]).await
    }

    /// Stations near a point, converted with malformed entries skipped.
    pub async fn nearby_stations(
        &self,
        center: Coordinate,
        radius_km: f64,
        max_results: u8,
    ) -> Result<Vec<Station>, ApiError> {
        let response: StationsResponse = self
            .get(
                "/stations",
                &[
                    ("lat", center.lat().to_string()),
                    ("lon", center.lon().to_string()),
                    ("radius", radius_km.to_string()),
                    ("max_results", max_results.to_string()),
                ],
            )
            .await?;
        Ok(convert::stations(response))
    }

    /// Air quality at a point.
    pub async fn air_quality(&self, point: Coordinate) -> Result<AirQualitySummary, ApiError> {
        let response: AirQualityResponse = self
            .get(
                "/air-quality",
                &[
                    ("lat", point.lat().to_string()),
                    ("lon", point.lon().to_string()),
                ],
            )
            .await?;
        convert::air_quality(response).map_err(|e| ApiError::Network {
            message: format!("invalid air quality payload: {e}"),
        })
    }

    /// Route candidates between the requested endpoints.
    pub async fn calculate_route(&self, request: &RouteRequest) -> Result<RoutePlan, ApiError> {
        let response: RouteResponse = self.post("/calculate-route", request).await?;
        Ok(convert::route_plan(response))
    }
}
