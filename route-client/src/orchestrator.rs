//! End-to-end route planning workflows.
//!
//! The orchestrator owns the session workflows (initialize, calculate
//! route, clear, plus the air quality probe) and wires the
//! gateway, activity tracker, renderer, and user view together. All
//! collaborators are constructed by the embedding and injected through
//! the builder; a missing collaborator fails construction with every
//! missing name enumerated.
//!
//! Events are handled strictly in publish order: `run` finishes one
//! workflow (including its awaits) before dequeuing the next event, so
//! two route calculations can never interleave their renders.

use tracing::{debug, error, info, warn};

use crate::activity::ActivityTracker;
use crate::backend::RouteRequest;
use crate::bus::{AppEvent, EventStream};
use crate::cache::CachedRouteClient;
use crate::canvas::{MapRenderer, MapSurface, PathHandle};
use crate::domain::{Coordinate, PickOutcome, RoutePreference, Selection};
use crate::view::UserView;

const OFFLINE_NOTICE: &str = "Offline mode: using simulated data for demonstration.";
const ORIGIN_SET_NOTICE: &str = "Origin set. Now pick a destination.";
const DESTINATION_SET_NOTICE: &str = "Destination set. Ready to calculate a route.";
const NO_ROUTE_MESSAGE: &str = "No route found between the selected points.";
const AIR_QUALITY_ERROR: &str = "Could not retrieve air quality data.";

const LOADING_STATIONS: &str = "Loading bike stations...";
const CALCULATING_ROUTES: &str = "Calculating routes...";
const CHECKING_AIR_QUALITY: &str = "Checking air quality...";

/// Session-level configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Search radius for station snapshots, in km.
    pub default_radius_km: f64,

    /// Maximum stations per snapshot.
    pub default_max_stations: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_radius_km: 2.0,
            default_max_stations: 10,
        }
    }
}

/// Startup failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InitError {
    /// One or more required collaborators were not injected.
    #[error("missing required collaborators: {}", .0.join(", "))]
    MissingCollaborators(Vec<&'static str>),
}

/// Builder for an [`Orchestrator`]; collects collaborators and fails
/// fast on anything missing.
pub struct OrchestratorBuilder<S, V> {
    client: Option<CachedRouteClient>,
    activity: Option<ActivityTracker>,
    surface: Option<S>,
    view: Option<V>,
    config: PlannerConfig,
}

impl<S: MapSurface, V: UserView> OrchestratorBuilder<S, V> {
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            client: None,
            activity: None,
            surface: None,
            view: None,
            config: PlannerConfig::default(),
        }
    }

    /// Sets the route API client.
    pub fn client(mut self, client: CachedRouteClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the activity tracker.
    pub fn activity(mut self, activity: ActivityTracker) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Sets the map surface.
    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Sets the user view.
    pub fn view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    /// Overrides the session configuration.
    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the orchestrator, enumerating every missing collaborator.
    pub fn build(self) -> Result<Orchestrator<S, V>, InitError> {
        match (self.client, self.activity, self.surface, self.view) {
            (Some(client), Some(activity), Some(surface), Some(view)) => Ok(Orchestrator {
                client,
                activity,
                renderer: MapRenderer::new(surface),
                view,
                selection: Selection::new(),
                config: self.config,
            }),
            (client, activity, surface, view) => {
                let mut missing = Vec::new();
                if client.is_none() {
                    missing.push("api client");
                }
                if activity.is_none() {
                    missing.push("activity tracker");
                }
                if surface.is_none() {
                    missing.push("map surface");
                }
                if view.is_none() {
                    missing.push("user view");
                }
                Err(InitError::MissingCollaborators(missing))
            }
        }
    }
}

impl<S: MapSurface, V: UserView> Default for OrchestratorBuilder<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the route planning session.
pub struct Orchestrator<S: MapSurface, V: UserView> {
    client: CachedRouteClient,
    activity: ActivityTracker,
    renderer: MapRenderer<S>,
    view: V,
    selection: Selection,
    config: PlannerConfig,
}

impl<S: MapSurface, V: UserView> Orchestrator<S, V> {
    /// Starts building an orchestrator.
    pub fn builder() -> OrchestratorBuilder<S, V> {
        OrchestratorBuilder::new()
    }

    /// Startup workflow: probe the backend, then best-effort load a
    /// station snapshot around the current camera center.
    ///
    /// A failed probe degrades to an informational offline notice; a
    /// failed station load is logged and swallowed. Neither aborts
    /// startup.
    pub async fn initialize(&mut self) {
        info!("initializing route planner session");
        self.probe_backend().await;
        self.load_initial_stations().await;
    }

    async fn probe_backend(&mut self) {
        match self.client.health().await {
            Ok(health) if health.is_healthy() => {
                info!("backend healthy");
            }
            Ok(health) => {
                warn!(status = %health.status, "backend reports degraded status");
                self.view.show_info(OFFLINE_NOTICE);
            }
            Err(e) => {
                warn!(error = %e, "backend health probe failed");
                self.view.show_info(OFFLINE_NOTICE);
            }
        }
    }

    async fn load_initial_stations(&mut self) {
        let center = self.renderer.center();
        let fetched = self
            .activity
            .with_scope(
                LOADING_STATIONS,
                self.client.nearby_stations(
                    center,
                    self.config.default_radius_km,
                    self.config.default_max_stations,
                ),
            )
            .await;

        match fetched {
            Ok(stations) if !stations.is_empty() => {
                info!(count = stations.len(), "loaded stations");
                self.renderer.display_stations(&stations);
            }
            Ok(_) => debug!("no stations near the current center"),
            Err(e) => warn!(error = %e, "could not load stations"),
        }
    }

    /// Processes events until every publisher is gone.
    pub async fn run(&mut self, mut events: EventStream) {
        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }
    }

    /// Processes every already-queued event, then returns.
    pub async fn drain(&mut self, events: &mut EventStream) {
        while let Some(event) = events.try_next() {
            self.handle_event(event).await;
        }
    }

    /// Handles one notification to completion.
    pub async fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PointSelected { point } => self.point_selected(point),
            AppEvent::RouteCalculationRequested {
                origin,
                destination,
                preference,
            } => self.calculate_route(origin, destination, preference).await,
            AppEvent::RouteSelected { route, index } => {
                debug!(kind = route.kind.as_str(), index, "route selected");
            }
            AppEvent::ClearRequested => self.clear().await,
        }
    }

    /// Applies a canvas pick to the selection machine and mirrors the
    /// transition into the pin layer and the user view before the next
    /// event is handled.
    fn point_selected(&mut self, point: Coordinate) {
        match self.selection.pick(point) {
            PickOutcome::OriginSet => {
                self.renderer.set_origin(point);
                self.echo_selection();
                self.view.show_info(ORIGIN_SET_NOTICE);
            }
            PickOutcome::DestinationSet => {
                self.renderer.set_destination(point);
                self.echo_selection();
                self.view.show_info(DESTINATION_SET_NOTICE);
            }
            PickOutcome::DestinationMoved => {
                self.renderer.set_destination(point);
                self.echo_selection();
            }
        }
    }

    fn echo_selection(&mut self) {
        self.view
            .selection_changed(self.selection.origin(), self.selection.destination());
    }

    /// Route calculation workflow.
    async fn calculate_route(
        &mut self,
        origin: Coordinate,
        destination: Coordinate,
        preference: RoutePreference,
    ) {
        info!(%origin, %destination, preference = preference.as_str(), "calculating routes");

        self.selection.set_route(origin, destination);
        self.selection.set_preference(preference);
        self.echo_selection();
        self.renderer.set_origin(origin);
        self.renderer.set_destination(destination);

        let request = RouteRequest::new(origin, destination, preference);
        let result = self
            .activity
            .with_scope(CALCULATING_ROUTES, self.client.calculate_route(&request))
            .await;

        match result {
            Ok(plan) if !plan.is_empty() => {
                self.renderer.display_routes(&plan.candidates);
                self.view.show_results(&plan);
                if let Some(kind) = plan.recommended {
                    self.view
                        .show_info(&format!("Recommended route: {}", kind.label()));
                }
                info!(count = plan.candidates.len(), "routes rendered");
            }
            Ok(_) => {
                warn!("backend returned no routes");
                self.view.show_error(NO_ROUTE_MESSAGE, None);
            }
            Err(e) => {
                error!(status = e.status_code(), error = %e, "route calculation failed");
                self.view.show_error(&e.user_message(), e.detail_text());
            }
        }
    }

    /// Clear workflow: empty the selection and the canvas, then reload a
    /// default station snapshot around the current camera center.
    async fn clear(&mut self) {
        info!("clearing session");
        self.selection.clear();
        self.echo_selection();
        self.renderer.clear_all();
        self.load_initial_stations().await;
    }

    /// Air quality probe workflow.
    pub async fn air_quality_at(&mut self, point: Coordinate) {
        let result = self
            .activity
            .with_scope(CHECKING_AIR_QUALITY, self.client.air_quality(point))
            .await;

        match result {
            Ok(summary) => self.view.show_air_quality(&summary),
            Err(e) => {
                error!(error = %e, "air quality probe failed");
                self.view.show_error(AIR_QUALITY_ERROR, None);
            }
        }
    }

    /// Hover feedback passthrough to the renderer.
    pub fn route_hovered(&mut self, handle: PathHandle, entered: bool) {
        self.renderer.path_hovered(handle, entered);
    }

    /// Resolves a tapped path into the notification the embedding
    /// should publish.
    pub fn route_clicked(&self, handle: PathHandle) -> Option<AppEvent> {
        self.renderer
            .path_clicked(handle)
            .map(|(route, index)| AppEvent::RouteSelected { route, index })
    }

    /// The selection machine (for introspection and tests).
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The renderer (for introspection and tests).
    pub fn renderer(&self) -> &MapRenderer<S> {
        &self.renderer
    }

    /// The user view (for introspection and tests).
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The activity tracker (for introspection and tests).
    pub fn activity(&self) -> &ActivityTracker {
        &self.activity
    }

    /// The API client (for introspection and tests).
    pub fn client(&self) -> &CachedRouteClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::activity::LogIndicator;
    use crate::backend::{Deadline, RouteApiClient, RouteApiConfig};
    use crate::bus::event_channel;
    use crate::cache::StationCacheConfig;
    use crate::canvas::{HeadlessSurface, Layer, MarkerKind};
    use crate::domain::{AirQualitySummary, RouteKind, RoutePlan, SelectionPhase};

    use super::*;

    #[derive(Default)]
    struct RecordingView {
        selections: Vec<(Option<Coordinate>, Option<Coordinate>)>,
        infos: Vec<String>,
        errors: Vec<(String, Option<String>)>,
        results: Vec<RoutePlan>,
        air: Vec<AirQualitySummary>,
    }

    impl UserView for RecordingView {
        fn selection_changed(
            &mut self,
            origin: Option<Coordinate>,
            destination: Option<Coordinate>,
        ) {
            self.selections.push((origin, destination));
        }

        fn show_info(&mut self, message: &str) {
            self.infos.push(message.to_string());
        }

        fn show_error(&mut self, message: &str, detail: Option<&str>) {
            self.errors
                .push((message.to_string(), detail.map(str::to_string)));
        }

        fn show_results(&mut self, plan: &RoutePlan) {
            self.results.push(plan.clone());
        }

        fn show_air_quality(&mut self, summary: &AirQualitySummary) {
            self.air.push(summary.clone());
        }
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    async fn orchestrator_for(server: &MockServer) -> Orchestrator<HeadlessSurface, RecordingView> {
        let config = RouteApiConfig::new()
            .with_base_url(server.uri())
            .with_read_deadline(Deadline::new(Duration::from_millis(250)))
            .with_write_deadline(Deadline::new(Duration::from_millis(250)));
        let client = RouteApiClient::new(config).unwrap();
        let cached = CachedRouteClient::new(client, &StationCacheConfig::default());

        Orchestrator::builder()
            .client(cached)
            .activity(ActivityTracker::new(LogIndicator))
            .surface(HeadlessSurface::new())
            .view(RecordingView::default())
            .build()
            .unwrap()
    }

    fn stations_body(count: usize) -> serde_json::Value {
        let stations: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("Station {i}"),
                    "latitude": 40.41 + i as f64 * 0.01,
                    "longitude": -3.70,
                    "dock_bikes": 4,
                    "free_bases": 8,
                    "total_bases": 12
                })
            })
            .collect();
        json!({"stations": stations})
    }

    fn two_routes_body() -> serde_json::Value {
        json!({
            "routes": [
                {
                    "type": "eco",
                    "geometry": {"coordinates": [[-3.72, 40.40], [-3.68, 40.45]]},
                    "pollutants": {"NO2": 15.0, "PM10": 20.0, "PM2.5": 8.0},
                    "distance_km": 3.4,
                    "duration_min": 16.0,
                    "emission_score": 18.0,
                    "recommendation": "excellent",
                    "is_recommended": true,
                    "health_impact": "Low exposure."
                },
                {
                    "type": "fastest",
                    "geometry": {"coordinates": [[-3.72, 40.40], [-3.60, 40.41]]},
                    "pollutants": {"NO2": 48.0, "PM10": 39.0, "PM2.5": 22.0},
                    "distance_km": 2.9,
                    "duration_min": 11.0,
                    "emission_score": 74.0,
                    "recommendation": "poor",
                    "is_recommended": false,
                    "health_impact": "High exposure."
                }
            ],
            "recommended_route": "eco"
        })
    }

    async fn mount_healthy(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .mount(server)
            .await;
    }

    async fn mount_stations(server: &MockServer, count: usize) {
        Mock::given(method("GET"))
            .and(path("/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(stations_body(count)))
            .mount(server)
            .await;
    }

    #[test]
    fn builder_enumerates_missing_collaborators() {
        let result = OrchestratorBuilder::<HeadlessSurface, RecordingView>::new()
            .surface(HeadlessSurface::new())
            .build();

        let InitError::MissingCollaborators(missing) = result.err().unwrap();
        assert_eq!(missing, vec!["api client", "activity tracker", "user view"]);
    }

    #[test]
    fn builder_reports_everything_missing() {
        let result = OrchestratorBuilder::<HeadlessSurface, RecordingView>::new().build();
        let InitError::MissingCollaborators(missing) = result.err().unwrap();
        assert_eq!(
            missing,
            vec!["api client", "activity tracker", "map surface", "user view"]
        );
    }

    #[tokio::test]
    async fn initialize_loads_stations_when_healthy() {
        let server = MockServer::start().await;
        mount_healthy(&server).await;
        mount_stations(&server, 3).await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator.initialize().await;

        assert!(orchestrator.view().infos.is_empty());
        assert_eq!(
            orchestrator
                .renderer()
                .surface()
                .markers_in(Layer::Stations)
                .len(),
            3
        );
        assert!(!orchestrator.activity().is_busy());
    }

    #[tokio::test]
    async fn initialize_degrades_to_offline_notice_on_probe_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_stations(&server, 1).await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator.initialize().await;

        assert_eq!(orchestrator.view().infos, vec![OFFLINE_NOTICE.to_string()]);
        // Station load still happened.
        assert_eq!(
            orchestrator
                .renderer()
                .surface()
                .markers_in(Layer::Stations)
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn initialize_treats_degraded_status_as_offline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": "unhealthy"})),
            )
            .mount(&server)
            .await;
        mount_stations(&server, 0).await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator.initialize().await;
        assert_eq!(orchestrator.view().infos, vec![OFFLINE_NOTICE.to_string()]);
    }

    #[tokio::test]
    async fn initialize_swallows_station_errors() {
        let server = MockServer::start().await;
        mount_healthy(&server).await;
        Mock::given(method("GET"))
            .and(path("/stations"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator.initialize().await;

        assert!(orchestrator.view().errors.is_empty());
        assert!(!orchestrator.activity().is_busy());
    }

    #[tokio::test]
    async fn pick_sequence_updates_pins_and_view_in_order() {
        let server = MockServer::start().await;
        let mut orchestrator = orchestrator_for(&server).await;
        let (bus, mut events) = event_channel();

        bus.publish(AppEvent::PointSelected {
            point: coord(40.40, -3.72),
        });
        bus.publish(AppEvent::PointSelected {
            point: coord(40.45, -3.68),
        });
        bus.publish(AppEvent::PointSelected {
            point: coord(40.47, -3.66),
        });
        orchestrator.drain(&mut events).await;

        let selection = orchestrator.selection();
        assert_eq!(selection.phase(), SelectionPhase::BothSet);
        assert_eq!(selection.origin(), Some(coord(40.40, -3.72)));
        assert_eq!(selection.destination(), Some(coord(40.47, -3.66)));

        let markers = orchestrator.renderer().surface().markers_in(Layer::Markers);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, MarkerKind::Origin);
        assert_eq!(markers[0].position, coord(40.40, -3.72));
        assert_eq!(markers[1].kind, MarkerKind::Destination);
        assert_eq!(markers[1].position, coord(40.47, -3.66));

        let view = orchestrator.view();
        assert_eq!(view.infos, vec![ORIGIN_SET_NOTICE, DESTINATION_SET_NOTICE]);
        assert_eq!(
            view.selections.last().unwrap(),
            &(Some(coord(40.40, -3.72)), Some(coord(40.47, -3.66)))
        );
    }

    #[tokio::test]
    async fn calculate_route_renders_and_surfaces_recommendation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .and(body_json(json!({
                "origin": {"lat": 40.40, "lon": -3.72},
                "destination": {"lat": 40.45, "lon": -3.68},
                "preference": "air_quality"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_routes_body()))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        let (bus, mut events) = event_channel();
        bus.publish(AppEvent::RouteCalculationRequested {
            origin: coord(40.40, -3.72),
            destination: coord(40.45, -3.68),
            preference: RoutePreference::AirQuality,
        });
        orchestrator.drain(&mut events).await;

        let surface = orchestrator.renderer().surface();
        let paths = surface.paths_in(Layer::Routes);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].1.weight, 6);
        assert_eq!(paths[0].1.color, "#10b981");
        assert_eq!(paths[1].1.weight, 4);
        assert_eq!(paths[1].1.opacity, 0.6);

        // Both pins were placed before the POST settled.
        assert_eq!(surface.markers_in(Layer::Markers).len(), 2);

        let view = orchestrator.view();
        assert_eq!(view.results.len(), 1);
        assert_eq!(view.results[0].recommended, Some(RouteKind::Eco));
        assert_eq!(view.infos, vec!["Recommended route: Eco route"]);
        assert!(view.errors.is_empty());

        assert!(!orchestrator.activity().is_busy());
        assert!(!orchestrator.client().has_pending_requests());
    }

    #[tokio::test]
    async fn calculation_timeout_surfaces_message_and_renders_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(two_routes_body())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator
            .handle_event(AppEvent::RouteCalculationRequested {
                origin: coord(40.40, -3.72),
                destination: coord(40.45, -3.68),
                preference: RoutePreference::Balanced,
            })
            .await;

        let view = orchestrator.view();
        assert_eq!(view.errors.len(), 1);
        assert!(view.errors[0].0.contains("took too long"));
        assert!(view.results.is_empty());

        assert!(
            orchestrator
                .renderer()
                .surface()
                .paths_in(Layer::Routes)
                .is_empty()
        );
        assert!(!orchestrator.activity().is_busy());
        assert!(!orchestrator.client().has_pending_requests());
    }

    #[tokio::test]
    async fn empty_candidate_list_reports_no_route() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"routes": []})))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator
            .handle_event(AppEvent::RouteCalculationRequested {
                origin: coord(40.40, -3.72),
                destination: coord(40.45, -3.68),
                preference: RoutePreference::Balanced,
            })
            .await;

        let view = orchestrator.view();
        assert_eq!(view.errors, vec![(NO_ROUTE_MESSAGE.to_string(), None)]);
        assert!(view.results.is_empty());
    }

    #[tokio::test]
    async fn validation_failure_surfaces_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "Missing origin or destination"})),
            )
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator
            .handle_event(AppEvent::RouteCalculationRequested {
                origin: coord(40.40, -3.72),
                destination: coord(40.45, -3.68),
                preference: RoutePreference::Distance,
            })
            .await;

        let (message, _) = orchestrator.view().errors.last().unwrap();
        assert_eq!(message, "Missing origin or destination");
    }

    #[tokio::test]
    async fn malformed_candidate_in_batch_is_skipped() {
        let server = MockServer::start().await;
        let mut body = two_routes_body();
        body["routes"]
            .as_array_mut()
            .unwrap()
            .insert(1, json!({"type": "shortest", "recommendation": "moderate"}));
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator
            .handle_event(AppEvent::RouteCalculationRequested {
                origin: coord(40.40, -3.72),
                destination: coord(40.45, -3.68),
                preference: RoutePreference::Balanced,
            })
            .await;

        // Three candidates in the response; the geometry-less one does
        // not render.
        assert_eq!(orchestrator.view().results[0].candidates.len(), 3);
        assert_eq!(
            orchestrator
                .renderer()
                .surface()
                .paths_in(Layer::Routes)
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn clear_resets_selection_canvas_and_reloads_stations() {
        let server = MockServer::start().await;
        mount_stations(&server, 2).await;
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_routes_body()))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        let (bus, mut events) = event_channel();
        bus.publish(AppEvent::PointSelected {
            point: coord(40.40, -3.72),
        });
        bus.publish(AppEvent::RouteCalculationRequested {
            origin: coord(40.40, -3.72),
            destination: coord(40.45, -3.68),
            preference: RoutePreference::Balanced,
        });
        bus.publish(AppEvent::ClearRequested);
        orchestrator.drain(&mut events).await;

        assert_eq!(orchestrator.selection().phase(), SelectionPhase::Empty);

        let surface = orchestrator.renderer().surface();
        assert!(surface.paths_in(Layer::Routes).is_empty());
        assert!(surface.markers_in(Layer::Markers).is_empty());
        // Fresh snapshot after the clear.
        assert_eq!(surface.markers_in(Layer::Stations).len(), 2);

        assert_eq!(
            orchestrator.view().selections.last().unwrap(),
            &(None, None)
        );
    }

    #[tokio::test]
    async fn route_click_resolves_to_selected_event() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate-route"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_routes_body()))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator
            .handle_event(AppEvent::RouteCalculationRequested {
                origin: coord(40.40, -3.72),
                destination: coord(40.45, -3.68),
                preference: RoutePreference::Balanced,
            })
            .await;

        let handles = orchestrator
            .renderer()
            .surface()
            .path_handles(Layer::Routes);
        let event = orchestrator.route_clicked(handles[1]).unwrap();
        match &event {
            AppEvent::RouteSelected { route, index } => {
                assert_eq!(route.kind, RouteKind::Fastest);
                assert_eq!(*index, 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        orchestrator.handle_event(event).await;
    }

    #[tokio::test]
    async fn air_quality_probe_reports_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/air-quality"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "level": "moderate",
                "pollutants": {"NO2": 31.0, "PM10": 24.0, "PM2.5": 11.0},
                "score": 58.0,
                "location": {"lat": 40.4168, "lon": -3.7038},
                "nearest_stations": [{"name": "Plaza de España"}]
            })))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator.air_quality_at(coord(40.4168, -3.7038)).await;

        let view = orchestrator.view();
        assert_eq!(view.air.len(), 1);
        assert_eq!(view.air[0].nearest_stations, vec!["Plaza de España"]);
        assert!(!orchestrator.activity().is_busy());
    }

    #[tokio::test]
    async fn air_quality_failure_surfaces_fixed_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/air-quality"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut orchestrator = orchestrator_for(&server).await;
        orchestrator.air_quality_at(coord(40.4168, -3.7038)).await;

        assert_eq!(
            orchestrator.view().errors,
            vec![(AIR_QUALITY_ERROR.to_string(), None)]
        );
    }
}
