use tracing_subscriber::EnvFilter;

use route_client::activity::{ActivityTracker, LogIndicator};
use route_client::backend::{RouteApiClient, RouteApiConfig};
use route_client::bus::{AppEvent, event_channel};
use route_client::cache::{CachedRouteClient, StationCacheConfig};
use route_client::canvas::HeadlessSurface;
use route_client::domain::{Coordinate, RoutePreference};
use route_client::orchestrator::Orchestrator;
use route_client::view::LogView;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Point ROUTE_API_URL at the backend; defaults to the local emulator.
    let mut config = RouteApiConfig::new();
    if let Ok(base_url) = std::env::var("ROUTE_API_URL") {
        config = config.with_base_url(base_url);
    }

    let client = RouteApiClient::new(config).expect("Failed to create route API client");
    let cached = CachedRouteClient::new(client, &StationCacheConfig::default());

    let mut orchestrator = Orchestrator::builder()
        .client(cached)
        .activity(ActivityTracker::new(LogIndicator))
        .surface(HeadlessSurface::new())
        .view(LogView)
        .build()
        .expect("Failed to build orchestrator");

    orchestrator.initialize().await;

    // Demo session: pick two points near the city center, then request
    // routes between them.
    let origin = Coordinate::new(40.4168, -3.7038).expect("origin is finite");
    let destination = Coordinate::new(40.4300, -3.6900).expect("destination is finite");

    let (bus, events) = event_channel();
    bus.publish(AppEvent::PointSelected { point: origin });
    bus.publish(AppEvent::PointSelected { point: destination });
    bus.publish(AppEvent::RouteCalculationRequested {
        origin,
        destination,
        preference: RoutePreference::Balanced,
    });
    drop(bus);

    orchestrator.run(events).await;
}
