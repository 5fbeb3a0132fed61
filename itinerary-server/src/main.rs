use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use itinerary_server::cache::{CacheConfig, CachedCatalogClient};
use itinerary_server::catalog::{CatalogClient, CatalogConfig};
use itinerary_server::planner::PlanConfig;
use itinerary_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("itinerary_server=info,info")),
        )
        .init();

    // Get credentials from environment
    let username = std::env::var("CATALOG_USERNAME").unwrap_or_else(|_| {
        tracing::warn!("CATALOG_USERNAME not set. Catalogue calls will fail.");
        String::new()
    });
    let password = std::env::var("CATALOG_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("CATALOG_PASSWORD not set. Catalogue calls will fail.");
        String::new()
    });

    // Create catalogue client
    let mut catalog_config = CatalogConfig::new(&username, &password);
    if let Ok(base_url) = std::env::var("CATALOG_URL") {
        catalog_config = catalog_config.with_base_url(base_url);
    }
    let catalog_client =
        CatalogClient::new(catalog_config).expect("Failed to create catalogue client");

    // Create cached client
    let cache_config = CacheConfig::default();
    let cached_catalog = CachedCatalogClient::new(catalog_client, &cache_config);

    // Create planner config
    let plan_config = PlanConfig::default();

    // Build app state
    let state = AppState::new(cached_catalog, plan_config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("Itinerary planner listening on http://{addr}");
    tracing::info!("  GET  /health                  - Health check");
    tracing::info!("  GET  /api/sites/near          - Search heritage sites");
    tracing::info!("  POST /itinerary/plan          - Plan around an anchor point");
    tracing::info!("  POST /itinerary/personalized  - Plan a personalized itinerary");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
