use anyhow::Context;
use autocomplete::api::{self, app_state::AppState};
use autocomplete::config::loader::ConfigLoader;
use autocomplete::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing, metrics_middleware,
};
use autocomplete::search::{SearchClient, SolrSearchClient};
use autocomplete::security::{ApiKeyAuth, SimpleAuthorizer};
use autocomplete::services::create_autocomplete_service;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.app_name, &config.logging);
    info!(
        environment = %config.environment,
        "Starting {}...", config.app_name
    );

    let search_client: Arc<dyn SearchClient> = Arc::new(SolrSearchClient::new(&config.search)?);
    info!(url = %config.search.url, "Search client initialized");

    if let Err(e) = search_client.ping().await {
        warn!(error = %e, "Search service is not reachable yet; serving empty results until it is");
    }

    let autocomplete_service = create_autocomplete_service(search_client.clone(), &config.search);
    info!("Autocomplete service initialized");

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(
        autocomplete_service,
        Box::new(ApiKeyAuth::new(&config.security.api_keys)),
        Box::new(SimpleAuthorizer::new(config.security.public_autocomplete)),
        metrics.clone(),
    );
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics.clone(),
        search_client,
    ));
    let api_router = api::create_router(app_state, config.security.security_headers_enabled);
    let router = create_observability_router(observability_state)
        .merge(api_router)
        .layer(axum::middleware::from_fn_with_state(metrics, metrics_middleware));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
