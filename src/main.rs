use animerge::config::AppConfig;
use animerge::modules::aggregator::{
    AggregatorService, DefaultEmbedTemplate, NormalizedExactMatcher,
};
use animerge::modules::api;
use animerge::modules::provider::adapters::{AnimeSaturnClient, AnimeWorldClient};
use animerge::modules::provider::SourceClient;
use anyhow::Result;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "animerge=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let clients: Vec<Arc<dyn SourceClient>> = vec![
        Arc::new(AnimeWorldClient::new(&config)?),
        Arc::new(AnimeSaturnClient::new(&config)?),
    ];

    let service = Arc::new(AggregatorService::new(
        clients,
        Box::new(NormalizedExactMatcher),
        Box::new(DefaultEmbedTemplate::new(config.stream_proxy_url.clone())),
    ));

    let app = api::router(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
