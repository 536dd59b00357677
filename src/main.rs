use clap::Parser;
use search_gateway::backend::elasticsearch::ElasticsearchClient;
use search_gateway::config::Args;
use search_gateway::query::indexes::IndexResolver;
use search_gateway::search::engine::SearchService;
use search_gateway::search::handlers::router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let index_config = args.index_config();
    let backend_config = args.backend_config()?;

    // 1. Backend client:
    let backend = ElasticsearchClient::new(&backend_config)?;
    tracing::info!(
        "Search backend: {} (timeout {:?}, connect timeout {:?})",
        backend.base_url(),
        backend_config.request_timeout,
        backend_config.connect_timeout
    );

    // 2. Pipeline:
    let resolver = IndexResolver::new(&index_config);
    if resolver.prefix().is_empty() {
        tracing::info!("Index prefixing disabled");
    } else {
        tracing::info!("Index prefix: '{}'", resolver.prefix());
    }
    let service = Arc::new(SearchService::new(resolver, Arc::new(backend)));

    // 3. HTTP server:
    let app = router(service);
    tracing::info!("HTTP server listening on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
