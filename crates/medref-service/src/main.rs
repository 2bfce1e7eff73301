//! Medication reference HTTP server binary.

use medref_loader::{discover_data_files, ReferenceStore};
use medref_service::{api_router, MedrefServer, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServiceConfig::from_env();

    tracing::info!("Loading medication reference data from: {}", config.data_path.display());

    let files = discover_data_files(&config.data_path)?;
    let store = ReferenceStore::load(&files)?;

    tracing::info!(
        "Loaded {} medications, {} synonyms, {} interaction pairs across {} medications",
        store.catalog().len(),
        store.index().len(),
        store.graph().pair_count(),
        store.graph().node_count()
    );

    if let Some(meta) = &store.graph().meta {
        tracing::info!(
            source = %meta.source,
            generated_at = meta.generated_at.as_deref().unwrap_or("unknown"),
            "Interaction graph provenance"
        );
    }

    let orphans = store.orphan_graph_slugs();
    if !orphans.is_empty() {
        tracing::warn!("Interaction graph references unknown medications: {:?}", orphans);
    }

    tracing::info!("Reporting interactions at or above: {}", config.policy.threshold);

    let server = MedrefServer::new(store, config.policy);
    let app = api_router(server);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting medication reference server on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
