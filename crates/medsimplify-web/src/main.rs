use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use medsimplify_core::{OpenAiBackend, ServiceConfig, Simplifier};
use medsimplify_ingest::TextExtractor;
use medsimplify_web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // Refuses to start without OPENAI_API_KEY
    let config = ServiceConfig::from_env()?;
    tracing::info!(?config, "configuration resolved");

    let backend = OpenAiBackend::from_config(&config)?;
    let model = backend.model().to_string();
    let simplifier = Simplifier::new(Arc::new(backend));
    tracing::info!(backend = simplifier.backend_name(), %model, "model backend ready");

    let extractor = TextExtractor::with_default_backends();
    if !extractor.supports_pdf() {
        tracing::warn!("built without PDF support; PDF uploads will be rejected");
    }

    let state = Arc::new(AppState::new(simplifier, extractor));
    let app = medsimplify_web::router(state, config.max_upload_bytes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
