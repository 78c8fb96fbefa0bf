mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::documents::DocumentParser;
use crate::analysis::keywords::KeywordService;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Keyword models are built once and shared read-only by every request
    let keywords = Arc::new(KeywordService::from_config(&config)?);
    info!(
        "Keyword extractor initialized (backend: {}, max_ngram: {}, top: {})",
        keywords.describe(),
        config.keyword_max_ngram,
        config.keyword_top
    );
    if !keywords.has_entity_extraction() {
        info!("Entity extraction disabled; keywords come from statistical extraction only");
    }

    let documents = DocumentParser::new().context("Failed to build document parser")?;
    info!("Document parser initialized (pdf, docx)");

    // Build app state
    let state = AppState {
        config: config.clone(),
        documents,
        keywords,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
