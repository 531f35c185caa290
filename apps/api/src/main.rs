mod catalog;
mod config;
mod credentials;
mod errors;
mod extract;
mod llm_client;
mod middleware;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::models::ScorerBackend;
use crate::routes::{build_router, cors_layer};
use crate::scoring::build_scorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NetSaas API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::seeded(),
    };
    if catalog.is_empty() {
        warn!("Product catalog is empty");
    }
    info!("Catalog initialized ({} products)", catalog.len());

    // Initialize credentials and scorer
    let credentials = Arc::new(CredentialStore::from_configured(
        config.openai_api_key.clone(),
    ));
    let scorer = build_scorer(
        config.scorer_backend,
        &config.openai_api_url,
        credentials.clone(),
    )?;
    if config.scorer_backend == ScorerBackend::Llm {
        info!("LLM scorer initialized (model: {})", llm_client::MODEL);
        if !credentials.is_configured() {
            warn!("No OPENAI_API_KEY set; analyses degrade until a key is supplied via /api/settings/api-key");
        }
    } else {
        info!("Rule-based scorer initialized");
    }

    let state = AppState {
        catalog: Arc::new(catalog),
        scorer,
        credentials,
    };

    let app = build_router(state).layer(cors_layer(&config.cors_allowed_origin)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
