// Serene Journal - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use serene_journal::api::{router, AppState};
use serene_journal::{AppConfig, Journal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::load()?;
    info!(
        bind = %config.server.bind,
        storage = ?config.storage.backend,
        db_path = %config.storage.path.display(),
        scoring = ?config.scoring.mode,
        custom_lexicon = config.scoring.lexicon_path.is_some(),
        debounce_ms = config.client.debounce_ms,
        "loaded serene config"
    );

    let scorer = config.build_scorer()?;
    let store = config.open_store()?;
    let state = AppState::new(Journal::new(scorer, store), config.client);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;

    info!(addr = %config.server.bind, "server running");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
