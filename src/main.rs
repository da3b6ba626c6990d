use std::sync::Arc;

use anyhow::Context;
use motion_master_api::{config, routes, state::AppState, store::MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();

    // An unreachable store at startup is fatal; the process exits non-zero.
    let store = MongoStore::connect(&config.store.uri, &config.store.database)
        .await
        .context("failed to connect to document store")?;
    tracing::info!(database = %config.store.database, "connected to document store");

    let app = routes::app(AppState::new(Arc::new(store)));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on http://{bind_addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
