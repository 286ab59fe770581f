mod avatar;
mod config;
mod contact;
mod datauri;
mod db;
mod errors;
mod flows;
mod github;
mod llm_client;
mod models;
mod projects;
mod routes;
mod site;
mod state;
mod store;
mod upload;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::github::{CachedRepoSource, GitHubClient};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgPreferenceStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Devfolio v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL preference store
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let prefs = Arc::new(PgPreferenceStore::new(db));

    // Initialize GitHub listing behind the Redis cache
    let redis = redis::Client::open(config.redis_url.clone())?;
    let github = GitHubClient::new(&config.github_api_url, config.github_token.clone())?;
    let repos = Arc::new(CachedRepoSource::new(
        Arc::new(github),
        redis,
        config.repo_cache_ttl_secs,
    ));
    info!(
        "Repository source initialized ({}, cache TTL {}s)",
        config.github_api_url, config.repo_cache_ttl_secs
    );
    if config.default_github_username.is_empty() {
        info!("No default GitHub username; the gallery stays empty until one is set");
    }

    // Initialize generative backend
    let llm = Arc::new(GeminiClient::new(config.gemini_api_key.clone())?);
    info!(
        "LLM client initialized (text: {}, image: {})",
        llm_client::TEXT_MODEL,
        llm_client::IMAGE_MODEL
    );

    // Build app state
    let state = AppState {
        prefs,
        repos,
        llm,
        config: config.clone(),
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
