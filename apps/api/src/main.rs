mod auth;
mod challenges;
mod config;
mod db;
mod errors;
mod gamification;
mod github;
mod learning;
mod llm_client;
mod models;
mod ratelimit;
mod roadmap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthClient;
use crate::challenges::catalog::ChallengeCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::github::client::GithubClient;
use crate::github::skills::SubstringSkillMatcher;
use crate::llm_client::LlmClient;
use crate::ratelimit::RateLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CodeForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed rate limiter
    let redis = redis::Client::open(config.redis_url.clone())?;
    let limiter = RateLimiter::new(redis);
    info!("Rate limiter initialized");

    // Initialize LLM client (optional credential — grading degrades to a heuristic)
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        info!("No LLM credential configured — generation disabled, grading heuristic active");
    }

    // Initialize identity provider client
    let auth = AuthClient::new(config.supabase_url.clone(), config.supabase_anon_key.clone());
    info!("Identity provider client initialized");

    // Initialize GitHub client
    let github = GithubClient::new(config.github_token.clone());

    // Load the challenge catalog (embedded unless overridden)
    let catalog = ChallengeCatalog::load(config.challenge_catalog_path.as_deref())?;
    info!("Challenge catalog loaded ({} challenges)", catalog.all().len());

    // Build app state
    let state = AppState {
        db,
        llm,
        auth,
        github,
        limiter,
        challenges: Arc::new(catalog),
        skill_matcher: Arc::new(SubstringSkillMatcher),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
