use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Required variables fail startup; optional ones degrade behavior
/// (no LLM key → heuristic challenge grading, no catalog path → embedded catalog).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Optional. When absent, roadmap/lesson/quiz generation return an error
    /// and challenge grading falls back to the length heuristic.
    pub anthropic_api_key: Option<String>,
    /// Optional GitHub token to raise the unauthenticated rate limit.
    pub github_token: Option<String>,
    /// Optional path to a challenge catalog JSON file overriding the embedded one.
    pub challenge_catalog_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            supabase_url: require_env("SUPABASE_URL")?,
            supabase_anon_key: require_env("SUPABASE_ANON_KEY")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            github_token: optional_env("GITHUB_TOKEN"),
            challenge_catalog_path: optional_env("CHALLENGE_CATALOG_PATH"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
