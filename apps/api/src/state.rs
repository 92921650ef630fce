use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthClient;
use crate::challenges::catalog::ChallengeCatalog;
use crate::github::client::GithubClient;
use crate::github::skills::SkillMatcher;
use crate::llm_client::LlmClient;
use crate::ratelimit::RateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub auth: AuthClient,
    pub github: GithubClient,
    pub limiter: RateLimiter,
    /// Read-only challenge catalog loaded at startup.
    pub challenges: Arc<ChallengeCatalog>,
    /// Pluggable skill classification strategy. Default: SubstringSkillMatcher.
    pub skill_matcher: Arc<dyn SkillMatcher>,
}
