pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{challenges, gamification, github, learning, roadmap};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Roadmap API
        .route(
            "/api/v1/roadmap/generate",
            post(roadmap::handlers::handle_generate_roadmap),
        )
        .route(
            "/api/v1/roadmap/",
            get(roadmap::handlers::handle_list_roadmaps),
        )
        .route(
            "/api/v1/roadmap/:id",
            get(roadmap::handlers::handle_get_roadmap),
        )
        // Learning API
        .route(
            "/api/v1/learning/lesson",
            post(learning::handlers::handle_lesson),
        )
        .route(
            "/api/v1/learning/quiz",
            post(learning::handlers::handle_quiz),
        )
        .route(
            "/api/v1/learning/progress",
            post(learning::handlers::handle_update_progress),
        )
        .route(
            "/api/v1/learning/progress/:roadmap_id",
            get(learning::handlers::handle_get_progress),
        )
        // User API
        .route(
            "/api/v1/user/stats",
            get(gamification::handlers::handle_user_stats),
        )
        // GitHub API
        .route(
            "/api/v1/github/analyze",
            post(github::handlers::handle_analyze),
        )
        // Gamification API
        .route(
            "/api/v1/gamification/leaderboard",
            get(gamification::handlers::handle_leaderboard),
        )
        // Challenges API (catalog endpoints are public)
        .route(
            "/api/v1/challenges/",
            get(challenges::handlers::handle_list_challenges),
        )
        .route(
            "/api/v1/challenges/verify",
            post(challenges::handlers::handle_verify),
        )
        .route(
            "/api/v1/challenges/:id",
            get(challenges::handlers::handle_get_challenge),
        )
        // Axum's default body limit (2 MiB) is below the 5 MiB PDF ceiling;
        // the handler still enforces the exact file-size check.
        .layer(DefaultBodyLimit::max(6 * 1024 * 1024))
        .with_state(state)
}
