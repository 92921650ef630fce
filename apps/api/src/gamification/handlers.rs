//! Axum route handlers for leaderboard and profile stats.

use axum::{extract::State, Json};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::gamification::leaderboard::{build_leaderboard, LeaderboardEntry};
use crate::gamification::stats::{
    derive_badges, total_experience, RoadmapProgress, UserStats, RECENT_ACTIVITY_LIMIT,
};
use crate::learning::progress::completion_percentage;
use crate::models::roadmap::RoadmapRow;
use crate::models::user::User;
use crate::state::AppState;

/// GET /api/v1/gamification/leaderboard
///
/// Top 10 users by accumulated challenge xp. The id tiebreak keeps the
/// order stable across requests.
pub async fn handle_leaderboard(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let users =
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY total_xp DESC, id LIMIT 10")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(build_leaderboard(users)))
}

/// GET /api/v1/user/stats
pub async fn handle_user_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserStats>, AppError> {
    let roadmaps = sqlx::query_as::<_, RoadmapRow>(
        "SELECT * FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let mut total_completed = 0usize;
    let mut recent_activity = Vec::new();

    for roadmap in &roadmaps {
        // Content that fails shape validation counts as zero topics rather
        // than failing the whole stats view.
        let total_topics = roadmap
            .parsed_content()
            .map(|c| c.total_topics())
            .unwrap_or(0);

        let completed: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM topic_progress
            WHERE user_id = $1 AND roadmap_id = $2 AND is_completed = TRUE
            "#,
        )
        .bind(user.id)
        .bind(roadmap.id)
        .fetch_one(&state.db)
        .await?;
        let completed = completed as usize;
        total_completed += completed;

        if recent_activity.len() < RECENT_ACTIVITY_LIMIT {
            recent_activity.push(RoadmapProgress {
                id: roadmap.id,
                title: roadmap.title.clone(),
                progress: completion_percentage(completed, total_topics),
                total_topics,
                completed_topics: completed,
            });
        }
    }

    let code_challenges: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_challenges WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&state.db)
            .await?;

    let titles: Vec<String> = roadmaps.iter().map(|r| r.title.clone()).collect();

    Ok(Json(UserStats {
        items_created: roadmaps.len(),
        lessons_completed: total_completed,
        skills_mastered: total_completed,
        code_challenges: code_challenges as usize,
        streak_days: u32::from(total_completed > 0),
        total_xp: total_experience(total_completed, user.total_xp),
        recent_activity,
        badges: derive_badges(&titles),
    }))
}
