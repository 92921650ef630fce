//! Axum route handlers for the GitHub API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::github::skills::{analyze, SkillAnalysis, SkillMatcher};
use crate::learning::progress;
use crate::models::roadmap::RoadmapRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GithubConnectRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct GithubConnectResponse {
    pub status: String,
    pub analysis: SkillAnalysis,
    pub auto_completed_nodes: u32,
}

/// POST /api/v1/github/analyze
///
/// Connects a GitHub account, scans it for skills, and auto-completes every
/// owned roadmap topic a detected skill covers.
pub async fn handle_analyze(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<GithubConnectRequest>,
) -> Result<Json<GithubConnectResponse>, AppError> {
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }

    sqlx::query("UPDATE users SET github_username = $1 WHERE id = $2")
        .bind(&request.username)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    let repos = state.github.recent_repos(&request.username).await?;
    let analysis = analyze(state.skill_matcher.as_ref(), &request.username, &repos);

    let auto_completed_nodes = auto_complete_topics(
        &state,
        user.id,
        state.skill_matcher.as_ref(),
        &analysis.detected_skills,
    )
    .await?;

    Ok(Json(GithubConnectResponse {
        status: "success".to_string(),
        analysis,
        auto_completed_nodes,
    }))
}

/// Walks every (module, topic) pair in the caller's roadmaps and marks
/// matching topics complete. Pairs already complete are skipped; the count
/// covers newly completed topics only.
async fn auto_complete_topics(
    state: &AppState,
    user_id: uuid::Uuid,
    matcher: &dyn SkillMatcher,
    detected_skills: &[String],
) -> Result<u32, AppError> {
    let roadmaps = sqlx::query_as::<_, RoadmapRow>("SELECT * FROM roadmaps WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(&state.db)
        .await?;

    let mut newly_completed = 0u32;

    for roadmap in &roadmaps {
        let content = match roadmap.parsed_content() {
            Ok(content) => content,
            Err(e) => {
                // A malformed roadmap should not sink the whole scan.
                warn!("Skipping roadmap {} with unreadable content: {e}", roadmap.id);
                continue;
            }
        };

        for (module_index, module) in content.modules.iter().enumerate() {
            for (topic_index, topic) in module.topics.iter().enumerate() {
                let matched = detected_skills
                    .iter()
                    .any(|skill| matcher.matches_topic(skill, &topic.title));
                if !matched {
                    continue;
                }

                let completed = progress::auto_complete(
                    &state.db,
                    user_id,
                    roadmap.id,
                    topic.id,
                    module_index,
                    topic_index,
                )
                .await?;
                if completed {
                    newly_completed += 1;
                }
            }
        }
    }

    Ok(newly_completed)
}
