//! Axum route handlers for the Learning API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::learning::lessons::{self, LessonResponse};
use crate::learning::progress;
use crate::learning::quiz::{generate_quiz, Quiz};
use crate::models::progress::TopicProgressRow;
use crate::ratelimit::LESSON_GENERATION_PER_MINUTE;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LessonRequest {
    pub topic: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    "Beginner".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    pub roadmap_id: Uuid,
    pub module_index: usize,
    pub topic_index: usize,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ProgressUpdateResponse {
    pub status: String,
    pub is_completed: bool,
}

/// POST /api/v1/learning/lesson
///
/// Serves the cached lesson for (topic, context) or generates one.
/// Rate-limited to 20/minute per user.
pub async fn handle_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<LessonRequest>,
) -> Result<Json<LessonResponse>, AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    state
        .limiter
        .check("lesson", user.id, LESSON_GENERATION_PER_MINUTE)
        .await?;

    let lesson =
        lessons::get_or_generate(&state.db, &state.llm, &request.topic, &request.context).await?;
    Ok(Json(lesson))
}

/// POST /api/v1/learning/quiz
///
/// Generates a quiz fresh on every request; nothing is persisted.
pub async fn handle_quiz(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(request): Json<QuizRequest>,
) -> Result<Json<Quiz>, AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let quiz = generate_quiz(&state.llm, &request.topic, &request.difficulty).await?;
    Ok(Json(quiz))
}

/// POST /api/v1/learning/progress
pub async fn handle_update_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<ProgressUpdateResponse>, AppError> {
    let row = progress::set_progress(
        &state.db,
        user.id,
        update.roadmap_id,
        update.module_index,
        update.topic_index,
        update.is_completed,
    )
    .await?;

    Ok(Json(ProgressUpdateResponse {
        status: "success".to_string(),
        is_completed: row.is_completed,
    }))
}

/// GET /api/v1/learning/progress/:roadmap_id
pub async fn handle_get_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<Vec<TopicProgressRow>>, AppError> {
    let rows = progress::get_progress(&state.db, user.id, roadmap_id).await?;
    Ok(Json(rows))
}
