//! Axum route handlers for the Roadmap API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::roadmap::RoadmapRow;
use crate::ratelimit::ROADMAP_GENERATION_PER_MINUTE;
use crate::roadmap::generator::{generate_roadmap, persist_roadmap};
use crate::roadmap::pdf::{extract_resume_text, MAX_FILE_SIZE};
use crate::state::AppState;

struct GenerateForm {
    goal: String,
    current_skills: String,
    resume_text: String,
}

/// POST /api/v1/roadmap/generate
///
/// Multipart form: `goal` (required), `current_skills` (optional),
/// `file` (optional PDF resume, ≤ 5 MiB). Rate-limited to 2/minute per user —
/// full roadmap generation is the most expensive call in the system.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Json<RoadmapRow>, AppError> {
    state
        .limiter
        .check("roadmap", user.id, ROADMAP_GENERATION_PER_MINUTE)
        .await?;

    let form = read_generate_form(multipart).await?;

    let content = generate_roadmap(
        &state.llm,
        &form.goal,
        &form.current_skills,
        &form.resume_text,
    )
    .await?;

    let row = persist_roadmap(&state.db, user.id, &form.goal, &content).await?;
    Ok(Json(row))
}

/// Reads the multipart form, rejecting bad uploads before any AI call:
/// non-PDF content type → 400, oversized file → 413.
async fn read_generate_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut goal = String::new();
    let mut current_skills = String::new();
    let mut resume_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("goal") => {
                goal = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid goal field: {e}")))?;
            }
            Some("current_skills") => {
                current_skills = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid current_skills field: {e}"))
                })?;
            }
            Some("file") => {
                if field.content_type() != Some("application/pdf") {
                    return Err(AppError::Validation(
                        "Invalid file type. Only PDF allowed.".to_string(),
                    ));
                }
                let data: bytes::Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                if data.len() > MAX_FILE_SIZE {
                    return Err(AppError::PayloadTooLarge(
                        "File too large. Max size is 5MB.".to_string(),
                    ));
                }
                resume_text = extract_resume_text(&data)?;
            }
            _ => {}
        }
    }

    if goal.trim().is_empty() {
        return Err(AppError::Validation("goal cannot be empty".to_string()));
    }

    Ok(GenerateForm {
        goal,
        current_skills,
        resume_text,
    })
}

/// GET /api/v1/roadmap/:id
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(roadmap_id): Path<Uuid>,
) -> Result<Json<RoadmapRow>, AppError> {
    let row = super::fetch_owned(&state.db, roadmap_id, user.id).await?;
    Ok(Json(row))
}

/// GET /api/v1/roadmap/
pub async fn handle_list_roadmaps(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<RoadmapRow>>, AppError> {
    let rows = sqlx::query_as::<_, RoadmapRow>(
        "SELECT * FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}
