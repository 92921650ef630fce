//! Axum route handlers for the Challenges API. The catalog endpoints are
//! public; verification requires authentication.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::challenges::catalog::Challenge;
use crate::challenges::grader::{verify_submission, VerificationResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChallengeSubmission {
    pub code: String,
    pub challenge_id: String,
    pub language: String,
}

/// GET /api/v1/challenges/
pub async fn handle_list_challenges(State(state): State<AppState>) -> Json<Vec<Challenge>> {
    Json(state.challenges.all().to_vec())
}

/// GET /api/v1/challenges/:id
pub async fn handle_get_challenge(
    State(state): State<AppState>,
    Path(challenge_id): Path<String>,
) -> Result<Json<Challenge>, AppError> {
    state
        .challenges
        .get(&challenge_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))
}

/// POST /api/v1/challenges/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(submission): Json<ChallengeSubmission>,
) -> Result<Json<VerificationResult>, AppError> {
    let challenge = state
        .challenges
        .get(&submission.challenge_id)
        .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))?;

    let result = verify_submission(
        &state.db,
        &state.llm,
        challenge,
        user.id,
        &submission.code,
        &submission.language,
    )
    .await?;

    Ok(Json(result))
}
