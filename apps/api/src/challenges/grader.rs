//! Submission grading — asks the model for a JSON verdict against the
//! challenge's free-text criteria, awards xp on a correct verdict, and
//! records the submission.
//!
//! Without a model credential a deliberately weak length heuristic stands in
//! so development environments stay usable; it is not a real grader.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::challenges::catalog::Challenge;
use crate::challenges::prompts::{grading_prompt, GRADING_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, GRADING_TIMEOUT};
use crate::models::challenge::UserChallengeRow;

/// The model's verdict on one submission.
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub is_correct: bool,
    pub feedback: String,
    pub xp_awarded: i32,
}

/// Grades a submission and, on a correct verdict, atomically adds the
/// challenge's xp to the user's total and records the submission.
pub async fn verify_submission(
    pool: &PgPool,
    llm: &LlmClient,
    challenge: &Challenge,
    user_id: Uuid,
    code: &str,
    language: &str,
) -> Result<VerificationResult, AppError> {
    let verdict = if llm.is_configured() {
        grade(llm, challenge, code, language).await?
    } else {
        heuristic_verdict(code)
    };

    let xp_awarded = if verdict.correct { challenge.xp } else { 0 };

    if verdict.correct {
        award_xp(pool, user_id, challenge, code, language, xp_awarded).await?;
        info!(
            "Challenge {} solved by user {user_id}, awarded {xp_awarded} xp",
            challenge.id
        );
    }

    Ok(VerificationResult {
        is_correct: verdict.correct,
        feedback: verdict.feedback,
        xp_awarded,
    })
}

/// One model call with the tight grading timeout. No retry.
async fn grade(
    llm: &LlmClient,
    challenge: &Challenge,
    code: &str,
    language: &str,
) -> Result<Verdict, AppError> {
    let prompt = grading_prompt(challenge, code, language);
    llm.call_json(&prompt, GRADING_SYSTEM, GRADING_TIMEOUT)
        .await
        .map_err(|e| AppError::Llm(format!("Verification failed: {e}")))
}

/// Stand-in used when no model credential is configured: code longer than
/// 20 characters that does not contain the literal "pass" is deemed correct.
fn heuristic_verdict(code: &str) -> Verdict {
    let correct = code.chars().count() > 20 && !code.contains("pass");
    Verdict {
        feedback: format!(
            "AI key missing. Mock verification: {}",
            if correct {
                "Success!"
            } else {
                "Code looks incomplete."
            }
        ),
        correct,
    }
}

/// Relative xp update plus the submission record, in one transaction.
async fn award_xp(
    pool: &PgPool,
    user_id: Uuid,
    challenge: &Challenge,
    code: &str,
    language: &str,
    xp_awarded: i32,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE users SET total_xp = total_xp + $1 WHERE id = $2")
        .bind(xp_awarded)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let submission = sqlx::query_as::<_, UserChallengeRow>(
        r#"
        INSERT INTO user_challenges (id, user_id, challenge_id, language, code, xp_awarded)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&challenge.id)
    .bind(language)
    .bind(code)
    .bind(xp_awarded)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    debug!("Submission {} recorded", submission.id);
    Ok(())
}
