use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A graded submission. Written on every correct verdict so the xp trail
/// is auditable (the catalog itself is configuration, not a table).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserChallengeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub challenge_id: String,
    pub language: String,
    pub code: String,
    pub xp_awarded: i32,
    pub completed_at: DateTime<Utc>,
}
