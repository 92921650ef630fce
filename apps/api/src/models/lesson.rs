use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A cached generated lesson. The (topic, context) pair is the exact,
/// case-sensitive cache key; the first successful generation is kept
/// permanently with no TTL or invalidation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonRow {
    pub id: Uuid,
    pub topic: String,
    pub context: String,
    pub title: String,
    pub content_markdown: String,
    pub estimated_time: String,
    pub created_at: DateTime<Utc>,
}
