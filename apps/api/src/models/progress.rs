use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-topic completion flag. Keyed durably by the topic's stable id;
/// module/topic indices are kept as a positional mirror for API clients.
/// UNIQUE (user_id, roadmap_id, topic_id) makes the upsert atomic.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roadmap_id: Uuid,
    pub topic_id: Uuid,
    pub module_index: i32,
    pub topic_index: i32,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
