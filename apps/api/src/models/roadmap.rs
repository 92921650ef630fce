//! Roadmap rows and the versioned, explicitly-typed content they carry.
//!
//! The content column is JSONB at the storage layer, but it is written once
//! at generation time in a fixed shape and validated on every read instead
//! of being assumed. Each topic carries a stable uuid assigned at generation
//! time; progress rows reference that id, so regenerating or reordering a
//! roadmap cannot silently repoint existing progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

/// Current content schema version. Bump when the shape below changes.
pub const ROADMAP_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoadmapRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

impl RoadmapRow {
    /// Validates and deserializes the stored content. Shape is checked here,
    /// on read, never assumed by callers.
    pub fn parsed_content(&self) -> Result<RoadmapContent, AppError> {
        RoadmapContent::from_value(&self.content)
    }
}

/// The full typed content of a roadmap, written once at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapContent {
    pub schema_version: u32,
    pub modules: Vec<RoadmapModule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapModule {
    pub title: String,
    pub description: String,
    pub topics: Vec<Topic>,
    pub free_resources: Vec<Resource>,
    pub paid_resources: Vec<Resource>,
    pub projects: Vec<Project>,
}

/// The smallest trackable unit of a roadmap. The id is assigned at
/// generation time and is the durable key for progress tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    /// e.g. Video, Article, Course, Book
    #[serde(rename = "type")]
    pub resource_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Beginner, Intermediate, or Advanced
    pub difficulty: String,
}

impl RoadmapContent {
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let content: RoadmapContent = serde_json::from_value(value.clone())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Malformed roadmap content: {e}")))?;
        if content.schema_version != ROADMAP_SCHEMA_VERSION {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Unsupported roadmap content schema version {}",
                content.schema_version
            )));
        }
        Ok(content)
    }

    pub fn total_topics(&self) -> usize {
        self.modules.iter().map(|m| m.topics.len()).sum()
    }

    /// Resolves a positional (module_index, topic_index) reference to the
    /// topic's stable id. Positional references are accepted at the API edge
    /// for compatibility; storage is keyed by the id.
    pub fn topic_id_at(&self, module_index: usize, topic_index: usize) -> Option<Uuid> {
        self.modules
            .get(module_index)
            .and_then(|m| m.topics.get(topic_index))
            .map(|t| t.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_content() -> Value {
        json!({
            "schema_version": 1,
            "modules": [
                {
                    "title": "Rust Basics",
                    "description": "Ownership and borrowing",
                    "topics": [
                        {"id": "6e9c1f88-0000-0000-0000-000000000001", "title": "Ownership"},
                        {"id": "6e9c1f88-0000-0000-0000-000000000002", "title": "Borrowing"}
                    ],
                    "free_resources": [
                        {"title": "The Book", "url": "https://doc.rust-lang.org/book/", "type": "Book"},
                        {"title": "Rustlings", "url": "https://github.com/rust-lang/rustlings", "type": "Course"}
                    ],
                    "paid_resources": [
                        {"title": "Rust Course", "url": "https://udemy.com/rust", "type": "Course"}
                    ],
                    "projects": [
                        {"title": "CLI grep", "description": "Build a grep clone", "difficulty": "Beginner"}
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_content_round_trips_and_counts_topics() {
        let content = RoadmapContent::from_value(&sample_content()).unwrap();
        assert_eq!(content.modules.len(), 1);
        assert_eq!(content.total_topics(), 2);
    }

    #[test]
    fn test_topic_id_resolution() {
        let content = RoadmapContent::from_value(&sample_content()).unwrap();
        let id = content.topic_id_at(0, 1).unwrap();
        assert_eq!(
            id.to_string(),
            "6e9c1f88-0000-0000-0000-000000000002"
        );
        assert!(content.topic_id_at(0, 2).is_none());
        assert!(content.topic_id_at(1, 0).is_none());
    }

    #[test]
    fn test_unknown_schema_version_is_rejected() {
        let mut value = sample_content();
        value["schema_version"] = json!(99);
        assert!(RoadmapContent::from_value(&value).is_err());
    }

    #[test]
    fn test_malformed_content_is_rejected() {
        let value = json!({"roadmap": ["not", "the", "shape"]});
        assert!(RoadmapContent::from_value(&value).is_err());
    }
}
