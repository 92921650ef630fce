//! Topic progress — atomic upserts keyed by the topic's stable id.
//!
//! Positional (module_index, topic_index) references are accepted at the API
//! edge and resolved against the roadmap content; storage is keyed by the
//! stable topic id, so concurrent identical requests cannot duplicate rows
//! and regenerated content cannot silently repoint progress.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::progress::TopicProgressRow;
use crate::models::roadmap::RoadmapRow;
use crate::roadmap;

/// Upserts the completion flag for one topic. The roadmap must exist (404)
/// and belong to the caller (403); out-of-range indices are a client error.
pub async fn set_progress(
    pool: &PgPool,
    user_id: Uuid,
    roadmap_id: Uuid,
    module_index: usize,
    topic_index: usize,
    is_completed: bool,
) -> Result<TopicProgressRow, AppError> {
    let roadmap = roadmap::fetch_owned(pool, roadmap_id, user_id).await?;
    let topic_id = resolve_topic_id(&roadmap, module_index, topic_index)?;

    let row = sqlx::query_as::<_, TopicProgressRow>(
        r#"
        INSERT INTO topic_progress
            (id, user_id, roadmap_id, topic_id, module_index, topic_index, is_completed)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, roadmap_id, topic_id)
        DO UPDATE SET is_completed = EXCLUDED.is_completed, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(roadmap_id)
    .bind(topic_id)
    .bind(module_index as i32)
    .bind(topic_index as i32)
    .bind(is_completed)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns all progress rows for a roadmap after the same ownership check.
pub async fn get_progress(
    pool: &PgPool,
    user_id: Uuid,
    roadmap_id: Uuid,
) -> Result<Vec<TopicProgressRow>, AppError> {
    roadmap::fetch_owned(pool, roadmap_id, user_id).await?;

    let rows = sqlx::query_as::<_, TopicProgressRow>(
        r#"
        SELECT * FROM topic_progress
        WHERE user_id = $1 AND roadmap_id = $2
        ORDER BY module_index, topic_index
        "#,
    )
    .bind(user_id)
    .bind(roadmap_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Marks a topic complete if it is not already. Returns true when the topic
/// was newly completed (inserted, or flipped from incomplete). Used by the
/// GitHub scanner's auto-completion pass; the conditional update makes the
/// skip-if-already-complete check atomic.
pub async fn auto_complete(
    pool: &PgPool,
    user_id: Uuid,
    roadmap_id: Uuid,
    topic_id: Uuid,
    module_index: usize,
    topic_index: usize,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO topic_progress
            (id, user_id, roadmap_id, topic_id, module_index, topic_index, is_completed)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE)
        ON CONFLICT (user_id, roadmap_id, topic_id)
        DO UPDATE SET is_completed = TRUE, updated_at = NOW()
        WHERE topic_progress.is_completed = FALSE
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(roadmap_id)
    .bind(topic_id)
    .bind(module_index as i32)
    .bind(topic_index as i32)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn resolve_topic_id(
    roadmap: &RoadmapRow,
    module_index: usize,
    topic_index: usize,
) -> Result<Uuid, AppError> {
    let content = roadmap.parsed_content()?;
    content
        .topic_id_at(module_index, topic_index)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "No topic at module {module_index}, topic {topic_index}"
            ))
        })
}

/// Completed / total as a truncated integer percentage; 0 when a roadmap
/// has no topics.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed * 100) / total).min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::roadmap::{RoadmapContent, RoadmapModule, Topic, ROADMAP_SCHEMA_VERSION};
    use crate::roadmap::generator::persist_roadmap;

    async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO users (id, email) VALUES ($1, $2) RETURNING id")
            .bind(Uuid::new_v4())
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn one_topic_content() -> RoadmapContent {
        RoadmapContent {
            schema_version: ROADMAP_SCHEMA_VERSION,
            modules: vec![RoadmapModule {
                title: "Basics".to_string(),
                description: "Core skills".to_string(),
                topics: vec![Topic {
                    id: Uuid::new_v4(),
                    title: "Ownership".to_string(),
                }],
                free_resources: vec![],
                paid_resources: vec![],
                projects: vec![],
            }],
        }
    }

    #[sqlx::test]
    async fn test_set_progress_twice_keeps_one_row(pool: PgPool) {
        let user_id = seed_user(&pool, "learner@example.com").await;
        let roadmap = persist_roadmap(&pool, user_id, "Learn Rust", &one_topic_content())
            .await
            .unwrap();

        let first = set_progress(&pool, user_id, roadmap.id, 0, 0, true)
            .await
            .unwrap();
        let second = set_progress(&pool, user_id, roadmap.id, 0, 0, true)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.topic_id, second.topic_id);
        assert!(second.is_completed);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topic_progress")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    async fn test_set_progress_flips_existing_row(pool: PgPool) {
        let user_id = seed_user(&pool, "learner@example.com").await;
        let roadmap = persist_roadmap(&pool, user_id, "Learn Rust", &one_topic_content())
            .await
            .unwrap();

        set_progress(&pool, user_id, roadmap.id, 0, 0, true)
            .await
            .unwrap();
        let row = set_progress(&pool, user_id, roadmap.id, 0, 0, false)
            .await
            .unwrap();
        assert!(!row.is_completed);
    }

    #[test]
    fn test_percentage_zero_topics_is_zero() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(5, 0), 0);
    }

    #[test]
    fn test_percentage_truncates() {
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 66);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(completion_percentage(0, 10), 0);
        assert_eq!(completion_percentage(10, 10), 100);
        // More completions than topics cannot exceed 100.
        assert_eq!(completion_percentage(12, 10), 100);
    }
}
