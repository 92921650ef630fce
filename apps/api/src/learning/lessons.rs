//! Lesson generation with a permanent storage-backed cache.
//!
//! The (topic, context) pair is the exact, case-sensitive cache key. A hit
//! is served unchanged; a miss invokes the model and the first successful
//! generation is persisted forever — no TTL, no invalidation, later topic
//! content drift is never refreshed.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::learning::prompts::{lesson_prompt, LESSON_SYSTEM};
use crate::llm_client::{LlmClient, DEFAULT_TIMEOUT};
use crate::models::lesson::LessonRow;

const DEFAULT_ESTIMATED_TIME: &str = "15 mins";

#[derive(Debug, Clone, Serialize)]
pub struct LessonResponse {
    pub title: String,
    pub content_markdown: String,
    pub estimated_time: String,
}

impl From<LessonRow> for LessonResponse {
    fn from(row: LessonRow) -> Self {
        Self {
            title: row.title,
            content_markdown: row.content_markdown,
            estimated_time: row.estimated_time,
        }
    }
}

/// Serves the cached lesson for (topic, context) or generates and caches one.
pub async fn get_or_generate(
    pool: &PgPool,
    llm: &LlmClient,
    topic: &str,
    context: &str,
) -> Result<LessonResponse, AppError> {
    let cached =
        sqlx::query_as::<_, LessonRow>("SELECT * FROM lessons WHERE topic = $1 AND context = $2")
            .bind(topic)
            .bind(context)
            .fetch_optional(pool)
            .await?;

    if let Some(row) = cached {
        return Ok(row.into());
    }

    let prompt = lesson_prompt(topic, context);
    let content_markdown = llm
        .call_text(&prompt, LESSON_SYSTEM, DEFAULT_TIMEOUT)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate lesson: {e}")))?;

    let title = format!("Lesson: {topic}");

    // A concurrent request may have cached the same lesson meanwhile; the
    // unique (topic, context) index plus DO NOTHING keeps exactly one row.
    sqlx::query(
        r#"
        INSERT INTO lessons (id, topic, context, title, content_markdown, estimated_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (topic, context) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(topic)
    .bind(context)
    .bind(&title)
    .bind(&content_markdown)
    .bind(DEFAULT_ESTIMATED_TIME)
    .execute(pool)
    .await?;

    info!("Lesson cached for topic '{topic}'");

    Ok(LessonResponse {
        title,
        content_markdown,
        estimated_time: DEFAULT_ESTIMATED_TIME.to_string(),
    })
}
