//! Roadmap generation and retrieval.

pub mod generator;
pub mod handlers;
pub mod pdf;
pub mod prompts;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::roadmap::RoadmapRow;

/// Fetches a roadmap and enforces ownership: 404 when the row does not
/// exist, 403 when it exists but belongs to someone else. Non-owners learn
/// nothing beyond the 403.
pub async fn fetch_owned(
    pool: &PgPool,
    roadmap_id: Uuid,
    user_id: Uuid,
) -> Result<RoadmapRow, AppError> {
    let roadmap = sqlx::query_as::<_, RoadmapRow>("SELECT * FROM roadmaps WHERE id = $1")
        .bind(roadmap_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Roadmap not found".to_string()))?;

    if roadmap.user_id != user_id {
        return Err(AppError::Forbidden);
    }

    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::roadmap::{RoadmapContent, ROADMAP_SCHEMA_VERSION};
    use crate::roadmap::generator::persist_roadmap;

    async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO users (id, email) VALUES ($1, $2) RETURNING id")
            .bind(Uuid::new_v4())
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn empty_content() -> RoadmapContent {
        RoadmapContent {
            schema_version: ROADMAP_SCHEMA_VERSION,
            modules: vec![],
        }
    }

    #[sqlx::test]
    async fn test_fetch_owned_absent_row_is_not_found(pool: PgPool) {
        let user_id = seed_user(&pool, "owner@example.com").await;
        let err = fetch_owned(&pool, Uuid::new_v4(), user_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[sqlx::test]
    async fn test_fetch_owned_rejects_non_owner(pool: PgPool) {
        let owner = seed_user(&pool, "owner@example.com").await;
        let stranger = seed_user(&pool, "stranger@example.com").await;
        let roadmap = persist_roadmap(&pool, owner, "Learn Go", &empty_content())
            .await
            .unwrap();

        let err = fetch_owned(&pool, roadmap.id, stranger).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let fetched = fetch_owned(&pool, roadmap.id, owner).await.unwrap();
        assert_eq!(fetched.id, roadmap.id);
    }
}
