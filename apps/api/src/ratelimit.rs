//! Per-user fixed-window rate limiting backed by Redis.
//!
//! Only the two generation endpoints carry a ceiling; lesson generation is
//! capped higher than full roadmap generation, reflecting relative cost.
//! Exceeding the ceiling yields 429 with no automatic backoff.

use redis::AsyncCommands;
use uuid::Uuid;

use crate::errors::AppError;

/// Full roadmap generation — the most expensive call in the system.
pub const ROADMAP_GENERATION_PER_MINUTE: u32 = 2;
/// Single-topic lesson generation.
pub const LESSON_GENERATION_PER_MINUTE: u32 = 20;

const WINDOW_SECS: u64 = 60;

#[derive(Clone)]
pub struct RateLimiter {
    client: redis::Client,
}

impl RateLimiter {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    /// Counts this request against the caller's current one-minute window.
    /// Returns 429 once the window exceeds `limit`.
    pub async fn check(&self, scope: &str, user_id: Uuid, limit: u32) -> Result<(), AppError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let key = window_key(scope, user_id, now);

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Redis unavailable: {e}")))?;

        let count: u32 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Redis INCR failed: {e}")))?;

        if count == 1 {
            // Window keys are epoch-bucketed; the expiry only garbage-collects.
            let _: () = conn
                .expire(&key, (WINDOW_SECS * 2) as i64)
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Redis EXPIRE failed: {e}")))?;
        }

        if count > limit {
            return Err(AppError::RateLimited(format!(
                "Rate limit exceeded: {limit} requests per minute"
            )));
        }

        Ok(())
    }
}

fn window_key(scope: &str, user_id: Uuid, epoch_secs: u64) -> String {
    format!("ratelimit:{scope}:{user_id}:{}", epoch_secs / WINDOW_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_key_stable_within_minute() {
        let user = Uuid::nil();
        assert_eq!(
            window_key("lesson", user, 120),
            window_key("lesson", user, 179)
        );
    }

    #[test]
    fn test_window_key_rolls_over_between_minutes() {
        let user = Uuid::nil();
        assert_ne!(
            window_key("lesson", user, 119),
            window_key("lesson", user, 120)
        );
    }

    #[test]
    fn test_window_key_scoped_per_route() {
        let user = Uuid::nil();
        assert_ne!(
            window_key("lesson", user, 120),
            window_key("roadmap", user, 120)
        );
    }
}
