use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Local mirror of an identity-provider account, created lazily on first
/// authenticated request. `total_xp` accumulates challenge points only;
/// topic-completion experience is derived at read time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub provider_id: Option<String>,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub github_username: Option<String>,
    pub total_xp: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Leaderboard display name: GitHub handle, then full name, then the
    /// local part of the email.
    pub fn display_name(&self) -> String {
        if let Some(handle) = &self.github_username {
            return handle.clone();
        }
        if let Some(name) = &self.full_name {
            return name.clone();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(github: Option<&str>, full_name: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            provider_id: None,
            email: "ada@example.com".to_string(),
            full_name: full_name.map(String::from),
            is_active: true,
            github_username: github.map(String::from),
            total_xp: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_github_handle() {
        assert_eq!(
            user(Some("ada-gh"), Some("Ada Lovelace")).display_name(),
            "ada-gh"
        );
    }

    #[test]
    fn test_display_name_falls_back_to_full_name() {
        assert_eq!(
            user(None, Some("Ada Lovelace")).display_name(),
            "Ada Lovelace"
        );
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        assert_eq!(user(None, None).display_name(), "ada");
    }
}
