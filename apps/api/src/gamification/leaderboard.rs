//! Leaderboard shaping — pure functions over user rows.

use serde::Serialize;

use crate::models::user::User;

/// Badge threshold: accumulated challenge xp above this earns "Pro".
const PRO_XP_THRESHOLD: i32 = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub avatar_url: String,
    pub total_xp: i32,
    pub rank: u32,
    pub badges: Vec<String>,
}

/// Orders users by xp descending and assigns 1-based ranks. The storage
/// query already limits to the top 10; sorting here keeps the shaping
/// deterministic regardless of fetch order.
pub fn build_leaderboard(mut users: Vec<User>) -> Vec<LeaderboardEntry> {
    users.sort_by(|a, b| b.total_xp.cmp(&a.total_xp));

    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            username: user.display_name(),
            avatar_url: String::new(),
            total_xp: user.total_xp,
            rank: index as u32 + 1,
            badges: user_badges(&user),
        })
        .collect()
}

fn user_badges(user: &User) -> Vec<String> {
    let mut badges = Vec::new();
    if user.total_xp > PRO_XP_THRESHOLD {
        badges.push("Pro".to_string());
    }
    if user.github_username.is_some() {
        badges.push("Coder".to_string());
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(email: &str, xp: i32, github: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            provider_id: None,
            email: email.to_string(),
            full_name: None,
            is_active: true,
            github_username: github.map(String::from),
            total_xp: xp,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ordering_ranks_and_pro_badge() {
        let users = vec![
            user("a@example.com", 50, None),
            user("b@example.com", 1200, None),
            user("c@example.com", 0, None),
        ];
        let board = build_leaderboard(users);

        let xp: Vec<i32> = board.iter().map(|e| e.total_xp).collect();
        assert_eq!(xp, vec![1200, 50, 0]);
        let ranks: Vec<u32> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(board[0].badges, vec!["Pro".to_string()]);
        assert!(board[1].badges.is_empty());
    }

    #[test]
    fn test_coder_badge_requires_github_handle() {
        let board = build_leaderboard(vec![user("a@example.com", 10, Some("octocat"))]);
        assert_eq!(board[0].badges, vec!["Coder".to_string()]);
        assert_eq!(board[0].username, "octocat");
    }

    #[test]
    fn test_exactly_threshold_is_not_pro() {
        let board = build_leaderboard(vec![user("a@example.com", 1000, None)]);
        assert!(board[0].badges.is_empty());
    }
}
