//! Profile stats shaping — completion percentages, derived experience and
//! title-based badges.

use serde::Serialize;
use uuid::Uuid;

/// Experience granted per completed topic, on top of challenge xp.
pub const XP_PER_COMPLETED_TOPIC: i64 = 150;
/// Recent activity shows at most this many roadmaps.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapProgress {
    pub id: Uuid,
    pub title: String,
    /// Percentage 0-100, integer truncation.
    pub progress: u32,
    pub total_topics: usize,
    pub completed_topics: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub items_created: usize,
    pub lessons_completed: usize,
    pub skills_mastered: usize,
    pub code_challenges: usize,
    pub streak_days: u32,
    pub total_xp: i64,
    pub recent_activity: Vec<RoadmapProgress>,
    pub badges: Vec<String>,
}

/// Total experience: completed topics at a flat rate plus accumulated
/// challenge xp.
pub fn total_experience(completed_topics: usize, challenge_xp: i32) -> i64 {
    completed_topics as i64 * XP_PER_COMPLETED_TOPIC + challenge_xp as i64
}

/// Derives badges from roadmap titles by case-insensitive substring, with
/// the unconditional "Pro Member" badge first. The fuzziness is accepted
/// product behavior, mirrored from the skill matcher.
pub fn derive_badges(roadmap_titles: &[String]) -> Vec<String> {
    let mut badges = vec!["Pro Member".to_string()];

    for title in roadmap_titles {
        let title = title.to_lowercase();
        for (needle, badge) in [
            ("react", "React Developer"),
            ("python", "Python Enthusiast"),
            ("javascript", "JS Wizard"),
        ] {
            if title.contains(needle) && !badges.iter().any(|b| b == badge) {
                badges.push(badge.to_string());
            }
        }
    }

    badges
}
