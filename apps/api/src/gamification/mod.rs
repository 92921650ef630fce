//! Gamification — leaderboard and profile stats aggregated from xp and
//! topic completion.

pub mod handlers;
pub mod leaderboard;
pub mod stats;
