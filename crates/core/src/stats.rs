//! Read-only projections owned by the backend: per-user stats and the
//! karma leaderboard.  This crate only carries and renders them.

use serde::{Deserialize, Serialize};

/// Aggregate figures from `GET /api/users/{id}/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub total_commissions: u32,
    pub completed_commissions: u32,
    /// Percentage in 0..=100.
    pub success_rate: f64,
    /// Average karma rating in 0..=5.
    pub average_rating: f64,
    /// Signed: negative reports subtract.
    pub karma_points: i64,
    /// 1-based leaderboard position; absent while unranked.
    #[serde(default)]
    pub rank: Option<u32>,
}

/// One row of `GET /api/leaderboard`, ordered by karma points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub karma_points: i64,
    pub completed_commissions: u32,
    pub average_rating: f64,
}

impl LeaderboardEntry {
    /// Preferred display string: display name when set, else username.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}
