//! Per-user gamification state.
//!
//! This module owns the persisted data structures: the progress snapshot and
//! its append-only achievement log. The session layer clones and queries
//! this state but mutates it exclusively through values computed by the
//! [`Engine`](crate::Engine).
mod achievement;

pub use achievement::{Achievement, AchievementCategory};

use chrono::NaiveDate;

/// Complete per-user gamification record, the sole persisted entity.
///
/// Serialized as JSON with camelCase field names; this is the on-device wire
/// format, so renaming a field is a breaking change for existing saves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProgressSnapshot {
    /// Owning user; also the storage namespace key.
    pub user_id: String,
    /// Lifetime cumulative points. Monotonically non-decreasing, and always
    /// equal to the sum of `points` over the achievement log entries of
    /// category `points`/`daily`/`activity`/`milestone`.
    pub total_points: u32,
    /// Derived from `total_points` via the threshold table. Recomputed on
    /// every award, never set directly.
    pub level: u32,
    /// Same-day join counter; lazily reset on the first operation of a new
    /// calendar day.
    pub activities_joined_today: u32,
    /// Last date a login/activity was recorded. Drives daily-bonus
    /// availability and streak accounting. `None` until the first visit.
    pub last_login_date: Option<NaiveDate>,
    /// Consecutive-day streak; increments only when the previous recorded
    /// date was exactly yesterday, otherwise resets to 1.
    pub streak_days: u32,
    /// Lifetime join counter, monotonically non-decreasing.
    pub total_activities_joined: u32,
    /// Append-only log of awarded events.
    pub achievements: Vec<Achievement>,
}

impl ProgressSnapshot {
    /// Fresh snapshot for a user with no persisted history: all counters
    /// zeroed, level 1, empty achievement log.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            total_points: 0,
            level: 1,
            activities_joined_today: 0,
            last_login_date: None,
            streak_days: 0,
            total_activities_joined: 0,
            achievements: Vec::new(),
        }
    }

    /// Returns true if an achievement with the given id is already logged.
    ///
    /// Derived achievement ids embed the calendar day they were earned on,
    /// so this is the dedup check for one-per-day awards.
    pub fn contains_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Sum of logged points over the point-carrying categories.
    ///
    /// Matches `total_points` for any snapshot produced by the session
    /// layer; `level` entries carry 0 and are excluded by definition.
    pub fn ledger_total(&self) -> u32 {
        self.achievements
            .iter()
            .filter(|a| a.category.carries_points())
            .map(|a| a.points)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn fresh_snapshot_is_zeroed_at_level_one() {
        let snapshot = ProgressSnapshot::new("user-1");
        assert_eq!(snapshot.user_id, "user-1");
        assert_eq!(snapshot.total_points, 0);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.activities_joined_today, 0);
        assert_eq!(snapshot.last_login_date, None);
        assert_eq!(snapshot.streak_days, 0);
        assert_eq!(snapshot.total_activities_joined, 0);
        assert!(snapshot.achievements.is_empty());
    }

    #[test]
    fn contains_achievement_matches_by_id() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut snapshot = ProgressSnapshot::new("user-1");
        snapshot
            .achievements
            .push(Achievement::daily_visitor(5, today, Utc::now()));

        assert!(snapshot.contains_achievement(&Achievement::daily_visitor_id(today)));
        assert!(!snapshot.contains_achievement(&Achievement::triple_threat_id(today)));
    }

    #[test]
    fn ledger_total_excludes_level_entries() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let now = Utc::now();
        let mut snapshot = ProgressSnapshot::new("user-1");
        snapshot
            .achievements
            .push(Achievement::points_earned(10, "Joined activity", now));
        snapshot
            .achievements
            .push(Achievement::daily_visitor(5, today, now));
        snapshot.achievements.push(Achievement::level_unlocked(2, now));

        assert_eq!(snapshot.ledger_total(), 15);
    }
}
