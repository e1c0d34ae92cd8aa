//! Pure gamification rule evaluation.
//!
//! The [`Engine`] is the deterministic half of the subsystem: level
//! calculation, per-join point awards, daily-bonus detection, and milestone
//! derivation. It never reads a clock and never mutates a snapshot; the
//! session layer passes the current date/timestamp in and merges the
//! results.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::{ConfigError, GamificationConfig};
use crate::state::{Achievement, ProgressSnapshot};

/// Stateless rule evaluator over a validated configuration.
pub struct Engine {
    config: GamificationConfig,
}

impl Engine {
    /// Validates the configuration and wraps it.
    ///
    /// A malformed threshold table is a startup failure, so the check runs
    /// here once rather than on every calculation.
    pub fn new(config: GamificationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GamificationConfig {
        &self.config
    }

    /// Highest level reachable with the configured table.
    pub fn max_level(&self) -> u32 {
        self.config.level_thresholds.len() as u32
    }

    /// Level for a cumulative point total: the largest index i with
    /// `points >= thresholds[i]`, plus one. Floors at level 1 and caps at
    /// the table length.
    pub fn level_for_points(&self, points: u32) -> u32 {
        self.config
            .level_thresholds
            .iter()
            .rposition(|&threshold| points >= threshold)
            .map_or(1, |index| index as u32 + 1)
    }

    /// Point total required to reach the level after `level`.
    ///
    /// At the cap there is no next boundary; the final threshold is
    /// returned so progress reads as complete.
    pub fn next_level_threshold(&self, level: u32) -> u32 {
        let thresholds = &self.config.level_thresholds;
        thresholds
            .get(level as usize)
            .copied()
            .unwrap_or(thresholds[thresholds.len() - 1])
    }

    /// Percentage progress from the current level boundary to the next,
    /// clamped to `[0, 100]`. Returns 100 at the max level.
    pub fn progress_to_next_level(&self, points: u32, level: u32) -> f64 {
        let current = level
            .checked_sub(1)
            .and_then(|index| self.config.level_thresholds.get(index as usize))
            .copied()
            .unwrap_or(0);
        let next = self.next_level_threshold(level);
        if next == current {
            return 100.0;
        }
        let gained = points.saturating_sub(current) as f64;
        (gained / (next - current) as f64 * 100.0).min(100.0)
    }

    /// Award for an activity join, given the same-day count *after* the
    /// increment. The combo bonus fires on the 3rd join only, never "at
    /// least 3".
    pub fn points_for_activity_join(&self, joined_today: u32) -> u32 {
        let mut points = self.config.points_per_activity;
        if joined_today == GamificationConfig::COMBO_JOIN_COUNT {
            points += self.config.triple_activity_bonus;
        }
        points
    }

    /// True iff no login/activity was recorded on `today`'s calendar date.
    ///
    /// Idempotent within a day: claiming the bonus stamps the date, so a
    /// second check the same day returns false.
    pub fn is_daily_bonus_available(last_login_date: Option<NaiveDate>, today: NaiveDate) -> bool {
        last_login_date != Some(today)
    }

    /// Milestones earned by the state transition just applied, deduplicated
    /// against the snapshot's log by category + calendar day.
    ///
    /// The daily-visitor award is minted by the claim path instead, since
    /// "a bonus was just claimed" is not observable from the snapshot alone.
    pub fn derive_achievements(
        &self,
        snapshot: &ProgressSnapshot,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let mut earned = Vec::new();
        if snapshot.activities_joined_today == GamificationConfig::COMBO_JOIN_COUNT
            && !snapshot.contains_achievement(&Achievement::triple_threat_id(today))
        {
            earned.push(Achievement::triple_threat(today, now));
        }
        earned
    }
}
