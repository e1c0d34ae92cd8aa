//! Immutable achievement records and the award vocabulary.

use chrono::{DateTime, NaiveDate, Utc};

/// Category of an awarded achievement.
///
/// Lowercase on the wire, matching the persisted snapshot format.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AchievementCategory {
    Daily,
    Activity,
    Milestone,
    Special,
    Points,
    Level,
}

impl AchievementCategory {
    /// Whether entries of this category count toward `total_points`.
    ///
    /// `level` entries are recognition-only and always carry 0 points;
    /// `special` is reserved for externally granted awards.
    pub fn carries_points(self) -> bool {
        !matches!(self, AchievementCategory::Level)
    }
}

/// A single point-or-recognition event, immutable once logged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Achievement {
    /// Unique id derived from the award kind plus the date or timestamp.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Emoji rendered by display widgets.
    pub icon: String,
    /// Points granted by this event; 0 for recognition-only entries.
    pub points: u32,
    pub earned_at: DateTime<Utc>,
    pub category: AchievementCategory,
}

impl Achievement {
    /// One-per-day award for the first visit of a calendar day.
    pub fn daily_visitor(bonus: u32, today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::daily_visitor_id(today),
            name: "Daily Visitor".into(),
            description: "Logged in today".into(),
            icon: "\u{1F3AF}".into(),
            points: bonus,
            earned_at: now,
            category: AchievementCategory::Daily,
        }
    }

    pub fn daily_visitor_id(today: NaiveDate) -> String {
        format!("daily_login_{today}")
    }

    /// Milestone for the 3rd same-day join.
    ///
    /// Carries 0 points: the combo bonus itself rides in the join's
    /// `points` entry so the ledger reconciles with `total_points`.
    pub fn triple_threat(today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::triple_threat_id(today),
            name: "Triple Threat".into(),
            description: "Joined 3 activities in one day".into(),
            icon: "\u{26A1}".into(),
            points: 0,
            earned_at: now,
            category: AchievementCategory::Milestone,
        }
    }

    pub fn triple_threat_id(today: NaiveDate) -> String {
        format!("triple_activity_{today}")
    }

    /// Generic point award; the reason becomes the visible description.
    pub fn points_earned(points: u32, reason: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("points_{}", now.timestamp_millis()),
            name: "Points Earned".into(),
            description: reason.into(),
            icon: "\u{2B50}".into(),
            points,
            earned_at: now,
            category: AchievementCategory::Points,
        }
    }

    /// Recognition entry appended whenever an award crosses a level boundary.
    pub fn level_unlocked(level: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("level_{}_{}", level, now.timestamp_millis()),
            name: format!("Level {level} Unlocked!"),
            description: format!("You've reached level {level}"),
            icon: "\u{1F3C6}".into(),
            points: 0,
            earned_at: now,
            category: AchievementCategory::Level,
        }
    }
}
