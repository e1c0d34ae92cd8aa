//! Deterministic gamification rules and data types.
//!
//! `gamification-core` defines the canonical rules (level thresholds, point
//! awards, daily-bonus detection, achievement derivation) and exposes pure
//! APIs that can be reused by the session layer and offline tools. Nothing
//! in this crate touches a clock or performs I/O; callers pass the current
//! calendar date and timestamp in, and all snapshot mutation happens in the
//! session layer on top of the values computed here.
pub mod benefits;
pub mod config;
pub mod engine;
pub mod state;

pub use benefits::{LEVEL_BENEFITS, LevelBenefit, benefits_for_level};
pub use config::{ConfigError, GamificationConfig};
pub use engine::Engine;
pub use state::{Achievement, AchievementCategory, ProgressSnapshot};
