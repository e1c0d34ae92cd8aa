/// Gamification constants and tunable parameters.
///
/// The threshold table is validated when an [`Engine`](crate::Engine) is
/// constructed, not per call: a bad table is a deployment misconfiguration
/// and fatal to subsystem startup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GamificationConfig {
    /// Base award for every confirmed activity join.
    pub points_per_activity: u32,
    /// One-time award for the first visit of a calendar day.
    pub daily_login_bonus: u32,
    /// One-time combo bonus applied exactly on the 3rd same-day join.
    pub triple_activity_bonus: u32,
    /// Ascending point totals defining level boundaries. Index i is the
    /// floor for level i+1; the table length caps the maximum level.
    pub level_thresholds: Vec<u32>,
}

impl GamificationConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POINTS_PER_ACTIVITY: u32 = 10;
    pub const DEFAULT_DAILY_LOGIN_BONUS: u32 = 5;
    pub const DEFAULT_TRIPLE_ACTIVITY_BONUS: u32 = 50;
    pub const DEFAULT_LEVEL_THRESHOLDS: [u32; 7] = [0, 100, 250, 500, 1000, 2000, 5000];

    /// Same-day join count at which the combo bonus fires, exactly once.
    pub const COMBO_JOIN_COUNT: u32 = 3;

    pub fn new() -> Self {
        Self {
            points_per_activity: Self::DEFAULT_POINTS_PER_ACTIVITY,
            daily_login_bonus: Self::DEFAULT_DAILY_LOGIN_BONUS,
            triple_activity_bonus: Self::DEFAULT_TRIPLE_ACTIVITY_BONUS,
            level_thresholds: Self::DEFAULT_LEVEL_THRESHOLDS.to_vec(),
        }
    }

    pub fn with_level_thresholds(level_thresholds: Vec<u32>) -> Self {
        Self {
            level_thresholds,
            ..Self::new()
        }
    }

    /// Checks the threshold table: non-empty, floor of 0, strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(&first) = self.level_thresholds.first() else {
            return Err(ConfigError::EmptyThresholds);
        };
        if first != 0 {
            return Err(ConfigError::NonZeroFloor(first));
        }
        for (index, pair) in self.level_thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::NonAscendingThresholds {
                    index: index + 1,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(())
    }
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors surfaced while validating a [`GamificationConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("level threshold table is empty")]
    EmptyThresholds,

    #[error("level threshold table must start at 0 (got {0})")]
    NonZeroFloor(u32),

    #[error("level thresholds must be strictly ascending ({prev} >= {next} at index {index})")]
    NonAscendingThresholds { index: usize, prev: u32, next: u32 },
}
