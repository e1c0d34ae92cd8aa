//! Per-level perks surfaced by profile and level-up views.

/// Perks unlocked at a given level.
#[derive(Clone, Copy, Debug)]
pub struct LevelBenefit {
    pub level: u32,
    pub benefits: &'static [&'static str],
    pub description: &'static str,
    /// Accent color token used by display widgets.
    pub color: &'static str,
}

/// Benefit definitions, sorted by level. Levels past the last entry keep
/// the most recent unlocked perks.
pub static LEVEL_BENEFITS: &[LevelBenefit] = &[
    LevelBenefit {
        level: 1,
        benefits: &["Basic activity access", "Profile customization"],
        description: "Welcome to PingBadge!",
        color: "blue",
    },
    LevelBenefit {
        level: 2,
        benefits: &["Priority notifications", "Enhanced leaderboard visibility"],
        description: "You're getting the hang of it!",
        color: "green",
    },
    LevelBenefit {
        level: 3,
        benefits: &["Access to premium activities", "Early activity registration"],
        description: "Expert level unlocked!",
        color: "purple",
    },
    LevelBenefit {
        level: 4,
        benefits: &[
            "VIP status",
            "Exclusive badges",
            "Activity creation priority",
        ],
        description: "Champion status achieved!",
        color: "gold",
    },
];

/// Looks up the benefit entry for an exact level, if one is defined.
pub fn benefits_for_level(level: u32) -> Option<&'static LevelBenefit> {
    LEVEL_BENEFITS.iter().find(|benefit| benefit.level == level)
}
