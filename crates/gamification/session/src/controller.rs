//! Stateful per-session orchestrator.
//!
//! The controller holds one in-memory snapshot for the signed-in user,
//! applies engine-computed transitions to it, writes through the snapshot
//! store, and broadcasts every committed mutation to display subscribers.
//! Operations are synchronous and run to completion; persistence happens
//! before the broadcast so subscribers always observe durable-or-logged
//! state.

use gamification_core::{
    Achievement, ConfigError, Engine, GamificationConfig, LevelBenefit, ProgressSnapshot,
    benefits_for_level,
};

use crate::clock::{Clock, SystemClock};
use crate::events::{GamificationUpdate, SubscriberId, SubscriberSet};
use crate::store::{MemoryStore, SnapshotStore};

/// Errors surfaced by the session controller.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("controller is not initialized with a user")]
    NotInitialized,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Builder for [`GamificationController`].
///
/// The store defaults to [`MemoryStore`] and the clock to [`SystemClock`];
/// the configuration is validated when `build` constructs the engine.
pub struct ControllerBuilder {
    config: GamificationConfig,
    store: Option<Box<dyn SnapshotStore>>,
    clock: Option<Box<dyn Clock>>,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self {
            config: GamificationConfig::default(),
            store: None,
            clock: None,
        }
    }

    pub fn config(mut self, config: GamificationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> Result<GamificationController> {
        let engine = Engine::new(self.config)?;
        Ok(GamificationController {
            engine,
            store: self.store.unwrap_or_else(|| Box::new(MemoryStore::new())),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            snapshot: None,
            new_achievements: Vec::new(),
            subscribers: SubscriberSet::new(),
        })
    }
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session gamification orchestrator.
///
/// Exactly one instance exists per active user session; it is constructed
/// explicitly and passed to consuming views rather than living in an
/// ambient global. No cross-session coordination exists: two sessions
/// pointed at the same underlying storage race last-write-wins.
pub struct GamificationController {
    engine: Engine,
    store: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    snapshot: Option<ProgressSnapshot>,
    new_achievements: Vec<Achievement>,
    subscribers: SubscriberSet,
}

impl GamificationController {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    /// Load the user's snapshot from the store, or create and persist a
    /// fresh one.
    ///
    /// Idempotent: re-initializing with the user already loaded is a no-op
    /// returning the existing snapshot. Initializing a different user
    /// replaces the session state (and drops the pending-animation buffer).
    /// A failed or corrupt read is treated as "no prior snapshot".
    pub fn initialize(&mut self, user_id: &str) -> &ProgressSnapshot {
        if self.snapshot.as_ref().is_none_or(|s| s.user_id != user_id) {
            let snapshot = self.load_or_create(user_id);
            self.new_achievements.clear();
            self.snapshot = Some(snapshot);
        }
        self.snapshot
            .as_ref()
            .expect("snapshot is set by the branch above")
    }

    /// Record a confirmed activity join and award points for it.
    ///
    /// Callers invoke this only after the authoritative remote join has
    /// succeeded; there is no rollback path. Returns the points awarded,
    /// including the combo bonus when this was the day's 3rd join.
    pub fn join_activity(&mut self) -> Result<u32> {
        let today = self.clock.today();
        let now = self.clock.now();
        let mut snapshot = self.snapshot.take().ok_or(SessionError::NotInitialized)?;

        if snapshot.last_login_date != Some(today) {
            snapshot.activities_joined_today = 0;
        }
        snapshot.activities_joined_today += 1;
        snapshot.last_login_date = Some(today);
        snapshot.total_activities_joined += 1;

        let points = self
            .engine
            .points_for_activity_join(snapshot.activities_joined_today);
        let config = self.engine.config();
        let mut reason = format!("Joined activity (+{} points)", config.points_per_activity);
        if snapshot.activities_joined_today == GamificationConfig::COMBO_JOIN_COUNT {
            reason.push_str(&format!(
                " + Triple Activity Bonus (+{} points)",
                config.triple_activity_bonus
            ));
        }

        let mut awarded = vec![Achievement::points_earned(points, reason, now)];
        awarded.extend(self.engine.derive_achievements(&snapshot, today, now));

        self.commit(snapshot, awarded);
        Ok(points)
    }

    /// Claim the daily bonus if this is the first visit of the calendar
    /// day.
    ///
    /// On claim: streak adjusts (increment iff the previous recorded date
    /// was exactly yesterday, else reset to 1), the same-day join counter
    /// resets, and the bonus is awarded. Returns false with no state change
    /// and no broadcast when the bonus was already evaluated today.
    pub fn check_daily_bonus(&mut self) -> Result<bool> {
        let today = self.clock.today();
        let now = self.clock.now();
        let snapshot = self.snapshot.as_ref().ok_or(SessionError::NotInitialized)?;

        if !Engine::is_daily_bonus_available(snapshot.last_login_date, today) {
            return Ok(false);
        }

        let mut snapshot = self.snapshot.take().ok_or(SessionError::NotInitialized)?;
        let continued = snapshot
            .last_login_date
            .is_some_and(|last| Some(last) == today.pred_opt());
        snapshot.streak_days = if continued { snapshot.streak_days + 1 } else { 1 };
        snapshot.last_login_date = Some(today);
        snapshot.activities_joined_today = 0;

        let mut awarded = Vec::new();
        if !snapshot.contains_achievement(&Achievement::daily_visitor_id(today)) {
            awarded.push(Achievement::daily_visitor(
                self.engine.config().daily_login_bonus,
                today,
                now,
            ));
        }

        self.commit(snapshot, awarded);
        Ok(true)
    }

    /// Generic point award; the reason becomes the achievement description.
    pub fn add_points(&mut self, points: u32, reason: impl Into<String>) -> Result<()> {
        let now = self.clock.now();
        let snapshot = self.snapshot.take().ok_or(SessionError::NotInitialized)?;
        let awarded = vec![Achievement::points_earned(points, reason, now)];
        self.commit(snapshot, awarded);
        Ok(())
    }

    /// Clear the pending-animation buffer. The persisted achievement log is
    /// untouched.
    pub fn clear_achievements(&mut self) {
        self.new_achievements.clear();
    }

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&GamificationUpdate) + 'static,
    ) -> SubscriberId {
        self.subscribers.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ===== derived values =====

    pub fn snapshot(&self) -> Option<&ProgressSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn current_level(&self) -> u32 {
        self.snapshot.as_ref().map_or(1, |s| s.level)
    }

    pub fn total_points(&self) -> u32 {
        self.snapshot.as_ref().map_or(0, |s| s.total_points)
    }

    pub fn activities_joined_today(&self) -> u32 {
        self.snapshot.as_ref().map_or(0, |s| s.activities_joined_today)
    }

    pub fn streak_days(&self) -> u32 {
        self.snapshot.as_ref().map_or(0, |s| s.streak_days)
    }

    pub fn next_level_threshold(&self) -> u32 {
        self.engine.next_level_threshold(self.current_level())
    }

    pub fn progress_to_next_level(&self) -> f64 {
        self.snapshot.as_ref().map_or(0.0, |s| {
            self.engine.progress_to_next_level(s.total_points, s.level)
        })
    }

    pub fn level_benefits(&self) -> Option<&'static LevelBenefit> {
        benefits_for_level(self.current_level())
    }

    /// Achievements minted since the last [`clear_achievements`] call,
    /// oldest first. Display widgets drain this to drive one-shot
    /// animations.
    ///
    /// [`clear_achievements`]: Self::clear_achievements
    pub fn new_achievements(&self) -> &[Achievement] {
        &self.new_achievements
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    // ===== internals =====

    fn load_or_create(&self, user_id: &str) -> ProgressSnapshot {
        match self.store.load(user_id) {
            Ok(Some(snapshot)) => {
                tracing::debug!(user_id, "restored persisted snapshot");
                snapshot
            }
            Ok(None) => self.create_fresh(user_id),
            Err(error) => {
                tracing::warn!(user_id, %error, "snapshot read failed, starting fresh");
                self.create_fresh(user_id)
            }
        }
    }

    fn create_fresh(&self, user_id: &str) -> ProgressSnapshot {
        let snapshot = ProgressSnapshot::new(user_id);
        self.persist(&snapshot);
        tracing::debug!(user_id, "created fresh snapshot");
        snapshot
    }

    /// Applies an award batch: points, level recomputation, log append,
    /// write-through, broadcast. Runs even for an empty batch so
    /// non-awarding mutations (streak bookkeeping) still persist and
    /// notify.
    fn commit(&mut self, mut snapshot: ProgressSnapshot, mut awarded: Vec<Achievement>) {
        let points: u32 = awarded.iter().map(|a| a.points).sum();
        snapshot.total_points += points;

        let previous_level = snapshot.level;
        snapshot.level = self.engine.level_for_points(snapshot.total_points);
        if snapshot.level > previous_level {
            awarded.push(Achievement::level_unlocked(snapshot.level, self.clock.now()));
        }

        snapshot.achievements.extend(awarded.iter().cloned());
        self.new_achievements.extend(awarded.iter().cloned());

        self.persist(&snapshot);

        let update = GamificationUpdate {
            snapshot: snapshot.clone(),
            new_achievements: awarded,
        };
        self.snapshot = Some(snapshot);
        self.subscribers.emit(&update);
    }

    /// Write-through. A failed write is logged and swallowed; the
    /// in-memory snapshot stays authoritative for the rest of the session.
    fn persist(&self, snapshot: &ProgressSnapshot) {
        if let Err(error) = self.store.save(&snapshot.user_id, snapshot) {
            tracing::warn!(
                user_id = %snapshot.user_id,
                %error,
                "snapshot write failed, keeping in-memory state"
            );
        }
    }
}
