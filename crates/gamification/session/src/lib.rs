//! Per-session orchestration for the gamification core.
//!
//! This crate wires the pure rule engine to device-local persistence and
//! display subscribers. Consumers construct one [`GamificationController`]
//! per signed-in user through [`ControllerBuilder`], drive it from UI
//! actions (activity joined, session started), and subscribe widgets to the
//! post-mutation broadcasts.
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the orchestrator and builder
//! - [`store`] provides the snapshot persistence contract and its
//!   in-memory and file-backed implementations
//! - [`events`] defines the broadcast payload and subscriber registry
//! - [`clock`] abstracts the time source so rule evaluation is testable
pub mod clock;
pub mod controller;
pub mod events;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{ControllerBuilder, GamificationController, SessionError};
pub use events::{GamificationUpdate, SubscriberId};
pub use store::{FileStore, MemoryStore, SnapshotStore, StoreError};
