//! Onboarding tour sequencing engine.
//!
//! A [`TourEngine`] walks a user through named flows of steps, keeps a
//! checklist of independently completable tasks, and notifies observers
//! synchronously on every state change. [`TourController`] mirrors the engine
//! into UI-facing state; [`layout`] computes overlay geometry.

pub mod config;
pub mod error;
pub mod layout;
pub mod messaging;
pub mod tour;
pub mod ui;

pub use config::TourConfig;
pub use error::{AppResult, ConfigError};
pub use messaging::{CommandOutcome, EventKind, EventPayload, IgnoreReason, SubscriptionId, TourCommand, TourEvent};
pub use tour::{ChecklistItem, Flow, Placement, SharedEngine, Step, TourEngine, TourState};
pub use ui::{TourController, TourView};
