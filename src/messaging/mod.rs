/// Messaging module for the Event/Command architecture
///
/// This module implements the Event/Command segregation pattern:
/// - **Events**: Notifications of things that happened (past tense, fan-out)
/// - **Commands**: Requests to change tour state (imperative, targeted)
///
/// ## Architecture
///
/// ```text
/// ┌─────────┐   TourCommand   ┌────────────┐   TourEvent   ┌───────────┐
/// │   UI    │ ──────────────> │ TourEngine │ ────────────> │ Event Bus │
/// └─────────┘                 └────────────┘               └───────────┘
///                                                                │
///                                                                │ Synchronous,
///                                                                ▼ registration order
///                                                          ┌───────────┐
///                                                          │ Observers │
///                                                          └───────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let mut engine = TourEngine::new(config);
///
/// let id = engine.on(EventKind::StepChanged, |event, state| {
///     println!("{} ({} completed)", event.description(), state.completed_count());
/// });
///
/// engine.start_flow("dashboard-tour");
/// engine.next_step();
///
/// engine.off(id);
/// ```

pub mod events;
pub mod commands;
pub mod bus;

// Re-export commonly used types
pub use events::{EventKind, EventPayload, TourEvent};
pub use commands::{CommandOutcome, IgnoreReason, TourCommand};
pub use bus::{Callback, EventBus, SubscriptionId};
