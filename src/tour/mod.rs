/// Guided tour module
///
/// Drives an onboarding walkthrough over named flows of ordered steps,
/// with a checklist of independently completable tasks.
///
/// ## Architecture
///
/// ```text
/// TourEngine
///   ├── TourState (active flow, current step, completed steps, checklist)
///   ├── Flow / Step / ChecklistItem (static configuration)
///   └── EventBus (synchronous observers, per event kind)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use onboarding_tour::{TourConfig, TourEngine};
///
/// let mut engine = TourEngine::new(TourConfig::dashboard_demo());
///
/// engine.start_flow("dashboard-tour");
/// while let Some(step) = engine.current_step() {
///     // Render tooltip for step.target
///     engine.next_step();
/// }
/// ```

pub mod flow;
pub mod state;
pub mod engine;

// Re-export commonly used types
pub use flow::{ChecklistItem, Flow, Placement, Step};
pub use state::TourState;
pub use engine::{SharedEngine, TourEngine};
