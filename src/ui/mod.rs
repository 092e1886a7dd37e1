//! Presentation adapter
//!
//! Mirrors engine state into observable UI fields and forwards user commands.
//! Renderers read from [`TourController`] and never touch the event bus.

mod controller;
mod state;

pub use controller::TourController;
pub use state::TourView;
