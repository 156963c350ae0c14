//! Automation rule evaluation and dispatch.
//!
//! After any primary task mutation, the surrounding application hands the
//! resulting task state to [`AutomationEngine::on_task_changed`]. The
//! engine matches the project's rules against it, applies their actions
//! through the task store, and re-evaluates after every real mutation
//! until a fixed point — bounded by a fuel guard so mutually-triggering
//! rules cannot loop forever.

pub mod engine;

pub use engine::{AutomationEngine, DEFAULT_FUEL_MARGIN, Evaluation};
