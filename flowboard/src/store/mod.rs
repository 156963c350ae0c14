//! In-memory stores holding the authoritative application state.
//!
//! Each store owns one entity collection behind a [`parking_lot::RwLock`]
//! so it can be shared via `Arc` between the app facade and the automation
//! engine. The [`TaskStore`] is the sole mutation surface for task state;
//! the engine never holds task copies of its own beyond the working value
//! it threads through an evaluation.

pub mod members;
pub mod projects;
pub mod rules;
pub mod tasks;

pub use members::MemberDirectory;
pub use projects::ProjectStore;
pub use rules::RuleStore;
pub use tasks::TaskStore;

use flowboard_model::id::{MemberId, ProjectId, RuleId, TaskId};
use flowboard_model::task::ValidationError;
use thiserror::Error;

/// Errors raised by the stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Project with the given ID was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Member with the given ID was not found.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    /// Rule with the given ID was not found.
    #[error("rule not found: {0}")]
    RuleNotFound(RuleId),
    /// Task data failed validation.
    #[error("invalid task: {0}")]
    InvalidTask(#[from] ValidationError),
}
