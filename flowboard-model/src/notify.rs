//! Notification payloads produced by automation rule evaluation.
//!
//! When a rule fires, the engine records a [`RuleFired`] describing the
//! observable change it made. The surrounding application surfaces these
//! to the user (the CLI prints them; a UI would show toasts).

use serde::{Deserialize, Serialize};

use crate::id::{MemberId, RuleId};
use crate::task::{TaskPatch, TaskStatus};

/// The observable state change a rule's action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedChange {
    /// The task moved between kanban columns.
    Status {
        /// Column before the action.
        from: TaskStatus,
        /// Column after the action.
        to: TaskStatus,
    },
    /// The task's assignee changed.
    Assignee {
        /// Assignee before the action.
        from: Option<MemberId>,
        /// Assignee after the action.
        to: Option<MemberId>,
    },
}

/// Notification that an automation rule fired and changed a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFired {
    /// The rule that fired.
    pub rule_id: RuleId,
    /// The rule's human-readable name, for display.
    pub rule_name: String,
    /// What the rule's action changed.
    pub change: AppliedChange,
}

impl std::fmt::Display for RuleFired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.change {
            AppliedChange::Status { to, .. } => {
                write!(f, "\"{}\" moved task to {to}", self.rule_name)
            }
            AppliedChange::Assignee { to: Some(to), .. } => {
                write!(f, "\"{}\" assigned task to {to}", self.rule_name)
            }
            AppliedChange::Assignee { to: None, .. } => {
                write!(f, "\"{}\" unassigned task", self.rule_name)
            }
        }
    }
}

/// A planned (not yet applied) rule action: the patch to run through the
/// task store plus the change descriptor to report if it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    /// The partial update the action wants applied.
    pub patch: TaskPatch,
    /// The observable change that patch represents.
    pub change: AppliedChange,
}
