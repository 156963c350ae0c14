//! Automation rule definitions: triggers, actions, and the rules that
//! pair them.
//!
//! Triggers and actions are tagged enums, one variant per kind, each
//! carrying only the fields it needs. The serde tag names (`task_moved`,
//! `assign_task`, ...) are the external rule-builder names, so rule data
//! round-trips through JSON unchanged.
//!
//! Two kinds are reserved: the `due_date_passed` trigger and the
//! `send_notification` action parse and store fine but are never evaluated
//! or executed ([`Trigger::is_active`] / [`Action::is_active`] return
//! `false`). The engine surfaces rules carrying them as configuration
//! warnings and skips them.

use serde::{Deserialize, Serialize};

use crate::id::{MemberId, ProjectId, RuleId};
use crate::notify::{AppliedChange, PlannedChange};
use crate::task::{Task, TaskPatch, TaskStatus};

/// Predicate over a task's current state that decides whether a rule's
/// action should apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Matches when the task sits in the given kanban column.
    TaskMoved {
        /// Column to match against.
        status: TaskStatus,
    },
    /// Matches when the task is assigned to the given member.
    TaskAssigned {
        /// Assignee to match against.
        assignee_id: MemberId,
    },
    /// Reserved: never matches. Kept so rule data carrying it round-trips.
    DueDatePassed,
}

impl Trigger {
    /// Returns `false` for reserved trigger kinds that are never evaluated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::DueDatePassed)
    }

    /// Tests this trigger against a task's current state.
    ///
    /// Level-triggered: the predicate looks only at the state as it is
    /// now, not at what changed. Reserved kinds never match.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::TaskMoved { status } => task.status == *status,
            Self::TaskAssigned { assignee_id } => task.assignee_id.as_ref() == Some(assignee_id),
            Self::DueDatePassed => false,
        }
    }
}

/// Mutation template applied to a task when its rule's trigger matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Moves the task to the given kanban column.
    MoveTask {
        /// Target column.
        status: TaskStatus,
    },
    /// Assigns the task to the given member.
    AssignTask {
        /// Target assignee.
        assignee_id: MemberId,
    },
    /// Reserved: never executed. Kept so rule data carrying it round-trips.
    SendNotification,
}

impl Action {
    /// Returns `false` for reserved action kinds that are never executed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::SendNotification)
    }

    /// Plans this action against a task's current state.
    ///
    /// Returns the patch to apply plus a change descriptor, or `None` when
    /// the action would not change observable state. That no-op
    /// suppression is what makes repeated evaluation idempotent and
    /// cascades terminating: an action that changes nothing must not
    /// produce a mutation event or a notification.
    #[must_use]
    pub fn plan(&self, task: &Task) -> Option<PlannedChange> {
        match self {
            Self::MoveTask { status } => {
                if task.status == *status {
                    return None;
                }
                Some(PlannedChange {
                    patch: TaskPatch::default().with_status(*status),
                    change: AppliedChange::Status {
                        from: task.status,
                        to: *status,
                    },
                })
            }
            Self::AssignTask { assignee_id } => {
                if task.assignee_id.as_ref() == Some(assignee_id) {
                    return None;
                }
                Some(PlannedChange {
                    patch: TaskPatch::default().with_assignee(Some(assignee_id.clone())),
                    change: AppliedChange::Assignee {
                        from: task.assignee_id.clone(),
                        to: Some(assignee_id.clone()),
                    },
                })
            }
            Self::SendNotification => None,
        }
    }
}

/// A trigger/action pair scoped to a single project.
///
/// Rules are created by the rule builder and immutable afterwards; they
/// are only ever evaluated against tasks of their own project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier (UUID v7, time-ordered).
    pub id: RuleId,
    /// Project this rule belongs to.
    pub project_id: ProjectId,
    /// Human-readable rule name, shown in notifications.
    pub name: String,
    /// When the rule fires.
    pub trigger: Trigger,
    /// What the rule does.
    pub action: Action,
}
