//! Task model for Flowboard kanban boards.
//!
//! A [`Task`] always lives in exactly one kanban column ([`TaskStatus`]) of
//! one project. Mutations are expressed as a [`TaskPatch`], which can only
//! name the mutable fields; `id`, `project_id`, and `created_at` are not
//! representable in a patch and therefore immutable for the task's lifetime.

use serde::{Deserialize, Serialize};

use crate::id::{MemberId, ProjectId, TaskId};
use crate::time::Timestamp;

/// Maximum allowed task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// Kanban column a task currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "inprogress"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single unit of work on a project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (UUID v7, time-ordered).
    pub id: TaskId,
    /// Project this task belongs to. Fixed at creation.
    pub project_id: ProjectId,
    /// Short task title (1..=256 characters).
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Kanban column the task currently sits in.
    pub status: TaskStatus,
    /// Member the task is assigned to, if any.
    pub assignee_id: Option<MemberId>,
    /// Optional due timestamp.
    pub due_date: Option<Timestamp>,
    /// When the task was created. Fixed at creation.
    pub created_at: Timestamp,
    /// When the task was last mutated. Invariant: `updated_at >= created_at`.
    pub updated_at: Timestamp,
}

impl Task {
    /// Applies a patch to this task's mutable fields.
    ///
    /// Pure field overwrite: does NOT stamp `updated_at` (the task store
    /// owns timestamping) and does not validate the new title.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assignee_id) = &patch.assignee_id {
            self.assignee_id = assignee_id.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}

/// Caller-supplied fields for creating a task.
///
/// The task store assigns the id and stamps both timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Project the new task belongs to.
    pub project_id: ProjectId,
    /// Task title (validated against [`MAX_TASK_TITLE_LENGTH`]).
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Initial kanban column.
    pub status: TaskStatus,
    /// Initial assignee, if any.
    pub assignee_id: Option<MemberId>,
    /// Optional due timestamp.
    pub due_date: Option<Timestamp>,
}

impl TaskDraft {
    /// Creates a draft for an unassigned `todo` task with no due date.
    #[must_use]
    pub fn new(project_id: ProjectId, title: &str, description: &str) -> Self {
        Self {
            project_id,
            title: title.to_string(),
            description: description.to_string(),
            status: TaskStatus::Todo,
            assignee_id: None,
            due_date: None,
        }
    }

    /// Sets the initial kanban column.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// A partial update to a task.
///
/// `title`, `description`, and `status` are plain `Option`s (`None` = leave
/// unchanged). `assignee_id` and `due_date` are doubly optional so a patch
/// can distinguish "leave unchanged" (`None`) from "clear the field"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New kanban column, if changing.
    pub status: Option<TaskStatus>,
    /// New assignee: `Some(Some(id))` assigns, `Some(None)` clears.
    pub assignee_id: Option<Option<MemberId>>,
    /// New due date: `Some(Some(ts))` sets, `Some(None)` clears.
    pub due_date: Option<Option<Timestamp>>,
}

impl TaskPatch {
    /// Returns `true` if the patch names no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }

    /// Returns `true` if the patch touches a field that automation rules
    /// trigger on (status or assignee).
    #[must_use]
    pub const fn affects_automation(&self) -> bool {
        self.status.is_some() || self.assignee_id.is_some()
    }

    /// Sets the kanban column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: Option<MemberId>) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<Timestamp>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Error returned when task data fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Task title is empty.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Task title exceeds the maximum length.
    #[error("task title too long (max {MAX_TASK_TITLE_LENGTH} characters)")]
    TitleTooLong,
    /// Status string is not one of `todo`, `inprogress`, `done`.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),
}

/// Validates a task title for creation or patching.
///
/// # Errors
///
/// Returns [`ValidationError::TitleEmpty`] if the title is empty, or
/// [`ValidationError::TitleTooLong`] if it exceeds
/// [`MAX_TASK_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleEmpty);
    }
    if title.chars().count() > MAX_TASK_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}
