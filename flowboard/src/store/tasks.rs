//! Single source of truth for task records.
//!
//! [`TaskStore::apply`] is the only operation that mutates a task, and
//! every mutation stamps `updated_at`. The fields a [`TaskPatch`] cannot
//! name (`id`, `project_id`, `created_at`) are immutable for the task's
//! lifetime.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use flowboard_model::id::{ProjectId, TaskId};
use flowboard_model::task::{self, Task, TaskDraft, TaskPatch};
use flowboard_model::time::Timestamp;

use super::StoreError;

/// In-memory task store keyed by [`TaskId`].
///
/// Thread-safe via [`RwLock`]; clones records out so readers never observe
/// a partially-updated task.
#[derive(Default)]
pub struct TaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl TaskStore {
    /// Creates a new, empty task store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a task from a draft, assigning a fresh identifier and
    /// stamping both timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTask`] if the draft's title fails
    /// validation.
    pub fn create(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        task::validate_title(&draft.title)?;
        let now = Timestamp::now();
        let created = Task {
            id: TaskId::new(),
            project_id: draft.project_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            assignee_id: draft.assignee_id,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks
            .write()
            .insert(created.id.clone(), created.clone());
        debug!(task = %created.id, title = %created.title, "task created");
        Ok(created)
    }

    /// Returns a snapshot of the task with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the ID is unknown.
    pub fn get(&self, task_id: &TaskId) -> Result<Task, StoreError> {
        self.tasks
            .read()
            .get(task_id)
            .cloned()
            .ok_or_else(|| StoreError::TaskNotFound(task_id.clone()))
    }

    /// Returns all tasks of a project in stable creation order.
    #[must_use]
    pub fn list_by_project(&self, project_id: &ProjectId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .values()
            .filter(|t| t.project_id == *project_id)
            .cloned()
            .collect();
        // created_at has millisecond resolution; the time-ordered id
        // breaks ties deterministically.
        tasks.sort_by_key(|t| (t.created_at, *t.id.as_uuid()));
        tasks
    }

    /// Applies a partial update to a task and stamps `updated_at`.
    ///
    /// Only the fields named by the patch are overwritten. An empty patch
    /// is still a mutation (it refreshes `updated_at`); callers that need
    /// no-op detection do it before calling, as the automation engine does.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the ID is unknown, or
    /// [`StoreError::InvalidTask`] if the patch carries an invalid title.
    pub fn apply(&self, task_id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        if let Some(title) = &patch.title {
            task::validate_title(title)?;
        }
        let mut tasks = self.tasks.write();
        let current = tasks
            .get_mut(task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.clone()))?;
        current.apply_patch(patch);
        // Clamped so `updated_at >= created_at` holds even if the wall
        // clock stepped backwards between create and apply.
        current.updated_at = Timestamp::now().max(current.created_at);
        debug!(task = %current.id, "task updated");
        Ok(current.clone())
    }

    /// Removes a task.
    ///
    /// Deleting an unknown ID is an error, consistent with [`get`] and
    /// [`apply`] (documented policy; see DESIGN.md).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the ID is unknown.
    ///
    /// [`get`]: TaskStore::get
    /// [`apply`]: TaskStore::apply
    pub fn delete(&self, task_id: &TaskId) -> Result<(), StoreError> {
        match self.tasks.write().remove(task_id) {
            Some(removed) => {
                debug!(task = %removed.id, title = %removed.title, "task deleted");
                Ok(())
            }
            None => Err(StoreError::TaskNotFound(task_id.clone())),
        }
    }

    /// Returns the total number of tasks across all projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Returns `true` if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}
