//! Application facade wiring the stores and the automation engine.
//!
//! [`App`] is the surface the (external) UI layer talks to: every primary
//! task mutation goes through it, and mutations that touch a field rules
//! trigger on (status or assignee) are handed to the automation engine
//! before the call returns. Fired-rule notifications come back in the
//! [`Evaluation`] for the caller to surface.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use flowboard_model::id::{MemberId, ProjectId, TaskId};
use flowboard_model::member::Member;
use flowboard_model::project::Project;
use flowboard_model::rule::{Action, Rule, Trigger};
use flowboard_model::task::{Task, TaskDraft, TaskPatch, TaskStatus};

use crate::automation::{AutomationEngine, Evaluation};
use crate::store::{MemberDirectory, ProjectStore, RuleStore, StoreError, TaskStore};

/// A project's tasks grouped into kanban columns, for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// The project the board belongs to.
    pub project: Project,
    /// Tasks in the `todo` column, creation order.
    pub todo: Vec<Task>,
    /// Tasks in the `inprogress` column, creation order.
    pub in_progress: Vec<Task>,
    /// Tasks in the `done` column, creation order.
    pub done: Vec<Task>,
}

/// Top-level application state: member directory, project/task/rule
/// stores, and the automation engine evaluating over them.
pub struct App {
    members: Arc<MemberDirectory>,
    projects: Arc<ProjectStore>,
    tasks: Arc<TaskStore>,
    rules: Arc<RuleStore>,
    engine: AutomationEngine,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an empty application with the default automation fuel
    /// margin.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(TaskStore::new());
        let rules = Arc::new(RuleStore::new());
        let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules));
        Self {
            members: Arc::new(MemberDirectory::new()),
            projects: Arc::new(ProjectStore::new()),
            tasks,
            rules,
            engine,
        }
    }

    /// Creates an empty application with a custom automation fuel margin.
    #[must_use]
    pub fn with_fuel_margin(fuel_margin: usize) -> Self {
        let mut app = Self::new();
        app.engine = AutomationEngine::new(Arc::clone(&app.tasks), Arc::clone(&app.rules))
            .with_fuel_margin(fuel_margin);
        app
    }

    /// The member directory.
    #[must_use]
    pub fn members(&self) -> &MemberDirectory {
        &self.members
    }

    /// The project store.
    #[must_use]
    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    /// The task store.
    #[must_use]
    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    /// The rule store.
    #[must_use]
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Registers a new team member.
    pub fn register_member(&self, name: &str, email: &str, avatar_url: Option<&str>) -> Member {
        let member = Member::new(name, email, avatar_url);
        self.members.insert(member.clone());
        info!(member = %member.id, name = %member.name, "member registered");
        member
    }

    /// Creates a project owned by a registered member.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MemberNotFound`] if the owner is not
    /// registered.
    pub fn create_project(
        &self,
        title: &str,
        description: &str,
        owner_id: &MemberId,
    ) -> Result<Project, StoreError> {
        if !self.members.contains(owner_id) {
            return Err(StoreError::MemberNotFound(owner_id.clone()));
        }
        let project = self.projects.create(title, description, owner_id.clone());
        info!(project = %project.id, title = %project.title, "project created");
        Ok(project)
    }

    /// Adds a registered member to a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MemberNotFound`] if the member is not
    /// registered, or [`StoreError::ProjectNotFound`] for an unknown
    /// project.
    pub fn add_project_member(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<Project, StoreError> {
        if !self.members.contains(member_id) {
            return Err(StoreError::MemberNotFound(member_id.clone()));
        }
        self.projects.add_member(project_id, member_id.clone())
    }

    /// Creates a task and evaluates the project's rules against it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] for an unknown project or
    /// [`StoreError::InvalidTask`] for an invalid title.
    pub fn create_task(&self, draft: TaskDraft) -> Result<Evaluation, StoreError> {
        self.projects.get(&draft.project_id)?;
        let task = self.tasks.create(draft)?;
        info!(task = %task.id, title = %task.title, "task created");
        self.engine.on_task_changed(&task)
    }

    /// Applies a partial update to a task.
    ///
    /// The automation engine runs only when the patch touches a field
    /// rules trigger on (status or assignee); other edits return an
    /// empty evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] for an unknown task or
    /// [`StoreError::InvalidTask`] for an invalid title.
    pub fn update_task(
        &self,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Evaluation, StoreError> {
        let evaluate = patch.affects_automation();
        let task = self.tasks.apply(task_id, patch)?;
        if evaluate {
            self.engine.on_task_changed(&task)
        } else {
            Ok(Evaluation::unchanged(task))
        }
    }

    /// Moves a task to a kanban column (the drag-and-drop path).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] for an unknown task.
    pub fn move_task(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> Result<Evaluation, StoreError> {
        let eval = self.update_task(task_id, &TaskPatch::default().with_status(status))?;
        info!(task = %task_id, status = %status, "task moved");
        Ok(eval)
    }

    /// Assigns a task to a member, or clears the assignee with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MemberNotFound`] if the assignee is not
    /// registered, or [`StoreError::TaskNotFound`] for an unknown task.
    pub fn assign_task(
        &self,
        task_id: &TaskId,
        assignee_id: Option<MemberId>,
    ) -> Result<Evaluation, StoreError> {
        if let Some(assignee_id) = &assignee_id {
            if !self.members.contains(assignee_id) {
                return Err(StoreError::MemberNotFound(assignee_id.clone()));
            }
        }
        self.update_task(task_id, &TaskPatch::default().with_assignee(assignee_id))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] for an unknown task.
    pub fn delete_task(&self, task_id: &TaskId) -> Result<(), StoreError> {
        self.tasks.delete(task_id)?;
        info!(task = %task_id, "task deleted");
        Ok(())
    }

    /// Creates an automation rule scoped to a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] for an unknown project.
    pub fn create_rule(
        &self,
        project_id: &ProjectId,
        name: &str,
        trigger: Trigger,
        action: Action,
    ) -> Result<Rule, StoreError> {
        self.projects.get(project_id)?;
        let rule = self
            .rules
            .create(project_id.clone(), name, trigger, action);
        info!(rule = %rule.id, name = %rule.name, "automation rule created");
        Ok(rule)
    }

    /// Returns a project's tasks grouped into kanban columns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] for an unknown project.
    pub fn board(&self, project_id: &ProjectId) -> Result<Board, StoreError> {
        let project = self.projects.get(project_id)?;
        let mut board = Board {
            project,
            todo: Vec::new(),
            in_progress: Vec::new(),
            done: Vec::new(),
        };
        for task in self.tasks.list_by_project(project_id) {
            match task.status {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
            }
        }
        Ok(board)
    }
}
