//! Project store.

use parking_lot::RwLock;
use tracing::debug;

use flowboard_model::id::{MemberId, ProjectId};
use flowboard_model::project::Project;
use flowboard_model::time::Timestamp;

use super::StoreError;

/// In-memory project store.
///
/// Listing order is creation order (projects are appended, never
/// reordered).
#[derive(Default)]
pub struct ProjectStore {
    projects: RwLock<Vec<Project>>,
}

impl ProjectStore {
    /// Creates a new, empty project store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a project owned by the given member.
    pub fn create(&self, title: &str, description: &str, owner_id: MemberId) -> Project {
        let project = Project::new(title, description, owner_id);
        self.projects.write().push(project.clone());
        debug!(project = %project.id, title = %project.title, "project created");
        project
    }

    /// Returns a snapshot of the project with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] if the ID is unknown.
    pub fn get(&self, project_id: &ProjectId) -> Result<Project, StoreError> {
        self.projects
            .read()
            .iter()
            .find(|p| p.id == *project_id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.clone()))
    }

    /// Returns all projects in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<Project> {
        self.projects.read().clone()
    }

    /// Adds a member to a project's display-ordered member list.
    /// Idempotent for members already on the project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProjectNotFound`] if the ID is unknown.
    pub fn add_member(
        &self,
        project_id: &ProjectId,
        member_id: MemberId,
    ) -> Result<Project, StoreError> {
        let mut projects = self.projects.write();
        let project = projects
            .iter_mut()
            .find(|p| p.id == *project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.clone()))?;
        project.add_member(member_id);
        project.updated_at = Timestamp::now().max(project.created_at);
        Ok(project.clone())
    }
}
