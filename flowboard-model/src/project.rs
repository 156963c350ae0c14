//! Project records grouping tasks, members, and automation rules.

use serde::{Deserialize, Serialize};

use crate::id::{MemberId, ProjectId};
use crate::time::Timestamp;

/// A project: a kanban board with an ordered member list.
///
/// Invariant: the owner is always a member. [`Project::new`] puts the owner
/// first in the member list, and nothing removes members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier (UUID v7, time-ordered).
    pub id: ProjectId,
    /// Project title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Member who owns the project.
    pub owner_id: MemberId,
    /// Member list; insertion order is display order. The owner is first.
    pub members: Vec<MemberId>,
    /// When the project was created.
    pub created_at: Timestamp,
    /// When the project was last mutated.
    pub updated_at: Timestamp,
}

impl Project {
    /// Creates a project owned by `owner_id`, with the owner as the sole
    /// initial member.
    #[must_use]
    pub fn new(title: &str, description: &str, owner_id: MemberId) -> Self {
        let now = Timestamp::now();
        Self {
            id: ProjectId::new(),
            title: title.to_string(),
            description: description.to_string(),
            members: vec![owner_id.clone()],
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` if the given member belongs to this project.
    #[must_use]
    pub fn is_member(&self, member_id: &MemberId) -> bool {
        self.members.contains(member_id)
    }

    /// Appends a member to the display-ordered list. Idempotent: adding an
    /// existing member keeps its original position.
    pub fn add_member(&mut self, member_id: MemberId) {
        if !self.is_member(&member_id) {
            self.members.push(member_id);
        }
    }
}
