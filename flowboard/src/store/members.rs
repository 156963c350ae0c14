//! Directory of team members.

use parking_lot::RwLock;

use flowboard_model::id::MemberId;
use flowboard_model::member::Member;

use super::StoreError;

/// In-memory member directory.
///
/// Members are immutable once registered; the directory only grows.
/// Listing order is registration order.
#[derive(Default)]
pub struct MemberDirectory {
    members: RwLock<Vec<Member>>,
}

impl MemberDirectory {
    /// Creates a new, empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member.
    pub fn insert(&self, member: Member) {
        self.members.write().push(member);
    }

    /// Returns a snapshot of the member with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MemberNotFound`] if the ID is unknown.
    pub fn get(&self, member_id: &MemberId) -> Result<Member, StoreError> {
        self.members
            .read()
            .iter()
            .find(|m| m.id == *member_id)
            .cloned()
            .ok_or_else(|| StoreError::MemberNotFound(member_id.clone()))
    }

    /// Returns `true` if a member with the given ID is registered.
    #[must_use]
    pub fn contains(&self, member_id: &MemberId) -> bool {
        self.members.read().iter().any(|m| m.id == *member_id)
    }

    /// Returns all members in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Member> {
        self.members.read().clone()
    }
}
