//! Team member records.

use serde::{Deserialize, Serialize};

use crate::id::MemberId;

/// A team member who can own projects and be assigned tasks.
///
/// Members are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier (UUID v7, time-ordered).
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Optional avatar image URL.
    pub avatar_url: Option<String>,
}

impl Member {
    /// Creates a member with a fresh identifier.
    #[must_use]
    pub fn new(name: &str, email: &str, avatar_url: Option<&str>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.to_string(),
            email: email.to_string(),
            avatar_url: avatar_url.map(ToString::to_string),
        }
    }
}
