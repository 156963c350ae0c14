//! Automation rule registry.
//!
//! Rules live in an insertion-ordered `Vec`, which makes rule creation
//! order a structural property: [`RuleStore::for_project`] returns rules
//! in exactly the order they were created, and that order is the
//! engine's evaluation order.

use parking_lot::RwLock;
use tracing::debug;

use flowboard_model::id::{ProjectId, RuleId};
use flowboard_model::rule::{Action, Rule, Trigger};

use super::StoreError;

/// In-memory, insertion-ordered rule registry.
///
/// The automation engine only reads from this store (via
/// [`for_project`](RuleStore::for_project)); rule CRUD belongs to the
/// surrounding application.
#[derive(Default)]
pub struct RuleStore {
    rules: RwLock<Vec<Rule>>,
}

impl RuleStore {
    /// Creates a new, empty rule store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule scoped to the given project.
    pub fn create(
        &self,
        project_id: ProjectId,
        name: &str,
        trigger: Trigger,
        action: Action,
    ) -> Rule {
        let rule = Rule {
            id: RuleId::new(),
            project_id,
            name: name.to_string(),
            trigger,
            action,
        };
        self.rules.write().push(rule.clone());
        debug!(rule = %rule.id, name = %rule.name, "automation rule created");
        rule
    }

    /// Returns the rules scoped to a project, in creation order.
    ///
    /// This is the read-only query the automation engine evaluates
    /// against; first-created rules evaluate first.
    #[must_use]
    pub fn for_project(&self, project_id: &ProjectId) -> Vec<Rule> {
        self.rules
            .read()
            .iter()
            .filter(|r| r.project_id == *project_id)
            .cloned()
            .collect()
    }

    /// Returns all rules in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<Rule> {
        self.rules.read().clone()
    }

    /// Removes a rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RuleNotFound`] if the ID is unknown.
    pub fn delete(&self, rule_id: &RuleId) -> Result<(), StoreError> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| r.id != *rule_id);
        if rules.len() == before {
            return Err(StoreError::RuleNotFound(rule_id.clone()));
        }
        Ok(())
    }
}
