//! The rule evaluation engine.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use flowboard_model::notify::RuleFired;
use flowboard_model::task::Task;

use crate::store::{RuleStore, StoreError, TaskStore};

/// Extra evaluation fuel granted beyond one unit per active project rule.
///
/// The fuel budget for one evaluation is `active_rules + margin`: enough
/// for every rule to fire once plus headroom for legitimate chains, small
/// enough that a rule cycle is cut off almost immediately.
pub const DEFAULT_FUEL_MARGIN: usize = 8;

/// Result of evaluating a task against its project's rules.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// The task's final state, already persisted through the task store.
    pub task: Task,
    /// Rules that fired, in application order.
    pub fired: Vec<RuleFired>,
    /// Set when the fuel budget ran out before a fixed point was reached
    /// (a rule cycle). The task keeps its last-computed state.
    pub cycle_detected: bool,
}

impl Evaluation {
    /// An evaluation that looked at nothing and changed nothing.
    #[must_use]
    pub const fn unchanged(task: Task) -> Self {
        Self {
            task,
            fired: Vec::new(),
            cycle_detected: false,
        }
    }
}

/// Evaluates project-scoped automation rules against mutated tasks.
///
/// The engine owns no task state: the task store is the single mutation
/// surface, and rules are read through the rule store's project query.
/// Evaluation is synchronous; one call processes the entire cascade
/// before returning, so callers must serialize concurrent mutations of
/// the same task.
pub struct AutomationEngine {
    tasks: Arc<TaskStore>,
    rules: Arc<RuleStore>,
    fuel_margin: usize,
}

impl AutomationEngine {
    /// Creates an engine over the given stores with the default fuel
    /// margin.
    #[must_use]
    pub fn new(tasks: Arc<TaskStore>, rules: Arc<RuleStore>) -> Self {
        Self {
            tasks,
            rules,
            fuel_margin: DEFAULT_FUEL_MARGIN,
        }
    }

    /// Overrides the fuel margin added on top of the project's rule count.
    #[must_use]
    pub const fn with_fuel_margin(mut self, fuel_margin: usize) -> Self {
        self.fuel_margin = fuel_margin;
        self
    }

    /// Evaluates all rules of the task's project against its new state.
    ///
    /// Rules are tested in creation order against the *current* task
    /// state. When a matching rule's action would change observable state,
    /// the change is applied through the task store and matching restarts
    /// from the first rule, so rules that were already passed over see the
    /// new state. Actions that would change nothing are suppressed: they
    /// neither mutate nor notify, which is what makes a reached fixed
    /// point stable — feeding the returned task back in fires nothing.
    ///
    /// The cascade is bounded by a fuel budget of `active_rules +
    /// fuel_margin` applied mutations. If the budget runs out before a
    /// fixed point, evaluation stops, the task keeps its last-computed
    /// (persisted) state, and [`Evaluation::cycle_detected`] is set —
    /// runaway rule pairs are a configuration error, not a crash.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the task disappears from
    /// the store mid-evaluation (e.g. the caller deleted it concurrently).
    pub fn on_task_changed(&self, task: &Task) -> Result<Evaluation, StoreError> {
        let rules = self.rules.for_project(&task.project_id);
        let (active, reserved): (Vec<_>, Vec<_>) = rules
            .into_iter()
            .partition(|r| r.trigger.is_active() && r.action.is_active());
        for rule in &reserved {
            warn!(
                rule = %rule.name,
                "rule uses a reserved trigger or action kind and will not run"
            );
        }

        let fuel = active.len() + self.fuel_margin;
        let mut current = task.clone();
        let mut fired: Vec<RuleFired> = Vec::new();
        let mut cycle_detected = false;

        'pass: loop {
            for rule in &active {
                if !rule.trigger.matches(&current) {
                    continue;
                }
                let Some(planned) = rule.action.plan(&current) else {
                    continue;
                };
                if fired.len() == fuel {
                    warn!(
                        task = %current.id,
                        applied = fired.len(),
                        "automation cascade exhausted its fuel budget; stopping"
                    );
                    cycle_detected = true;
                    break 'pass;
                }
                current = self.tasks.apply(&current.id, &planned.patch)?;
                debug!(rule = %rule.name, task = %current.id, "automation rule fired");
                fired.push(RuleFired {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    change: planned.change,
                });
                // A real mutation restarts matching from the first rule,
                // so earlier rules are tested against the new state.
                continue 'pass;
            }
            // A full pass with no real mutation: fixed point.
            break;
        }

        Ok(Evaluation {
            task: current,
            fired,
            cycle_detected,
        })
    }
}
