//! Integration tests for cascade semantics: fixed points, idempotence,
//! and the fuel guard on mutually-triggering rules.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use flowboard::automation::{AutomationEngine, DEFAULT_FUEL_MARGIN};
use flowboard::store::{RuleStore, TaskStore};
use flowboard_model::id::{MemberId, ProjectId};
use flowboard_model::rule::{Action, Trigger};
use flowboard_model::task::{TaskDraft, TaskStatus};

fn make_stores() -> (Arc<TaskStore>, Arc<RuleStore>, ProjectId) {
    (
        Arc::new(TaskStore::new()),
        Arc::new(RuleStore::new()),
        ProjectId::new(),
    )
}

// ---------------------------------------------------------------------------
// Cascade to a fixed point
// ---------------------------------------------------------------------------

#[test]
fn assignment_cascades_into_a_column_move() {
    let (tasks, rules, project) = make_stores();
    let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules));
    let member = MemberId::new();
    rules.create(
        project.clone(),
        "Start tasks assigned to Jane",
        Trigger::TaskAssigned {
            assignee_id: member.clone(),
        },
        Action::MoveTask {
            status: TaskStatus::InProgress,
        },
    );
    rules.create(
        project.clone(),
        "Hand in-progress tasks to Jane",
        Trigger::TaskMoved {
            status: TaskStatus::InProgress,
        },
        Action::AssignTask {
            assignee_id: member.clone(),
        },
    );
    let task = tasks
        .create(
            TaskDraft::new(project, "Set up development environment", "")
                .with_assignee(member.clone()),
        )
        .unwrap();

    let eval = engine.on_task_changed(&task).unwrap();
    // The assignment rule moves the task; the second rule's effect
    // already holds afterwards, so it must not fire redundantly.
    assert_eq!(eval.fired.len(), 1);
    assert_eq!(eval.fired[0].rule_name, "Start tasks assigned to Jane");
    assert_eq!(eval.task.status, TaskStatus::InProgress);
    assert_eq!(eval.task.assignee_id, Some(member));
    assert!(!eval.cycle_detected);

    // Fixed point: re-running evaluation produces zero notifications.
    let again = engine.on_task_changed(&eval.task).unwrap();
    assert!(again.fired.is_empty());
    assert_eq!(again.task, eval.task);
}

#[test]
fn chain_of_three_rules_settles() {
    let (tasks, rules, project) = make_stores();
    let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules));
    let triage = MemberId::new();
    let reviewer = MemberId::new();
    // todo -> triage assignment -> inprogress -> reviewer handover, through
    // three rules that each enable the next; listed deliberately in
    // reverse so every firing exercises the restart-from-top behaviour.
    rules.create(
        project.clone(),
        "Hand in-progress tasks to the reviewer",
        Trigger::TaskMoved {
            status: TaskStatus::InProgress,
        },
        Action::AssignTask {
            assignee_id: reviewer.clone(),
        },
    );
    rules.create(
        project.clone(),
        "Start triaged tasks",
        Trigger::TaskAssigned {
            assignee_id: triage.clone(),
        },
        Action::MoveTask {
            status: TaskStatus::InProgress,
        },
    );
    rules.create(
        project.clone(),
        "Triage todo tasks",
        Trigger::TaskMoved {
            status: TaskStatus::Todo,
        },
        Action::AssignTask {
            assignee_id: triage,
        },
    );
    let task = tasks
        .create(TaskDraft::new(project, "Database integration", ""))
        .unwrap();

    let eval = engine.on_task_changed(&task).unwrap();
    assert_eq!(
        eval.fired
            .iter()
            .map(|f| f.rule_name.as_str())
            .collect::<Vec<_>>(),
        vec![
            "Triage todo tasks",
            "Start triaged tasks",
            "Hand in-progress tasks to the reviewer",
        ]
    );
    assert_eq!(eval.task.status, TaskStatus::InProgress);
    assert_eq!(eval.task.assignee_id, Some(reviewer));
    assert!(!eval.cycle_detected);
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn second_evaluation_of_engine_output_is_a_noop() {
    let (tasks, rules, project) = make_stores();
    let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules));
    let member = MemberId::new();
    rules.create(
        project.clone(),
        "Assign todo tasks",
        Trigger::TaskMoved {
            status: TaskStatus::Todo,
        },
        Action::AssignTask {
            assignee_id: member,
        },
    );
    let task = tasks
        .create(TaskDraft::new(project, "Database integration", ""))
        .unwrap();

    let first = engine.on_task_changed(&task).unwrap();
    assert!(!first.cycle_detected);
    let second = engine.on_task_changed(&first.task).unwrap();
    assert!(second.fired.is_empty());
    assert!(!second.cycle_detected);
    assert_eq!(second.task, first.task);

    // And a third run for good measure: the fixed point is stable.
    let third = engine.on_task_changed(&second.task).unwrap();
    assert!(third.fired.is_empty());
    assert_eq!(third.task, second.task);
}

// ---------------------------------------------------------------------------
// Cycle guard
// ---------------------------------------------------------------------------

#[test]
fn mutually_triggering_rules_terminate_with_cycle_detected() {
    let (tasks, rules, project) = make_stores();
    let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules));
    rules.create(
        project.clone(),
        "Bounce to inprogress",
        Trigger::TaskMoved {
            status: TaskStatus::Todo,
        },
        Action::MoveTask {
            status: TaskStatus::InProgress,
        },
    );
    rules.create(
        project.clone(),
        "Bounce to todo",
        Trigger::TaskMoved {
            status: TaskStatus::InProgress,
        },
        Action::MoveTask {
            status: TaskStatus::Todo,
        },
    );
    let task = tasks
        .create(TaskDraft::new(project, "Bouncing task", ""))
        .unwrap();

    let eval = engine.on_task_changed(&task).unwrap();
    assert!(eval.cycle_detected);
    assert_eq!(eval.fired.len(), 2 + DEFAULT_FUEL_MARGIN);
    // Deterministic final state: an even number of status flips lands
    // the task back in todo, and the store agrees.
    assert_eq!(eval.task.status, TaskStatus::Todo);
    assert_eq!(tasks.get(&task.id).unwrap(), eval.task);
}

#[test]
fn cycle_guard_bound_scales_with_fuel_margin() {
    let (tasks, rules, project) = make_stores();
    let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules)).with_fuel_margin(2);
    rules.create(
        project.clone(),
        "Bounce to inprogress",
        Trigger::TaskMoved {
            status: TaskStatus::Todo,
        },
        Action::MoveTask {
            status: TaskStatus::InProgress,
        },
    );
    rules.create(
        project.clone(),
        "Bounce to todo",
        Trigger::TaskMoved {
            status: TaskStatus::InProgress,
        },
        Action::MoveTask {
            status: TaskStatus::Todo,
        },
    );
    let task = tasks
        .create(TaskDraft::new(project, "Bouncing task", ""))
        .unwrap();

    let eval = engine.on_task_changed(&task).unwrap();
    assert!(eval.cycle_detected);
    assert_eq!(eval.fired.len(), 4);
}

#[test]
fn self_cycle_on_one_rule_is_impossible_by_noop_suppression() {
    let (tasks, rules, project) = make_stores();
    let engine = AutomationEngine::new(Arc::clone(&tasks), Arc::clone(&rules));
    // A rule whose action re-establishes its own trigger condition fires
    // exactly once: the second time around, the action changes nothing.
    rules.create(
        project.clone(),
        "Keep todo tasks in todo",
        Trigger::TaskMoved {
            status: TaskStatus::InProgress,
        },
        Action::MoveTask {
            status: TaskStatus::Todo,
        },
    );
    let task = tasks
        .create(TaskDraft::new(project, "Sticky task", "").with_status(TaskStatus::InProgress))
        .unwrap();

    let eval = engine.on_task_changed(&task).unwrap();
    assert_eq!(eval.fired.len(), 1);
    assert_eq!(eval.task.status, TaskStatus::Todo);
    assert!(!eval.cycle_detected);
}
