//! Property-based tests for the domain model.
//!
//! Uses proptest to verify:
//! 1. Tasks, rules, and notifications survive JSON round-trips.
//! 2. Patch application laws: the empty patch is the identity, and
//!    applying the same patch twice equals applying it once.
//! 3. `Action::plan` no-op suppression is exact: `None` means the state
//!    already satisfies the action, `Some` means applying it changes the
//!    task and planning again on the result yields `None`.
//! 4. Trigger matching is consistent with plain field comparison.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use uuid::Uuid;

use flowboard_model::id::{MemberId, ProjectId, TaskId};
use flowboard_model::rule::{Action, Trigger};
use flowboard_model::task::{Task, TaskPatch, TaskStatus};
use flowboard_model::time::Timestamp;

// --- Strategies for model types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    any::<u128>().prop_map(|n| TaskId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating arbitrary `ProjectId` values.
fn arb_project_id() -> impl Strategy<Value = ProjectId> {
    any::<u128>().prop_map(|n| ProjectId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating arbitrary `MemberId` values.
fn arb_member_id() -> impl Strategy<Value = MemberId> {
    any::<u128>().prop_map(|n| MemberId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating arbitrary `Timestamp` values.
fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    any::<u64>().prop_map(Timestamp::from_millis)
}

/// Strategy for generating arbitrary `TaskStatus` values.
fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

/// Strategy for generating arbitrary tasks with `updated_at >= created_at`.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        arb_project_id(),
        "[^\x00]{1,64}",
        "[^\x00]{0,128}",
        arb_status(),
        proptest::option::of(arb_member_id()),
        proptest::option::of(arb_timestamp()),
        arb_timestamp(),
        any::<u32>(),
    )
        .prop_map(
            |(id, project_id, title, description, status, assignee_id, due_date, created_at, age)| {
                Task {
                    id,
                    project_id,
                    title,
                    description,
                    status,
                    assignee_id,
                    due_date,
                    created_at,
                    updated_at: created_at.plus_millis(u64::from(age)),
                }
            },
        )
}

/// Strategy for generating arbitrary triggers, including reserved kinds.
fn arb_trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        arb_status().prop_map(|status| Trigger::TaskMoved { status }),
        arb_member_id().prop_map(|assignee_id| Trigger::TaskAssigned { assignee_id }),
        Just(Trigger::DueDatePassed),
    ]
}

/// Strategy for generating arbitrary actions, including reserved kinds.
fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        arb_status().prop_map(|status| Action::MoveTask { status }),
        arb_member_id().prop_map(|assignee_id| Action::AssignTask { assignee_id }),
        Just(Action::SendNotification),
    ]
}

/// Strategy for generating arbitrary patches, including field clears.
fn arb_patch() -> impl Strategy<Value = TaskPatch> {
    (
        proptest::option::of("[^\x00]{1,64}"),
        proptest::option::of("[^\x00]{0,128}"),
        proptest::option::of(arb_status()),
        proptest::option::of(proptest::option::of(arb_member_id())),
        proptest::option::of(proptest::option::of(arb_timestamp())),
    )
        .prop_map(|(title, description, status, assignee_id, due_date)| TaskPatch {
            title,
            description,
            status,
            assignee_id,
            due_date,
        })
}

// --- Property tests ---

proptest! {
    /// Any valid task survives a JSON round-trip.
    #[test]
    fn task_json_round_trip(task in arb_task()) {
        let json = serde_json::to_string(&task).expect("serialize");
        let back: Task = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(task, back);
    }

    /// Any trigger (reserved kinds included) survives a JSON round-trip.
    #[test]
    fn trigger_json_round_trip(trigger in arb_trigger()) {
        let json = serde_json::to_string(&trigger).expect("serialize");
        let back: Trigger = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(trigger, back);
    }

    /// Any action (reserved kinds included) survives a JSON round-trip.
    #[test]
    fn action_json_round_trip(action in arb_action()) {
        let json = serde_json::to_string(&action).expect("serialize");
        let back: Action = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(action, back);
    }

    /// Status display strings parse back to the same status.
    #[test]
    fn status_string_round_trip(status in arb_status()) {
        let parsed: TaskStatus = status.to_string().parse().expect("parse");
        prop_assert_eq!(parsed, status);
    }

    /// The empty patch changes nothing.
    #[test]
    fn empty_patch_is_identity(task in arb_task()) {
        let mut patched = task.clone();
        patched.apply_patch(&TaskPatch::default());
        prop_assert_eq!(patched, task);
    }

    /// Applying a patch twice is the same as applying it once.
    #[test]
    fn patch_application_is_idempotent(task in arb_task(), patch in arb_patch()) {
        let mut once = task.clone();
        once.apply_patch(&patch);
        let mut twice = once.clone();
        twice.apply_patch(&patch);
        prop_assert_eq!(twice, once);
    }

    /// Patches never touch identity or creation fields.
    #[test]
    fn patch_preserves_immutable_fields(task in arb_task(), patch in arb_patch()) {
        let mut patched = task.clone();
        patched.apply_patch(&patch);
        prop_assert_eq!(patched.id, task.id);
        prop_assert_eq!(patched.project_id, task.project_id);
        prop_assert_eq!(patched.created_at, task.created_at);
    }

    /// `Action::plan` returns `None` exactly when the action would change
    /// nothing; a planned patch really changes the task, and planning
    /// again on the result is `None`.
    #[test]
    fn plan_noop_suppression_is_exact(task in arb_task(), action in arb_action()) {
        match action.plan(&task) {
            None => match &action {
                Action::MoveTask { status } => prop_assert_eq!(task.status, *status),
                Action::AssignTask { assignee_id } => {
                    prop_assert_eq!(task.assignee_id.as_ref(), Some(assignee_id));
                }
                Action::SendNotification => {} // reserved: never plans
            },
            Some(planned) => {
                let mut applied = task.clone();
                applied.apply_patch(&planned.patch);
                prop_assert_ne!(&applied, &task);
                prop_assert!(action.plan(&applied).is_none());
            }
        }
    }

    /// Trigger matching agrees with direct field comparison.
    #[test]
    fn trigger_matching_is_field_comparison(task in arb_task(), trigger in arb_trigger()) {
        let expected = match &trigger {
            Trigger::TaskMoved { status } => task.status == *status,
            Trigger::TaskAssigned { assignee_id } => {
                task.assignee_id.as_ref() == Some(assignee_id)
            }
            Trigger::DueDatePassed => false,
        };
        prop_assert_eq!(trigger.matches(&task), expected);
    }
}
