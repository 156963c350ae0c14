//! Sample board data for the demo CLI and tests.
//!
//! Seeding inserts through the stores directly — rule evaluation does not
//! run, so the board comes up exactly as written here (an initial data
//! load, not a stream of user mutations).

use flowboard_model::member::Member;
use flowboard_model::project::Project;
use flowboard_model::rule::{Action, Rule, Trigger};
use flowboard_model::task::{Task, TaskDraft, TaskStatus};
use flowboard_model::time::Timestamp;

use crate::app::App;
use crate::store::StoreError;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Handles to everything the demo seed created.
pub struct DemoBoard {
    /// Owner of the website and mobile projects.
    pub john: Member,
    /// Second member; target of the mobile project's assignment rule.
    pub jane: Member,
    /// Third member.
    pub bob: Member,
    /// "Website Redesign" project (members: john, jane).
    pub website: Project,
    /// "Mobile App Development" project (members: all three).
    pub mobile: Project,
    /// "Marketing Campaign" project (members: jane, john, bob).
    pub marketing: Project,
    /// Website tasks in creation order.
    pub website_tasks: Vec<Task>,
    /// Mobile tasks in creation order.
    pub mobile_tasks: Vec<Task>,
    /// Marketing tasks in creation order.
    pub marketing_tasks: Vec<Task>,
    /// The two sample automation rules, in creation order.
    pub rules: Vec<Rule>,
}

/// Populates an empty [`App`] with the sample board: three members, three
/// projects, seven tasks, and two automation rules ("Auto-assign tasks to
/// me" on the website project, "Move assigned tasks to In Progress" on
/// the mobile project).
///
/// # Errors
///
/// Returns [`StoreError`] if any insert fails; on a fresh `App` this does
/// not happen.
pub fn demo(app: &App) -> Result<DemoBoard, StoreError> {
    let john = app.register_member("John Doe", "john@example.com", None);
    let jane = app.register_member("Jane Smith", "jane@example.com", None);
    let bob = app.register_member("Bob Johnson", "bob@example.com", None);

    let website = app.create_project(
        "Website Redesign",
        "Redesigning the company website with a new modern look",
        &john.id,
    )?;
    let website = app.add_project_member(&website.id, &jane.id)?;

    let mobile = app.create_project(
        "Mobile App Development",
        "Building a new mobile app for customer engagement",
        &john.id,
    )?;
    app.add_project_member(&mobile.id, &jane.id)?;
    let mobile = app.add_project_member(&mobile.id, &bob.id)?;

    let marketing = app.create_project(
        "Marketing Campaign",
        "Q2 marketing campaign planning and execution",
        &jane.id,
    )?;
    app.add_project_member(&marketing.id, &john.id)?;
    let marketing = app.add_project_member(&marketing.id, &bob.id)?;

    let now = Timestamp::now();
    let tasks = app.tasks();
    let website_tasks = vec![
        tasks.create(
            TaskDraft::new(
                website.id.clone(),
                "Create wireframes",
                "Design wireframes for homepage and product pages",
            )
            .with_status(TaskStatus::Done)
            .with_assignee(john.id.clone())
            .with_due_date(now.plus_millis(4 * DAY_MS)),
        )?,
        tasks.create(
            TaskDraft::new(
                website.id.clone(),
                "Implement design",
                "Convert the design into HTML/CSS templates",
            )
            .with_status(TaskStatus::InProgress)
            .with_assignee(jane.id.clone())
            .with_due_date(now.plus_millis(9 * DAY_MS)),
        )?,
        tasks.create(
            TaskDraft::new(
                website.id.clone(),
                "Database integration",
                "Integrate the front-end with the database",
            )
            .with_due_date(now.plus_millis(14 * DAY_MS)),
        )?,
    ];

    let mobile_tasks = vec![
        tasks.create(
            TaskDraft::new(
                mobile.id.clone(),
                "Define app features",
                "List and prioritize features for the MVP",
            )
            .with_status(TaskStatus::Done)
            .with_assignee(john.id.clone()),
        )?,
        tasks.create(
            TaskDraft::new(
                mobile.id.clone(),
                "Design user flows",
                "Create user flow diagrams for main functionalities",
            )
            .with_status(TaskStatus::InProgress)
            .with_assignee(bob.id.clone()),
        )?,
        tasks.create(
            TaskDraft::new(
                mobile.id.clone(),
                "Set up development environment",
                "Configure development tools and environments",
            )
            .with_due_date(now.plus_millis(7 * DAY_MS)),
        )?,
    ];

    let marketing_tasks = vec![tasks.create(
        TaskDraft::new(
            marketing.id.clone(),
            "Define target audience",
            "Research and define target audience segments",
        )
        .with_status(TaskStatus::Done)
        .with_assignee(bob.id.clone()),
    )?];

    let rules = vec![
        app.create_rule(
            &website.id,
            "Auto-assign tasks to me",
            Trigger::TaskMoved {
                status: TaskStatus::Todo,
            },
            Action::AssignTask {
                assignee_id: john.id.clone(),
            },
        )?,
        app.create_rule(
            &mobile.id,
            "Move assigned tasks to In Progress",
            Trigger::TaskAssigned {
                assignee_id: jane.id.clone(),
            },
            Action::MoveTask {
                status: TaskStatus::InProgress,
            },
        )?,
    ];

    Ok(DemoBoard {
        john,
        jane,
        bob,
        website,
        mobile,
        marketing,
        website_tasks,
        mobile_tasks,
        marketing_tasks,
        rules,
    })
}
