//! Flowboard demo CLI — seeds a sample board and drives the automation
//! engine through a short scenario.
//!
//! ```bash
//! # Human-readable demo
//! cargo run --bin flowboard
//!
//! # JSON output for scripting
//! cargo run --bin flowboard -- --json
//!
//! # Tighter automation fuel budget
//! cargo run --bin flowboard -- --fuel-margin 2
//! ```

use clap::Parser;
use serde::Serialize;

use flowboard::app::{App, Board};
use flowboard::automation::Evaluation;
use flowboard::config::{AppConfig, CliArgs};
use flowboard::seed;
use flowboard::store::StoreError;
use flowboard_model::task::{Task, TaskDraft, TaskStatus};
use flowboard_model::time::Timestamp;

fn main() {
    let cli = CliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(fuel_margin = config.fuel_margin, "starting flowboard demo");

    if let Err(e) = run(&config, cli.json) {
        tracing::error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}

/// JSON payload emitted with `--json`.
#[derive(Serialize)]
struct DemoOutcome {
    evaluations: Vec<Evaluation>,
    website: Board,
    mobile: Board,
}

fn run(config: &AppConfig, json: bool) -> Result<(), StoreError> {
    let app = App::with_fuel_margin(config.fuel_margin);
    let demo = seed::demo(&app)?;

    // Dragging "Implement design" back to the todo column fires the
    // website project's auto-assign rule, reassigning it to John.
    let moved = app.move_task(&demo.website_tasks[1].id, TaskStatus::Todo)?;

    // A fresh mobile task assigned to Jane cascades: the assignment rule
    // moves it straight to inprogress.
    let created = app.create_task(TaskDraft::new(
        demo.mobile.id.clone(),
        "Write onboarding screens",
        "First-run experience for the mobile app",
    ))?;
    let assigned = app.assign_task(&created.task.id, Some(demo.jane.id.clone()))?;

    let website = app.board(&demo.website.id)?;
    let mobile = app.board(&demo.mobile.id)?;

    if json {
        let outcome = DemoOutcome {
            evaluations: vec![moved, created, assigned],
            website,
            mobile,
        };
        match serde_json::to_string_pretty(&outcome) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to render JSON output");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    println!("Automation notifications:");
    for eval in [&moved, &assigned] {
        for fired in &eval.fired {
            println!("  {fired}");
        }
        if eval.cycle_detected {
            println!("  (automation cycle detected; evaluation stopped early)");
        }
    }

    print_board(&app, &website);
    print_board(&app, &mobile);
    Ok(())
}

fn print_board(app: &App, board: &Board) {
    println!();
    println!("== {} ==", board.project.title);
    for (label, tasks) in [
        ("todo", &board.todo),
        ("inprogress", &board.in_progress),
        ("done", &board.done),
    ] {
        println!("  [{label}]");
        for task in tasks {
            println!("    - {}", describe_task(app, task));
        }
    }
}

fn describe_task(app: &App, task: &Task) -> String {
    let assignee = task.assignee_id.as_ref().map_or_else(
        || "unassigned".to_string(),
        |id| {
            app.members()
                .get(id)
                .map_or_else(|_| id.to_string(), |m| m.name)
        },
    );
    task.due_date.map_or_else(
        || format!("{} ({assignee})", task.title),
        |due| format!("{} ({assignee}, due {})", task.title, format_due(due)),
    )
}

/// Formats a due timestamp as a calendar date, falling back to raw
/// milliseconds for out-of-range values.
fn format_due(due: Timestamp) -> String {
    i64::try_from(due.as_millis())
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map_or_else(|| due.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}
