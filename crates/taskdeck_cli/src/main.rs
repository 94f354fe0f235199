//! Command-line front end over `taskdeck_core`.
//!
//! # Responsibility
//! - Exercise the core's public operations from a terminal.
//! - Stay a thin presentation shell: no business rules live here.

use std::env;
use std::process::ExitCode;
use taskdeck_core::{
    core_version, default_log_level, init_logging, RepoError, SqliteTaskStore, TaskRepository,
    TaskService,
};

const USAGE: &str = "usage: taskdeck <command>

commands:
  list            show tasks (active first, newest first)
  add <title>     create a task
  done <id>       mark a task completed
  undo <id>       mark a task active again
  rm <id>         delete a task permanently
  version         print the core version

environment:
  TASKDECK_DB       database file (default: taskdeck.db)
  TASKDECK_LOG_DIR  absolute directory for log files (optional)";

#[tokio::main]
async fn main() -> ExitCode {
    if let Ok(dir) = env::var("TASKDECK_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), String> {
    let command = args.first().map(String::as_str).unwrap_or("list");

    if command == "version" {
        println!("taskdeck_core {}", core_version());
        return Ok(());
    }
    if command == "help" || command == "--help" {
        println!("{USAGE}");
        return Ok(());
    }

    let db_path = env::var("TASKDECK_DB").unwrap_or_else(|_| "taskdeck.db".to_string());
    let store = SqliteTaskStore::open(&db_path)
        .await
        .map_err(|err| err.to_string())?;
    let mut service = TaskService::new(TaskRepository::new(store));
    service.initialize().await.map_err(render_error)?;
    service.reload().await.map_err(render_error)?;

    match command {
        "list" => {}
        "add" => {
            let title = args[1..].join(" ");
            let task = service.create(&title).await.map_err(render_error)?;
            println!("added task {}", task.id);
        }
        "done" | "undo" => {
            let id = parse_id(args.get(1))?;
            let done = command == "done";
            service.toggle(id, done).await.map_err(render_error)?;
        }
        "rm" => {
            let id = parse_id(args.get(1))?;
            service.remove(id).await.map_err(render_error)?;
            println!("removed task {id}");
        }
        other => return Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }

    for task in service.display() {
        let mark = if task.done { "x" } else { " " };
        println!("[{mark}] {:>4}  {}", task.id, task.title);
    }
    Ok(())
}

fn parse_id(arg: Option<&String>) -> Result<i64, String> {
    arg.ok_or_else(|| format!("missing task id\n\n{USAGE}"))?
        .parse::<i64>()
        .map_err(|_| "task id must be an integer".to_string())
}

fn render_error(err: RepoError) -> String {
    err.to_string()
}
