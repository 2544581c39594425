//! CLI entry point.
//!
//! # Responsibility
//! - Open the configured database, seed demo data when empty and report a
//!   project count for quick local sanity checks.
//! - Host the confirmation-gated destructive `reset` admin command.

use capitrack_core::db::{migrations, open_db};
use capitrack_core::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use capitrack_core::{config, default_log_level, init_logging, seed_demo_if_empty};
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_logging(default_log_level(), "logs") {
        eprintln!("warning: logging disabled: {err}");
    }

    let command = std::env::args().nth(1);
    let result = match command.as_deref() {
        None | Some("status") => run_status(),
        Some("reset") => run_reset(),
        Some(other) => {
            eprintln!("unknown command `{other}`; expected `status` or `reset`");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn open_configured_db() -> Result<Connection, String> {
    let path = config::database_path();
    config::ensure_db_dir(&path).map_err(|err| {
        format!(
            "cannot create database directory for `{}`: {err}",
            path.display()
        )
    })?;
    open_db(&path).map_err(|err| format!("cannot open database `{}`: {err}", path.display()))
}

fn run_status() -> Result<(), String> {
    let mut conn = open_configured_db()?;
    seed_demo_if_empty(&mut conn).map_err(|err| format!("seed failed: {err}"))?;

    let mut repo = SqliteProjectRepository::new(&mut conn);
    let projects = repo
        .list_projects()
        .map_err(|err| format!("listing projects failed: {err}"))?;
    println!(
        "capitrack v{}: {} project(s)",
        capitrack_core::core_version(),
        projects.len()
    );
    Ok(())
}

fn run_reset() -> Result<(), String> {
    print!("This will DROP and recreate all tables. Continue? [y/N] ");
    std::io::stdout().flush().map_err(|err| err.to_string())?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| err.to_string())?;
    if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        println!("Aborted.");
        return Ok(());
    }

    let mut conn = open_configured_db()?;
    migrations::reset_schema(&mut conn).map_err(|err| format!("reset failed: {err}"))?;
    println!("Database reset.");
    Ok(())
}
