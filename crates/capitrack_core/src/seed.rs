//! Demo data seeding for first launch.
//!
//! # Invariants
//! - Seeding is idempotent: it only writes when the project store is empty.
//! - The demo project and its budget lines land in one transaction.

use crate::repo::RepoResult;
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};

/// Inserts one demo project with three budget lines when no project exists.
///
/// Returns `true` when the seed was inserted, `false` when data was already
/// present. Safe to call on every process start.
pub fn seed_demo_if_empty(conn: &mut Connection) -> RepoResult<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let has_projects: i64 =
        tx.query_row("SELECT EXISTS(SELECT 1 FROM projects);", [], |row| row.get(0))?;
    if has_projects == 1 {
        return Ok(false);
    }

    tx.execute(
        "INSERT INTO projects (code, name, owner) VALUES (?1, ?2, ?3);",
        params!["PRJ-2025-001", "Migration ERP", "Direction Financière"],
    )?;
    let project_id = tx.last_insert_rowid();

    let demo_lines: [(&str, i64, bool); 3] = [
        ("Licences ERP", 120_000_00, true),
        ("Presta intégration", 80_000_00, true),
        ("Formation", 15_000_00, false),
    ];
    for (label, amount_cents, is_capex) in demo_lines {
        tx.execute(
            "INSERT INTO budget_lines (project_id, label, amount_cents, is_capex)
             VALUES (?1, ?2, ?3, ?4);",
            params![project_id, label, amount_cents, i64::from(is_capex)],
        )?;
    }

    tx.commit()?;
    info!("event=seed module=seed status=ok project_id={project_id}");
    Ok(true)
}
