//! Budget line repository contract and SQLite implementation.
//!
//! # Invariants
//! - A budget line is only ever created against an existing project; the
//!   orphan case reports `None` and writes nothing.
//! - Signed amounts are permitted; reversals carry negative cents.
//! - Listing order is stable: `created_at ASC, id ASC`.

use crate::model::budget::{BudgetLine, BudgetLineId, NewBudgetLine};
use crate::model::project::{ProjectId, ValidationError};
use crate::repo::project_repo::{bool_to_int, int_to_bool, project_exists_in_tx};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const BUDGET_LINE_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    label,
    is_capex,
    amount_cents,
    value_date,
    created_at,
    updated_at
FROM budget_lines";

/// Repository interface for budget line operations.
///
/// Budget lines have no update operation: a posted line is immutable and
/// corrections are expressed as new signed entries.
pub trait BudgetLineRepository {
    /// Creates one budget line; `None` when the project does not exist.
    fn add_budget_line(
        &mut self,
        project_id: ProjectId,
        input: &NewBudgetLine,
    ) -> RepoResult<Option<BudgetLine>>;
    /// Lists a project's budget lines, oldest first. Empty for an unknown
    /// project.
    fn list_budget_lines(&mut self, project_id: ProjectId) -> RepoResult<Vec<BudgetLine>>;
}

/// SQLite-backed budget line repository.
pub struct SqliteBudgetLineRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBudgetLineRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl BudgetLineRepository for SqliteBudgetLineRepository<'_> {
    fn add_budget_line(
        &mut self,
        project_id: ProjectId,
        input: &NewBudgetLine,
    ) -> RepoResult<Option<BudgetLine>> {
        if input.label.trim().is_empty() {
            return Err(RepoError::Validation(ValidationError::EmptyLabel));
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !project_exists_in_tx(&tx, project_id)? {
            return Ok(None);
        }

        tx.execute(
            "INSERT INTO budget_lines (project_id, label, is_capex, amount_cents, value_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project_id,
                input.label.as_str(),
                bool_to_int(input.is_capex),
                input.amount_cents,
                input.value_date,
            ],
        )?;

        let id = tx.last_insert_rowid();
        let line = get_budget_line_in_tx(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData("created budget line missing in read-back".to_string())
        })?;
        tx.commit()?;
        Ok(Some(line))
    }

    fn list_budget_lines(&mut self, project_id: ProjectId) -> RepoResult<Vec<BudgetLine>> {
        let tx = self.conn.transaction()?;
        let lines = {
            let mut stmt = tx.prepare(&format!(
                "{BUDGET_LINE_SELECT_SQL}
                 WHERE project_id = ?1
                 ORDER BY created_at ASC, id ASC;"
            ))?;
            let mut rows = stmt.query([project_id])?;
            let mut lines = Vec::new();
            while let Some(row) = rows.next()? {
                lines.push(parse_budget_line_row(row)?);
            }
            lines
        };
        tx.commit()?;
        Ok(lines)
    }
}

fn get_budget_line_in_tx(
    tx: &Transaction<'_>,
    id: BudgetLineId,
) -> RepoResult<Option<BudgetLine>> {
    let mut stmt = tx.prepare(&format!("{BUDGET_LINE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_budget_line_row(row)?));
    }
    Ok(None)
}

fn parse_budget_line_row(row: &Row<'_>) -> RepoResult<BudgetLine> {
    Ok(BudgetLine {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        label: row.get("label")?,
        is_capex: int_to_bool(row.get("is_capex")?, "budget_lines.is_capex")?,
        amount_cents: row.get("amount_cents")?,
        value_date: row.get("value_date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
