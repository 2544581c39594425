//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the project unit-of-work operations: create, list, get, patch,
//!   cascading delete.
//! - Own the encode/decode contract for JSON list columns and month columns.
//!
//! # Invariants
//! - Write paths validate fields before any SQL mutation.
//! - `investments`, `themes`, `images` round-trip losslessly; `images` order
//!   is preserved.
//! - Duplicate `code` surfaces as `RepoError::UniqueCode`, with no row added.

use crate::model::month::YearMonth;
use crate::model::project::{
    validate_project_fields, Investment, NewProject, Project, ProjectId, ProjectPatch,
};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    code,
    name,
    owner,
    start_date,
    end_date,
    description,
    deliverables,
    status,
    cir,
    cir_amount_cents,
    subvention,
    subvention_amount_cents,
    amortissement,
    investments,
    themes,
    images,
    created_at,
    updated_at
FROM projects";

/// Repository interface for project unit-of-work operations.
pub trait ProjectRepository {
    /// Creates one project and returns its detached snapshot.
    fn create_project(&mut self, input: &NewProject) -> RepoResult<Project>;
    /// Lists all projects, most recently created first.
    fn list_projects(&mut self) -> RepoResult<Vec<Project>>;
    /// Gets one project by id.
    fn get_project(&mut self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Applies a partial update; `None` when the project does not exist.
    fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch)
        -> RepoResult<Option<Project>>;
    /// Deletes a project and, in the same transaction, all its budget lines
    /// and news items.
    fn delete_project(&mut self, id: ProjectId) -> RepoResult<bool>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&mut self, input: &NewProject) -> RepoResult<Project> {
        input.validate()?;

        let investments = encode_json_list(&input.investments)?;
        let themes = encode_json_list(&input.themes)?;
        let images = encode_json_list(&input.images)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let inserted = tx.execute(
            "INSERT INTO projects (
                code,
                name,
                owner,
                start_date,
                end_date,
                description,
                deliverables,
                status,
                cir,
                cir_amount_cents,
                subvention,
                subvention_amount_cents,
                amortissement,
                investments,
                themes,
                images
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                input.code.as_str(),
                input.name.as_str(),
                input.owner.as_deref(),
                input.start_month.map(|ym| ym.first_day()),
                input.end_month.map(|ym| ym.first_day()),
                input.description.as_deref(),
                input.deliverables.as_deref(),
                input.status.as_deref(),
                bool_to_int(input.cir),
                input.cir_amount_cents,
                bool_to_int(input.subvention),
                input.subvention_amount_cents,
                bool_to_int(input.amortissement),
                investments.as_deref(),
                themes.as_deref(),
                images.as_deref(),
            ],
        );

        if let Err(err) = inserted {
            return Err(map_code_conflict(err, &input.code));
        }

        let id = tx.last_insert_rowid();
        let project = get_project_in_tx(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData("created project missing in read-back".to_string())
        })?;
        tx.commit()?;
        Ok(project)
    }

    fn list_projects(&mut self) -> RepoResult<Vec<Project>> {
        let tx = self.conn.transaction()?;
        let projects = {
            let mut stmt =
                tx.prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY created_at DESC, id DESC;"))?;
            let mut rows = stmt.query([])?;
            let mut projects = Vec::new();
            while let Some(row) = rows.next()? {
                projects.push(parse_project_row(row)?);
            }
            projects
        };
        tx.commit()?;
        Ok(projects)
    }

    fn get_project(&mut self, id: ProjectId) -> RepoResult<Option<Project>> {
        let tx = self.conn.transaction()?;
        let project = get_project_in_tx(&tx, id)?;
        tx.commit()?;
        Ok(project)
    }

    fn update_project(
        &mut self,
        id: ProjectId,
        patch: &ProjectPatch,
    ) -> RepoResult<Option<Project>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(mut project) = get_project_in_tx(&tx, id)? else {
            return Ok(None);
        };
        patch.apply_to(&mut project);
        validate_project_fields(&project.code, &project.name, &project.investments)?;

        let investments = encode_json_list(&project.investments)?;
        let themes = encode_json_list(&project.themes)?;
        let images = encode_json_list(&project.images)?;

        let updated = tx.execute(
            "UPDATE projects
             SET
                code = ?2,
                name = ?3,
                owner = ?4,
                start_date = ?5,
                end_date = ?6,
                description = ?7,
                deliverables = ?8,
                status = ?9,
                cir = ?10,
                cir_amount_cents = ?11,
                subvention = ?12,
                subvention_amount_cents = ?13,
                amortissement = ?14,
                investments = ?15,
                themes = ?16,
                images = ?17,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                id,
                project.code.as_str(),
                project.name.as_str(),
                project.owner.as_deref(),
                project.start_month.map(|ym| ym.first_day()),
                project.end_month.map(|ym| ym.first_day()),
                project.description.as_deref(),
                project.deliverables.as_deref(),
                project.status.as_deref(),
                bool_to_int(project.cir),
                project.cir_amount_cents,
                bool_to_int(project.subvention),
                project.subvention_amount_cents,
                bool_to_int(project.amortissement),
                investments.as_deref(),
                themes.as_deref(),
                images.as_deref(),
            ],
        );

        if let Err(err) = updated {
            return Err(map_code_conflict(err, &project.code));
        }

        let refreshed = get_project_in_tx(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData("updated project missing in read-back".to_string())
        })?;
        tx.commit()?;
        Ok(Some(refreshed))
    }

    fn delete_project(&mut self, id: ProjectId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        // Owned budget lines and news rows go with the project via
        // ON DELETE CASCADE under foreign_keys=ON.
        let changed = tx.execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(changed > 0)
    }
}

/// Checks project existence inside an open transaction. Shared with the
/// budget line and news repositories.
pub(crate) fn project_exists_in_tx(tx: &Transaction<'_>, id: ProjectId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn get_project_in_tx(tx: &Transaction<'_>, id: ProjectId) -> RepoResult<Option<Project>> {
    let mut stmt = tx.prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_project_row(row)?));
    }
    Ok(None)
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let start_date: Option<NaiveDate> = row.get("start_date")?;
    let end_date: Option<NaiveDate> = row.get("end_date")?;

    Ok(Project {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        owner: row.get("owner")?,
        start_month: start_date.map(YearMonth::from_date),
        end_month: end_date.map(YearMonth::from_date),
        description: row.get("description")?,
        deliverables: row.get("deliverables")?,
        status: row.get("status")?,
        cir: int_to_bool(row.get("cir")?, "projects.cir")?,
        cir_amount_cents: row.get("cir_amount_cents")?,
        subvention: int_to_bool(row.get("subvention")?, "projects.subvention")?,
        subvention_amount_cents: row.get("subvention_amount_cents")?,
        amortissement: int_to_bool(row.get("amortissement")?, "projects.amortissement")?,
        investments: decode_json_list::<Investment>(row.get("investments")?, "projects.investments")?,
        themes: decode_json_list(row.get("themes")?, "projects.themes")?,
        images: decode_json_list(row.get("images")?, "projects.images")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Encodes a structured list for a JSON text column. Empty lists are stored
/// as NULL.
fn encode_json_list<T: Serialize>(values: &[T]) -> RepoResult<Option<String>> {
    if values.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(values)?))
}

/// Decodes a JSON text column back into a structured list. NULL means empty.
fn decode_json_list<T: DeserializeOwned>(
    value: Option<String>,
    column: &'static str,
) -> RepoResult<Vec<T>> {
    match value {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(&text)
            .map_err(|err| RepoError::InvalidData(format!("{column}: {err}"))),
    }
}

fn map_code_conflict(err: rusqlite::Error, code: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation
            && message.contains("projects.code")
        {
            return RepoError::UniqueCode(code.to_string());
        }
    }
    RepoError::from(err)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
