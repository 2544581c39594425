//! Project news repository contract and SQLite implementation.
//!
//! # Invariants
//! - News text is trimmed before persistence and never empty.
//! - Listing order is most recent first: `created_at DESC, id DESC`.

use crate::model::budget::{NewsId, ProjectNews};
use crate::model::project::{ProjectId, ValidationError};
use crate::repo::project_repo::project_exists_in_tx;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const NEWS_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    text,
    created_at
FROM project_news";

/// Repository interface for project news operations.
pub trait NewsRepository {
    /// Creates one news item; `None` when the project does not exist.
    fn create_news(&mut self, project_id: ProjectId, text: &str)
        -> RepoResult<Option<ProjectNews>>;
    /// Lists a project's news items, most recent first.
    fn list_news(&mut self, project_id: ProjectId) -> RepoResult<Vec<ProjectNews>>;
    /// Replaces the text of one news item; `false` when the id is unknown.
    fn update_news(&mut self, news_id: NewsId, text: &str) -> RepoResult<bool>;
    /// Deletes one news item; `false` when the id is unknown.
    fn delete_news(&mut self, news_id: NewsId) -> RepoResult<bool>;
}

/// SQLite-backed project news repository.
pub struct SqliteNewsRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNewsRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl NewsRepository for SqliteNewsRepository<'_> {
    fn create_news(
        &mut self,
        project_id: ProjectId,
        text: &str,
    ) -> RepoResult<Option<ProjectNews>> {
        let trimmed = non_empty_text(text)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !project_exists_in_tx(&tx, project_id)? {
            return Ok(None);
        }

        tx.execute(
            "INSERT INTO project_news (project_id, text) VALUES (?1, ?2);",
            params![project_id, trimmed],
        )?;

        let id = tx.last_insert_rowid();
        let news = get_news_in_tx(&tx, id)?.ok_or_else(|| {
            RepoError::InvalidData("created news item missing in read-back".to_string())
        })?;
        tx.commit()?;
        Ok(Some(news))
    }

    fn list_news(&mut self, project_id: ProjectId) -> RepoResult<Vec<ProjectNews>> {
        let tx = self.conn.transaction()?;
        let items = {
            let mut stmt = tx.prepare(&format!(
                "{NEWS_SELECT_SQL}
                 WHERE project_id = ?1
                 ORDER BY created_at DESC, id DESC;"
            ))?;
            let mut rows = stmt.query([project_id])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(parse_news_row(row)?);
            }
            items
        };
        tx.commit()?;
        Ok(items)
    }

    fn update_news(&mut self, news_id: NewsId, text: &str) -> RepoResult<bool> {
        let trimmed = non_empty_text(text)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE project_news SET text = ?2 WHERE id = ?1;",
            params![news_id, trimmed],
        )?;
        tx.commit()?;
        Ok(changed > 0)
    }

    fn delete_news(&mut self, news_id: NewsId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM project_news WHERE id = ?1;", [news_id])?;
        tx.commit()?;
        Ok(changed > 0)
    }
}

fn non_empty_text(text: &str) -> RepoResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation(ValidationError::EmptyNewsText));
    }
    Ok(trimmed)
}

fn get_news_in_tx(tx: &Transaction<'_>, id: NewsId) -> RepoResult<Option<ProjectNews>> {
    let mut stmt = tx.prepare(&format!("{NEWS_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_news_row(row)?));
    }
    Ok(None)
}

fn parse_news_row(row: &Row<'_>) -> RepoResult<ProjectNews> {
    Ok(ProjectNews {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    })
}
