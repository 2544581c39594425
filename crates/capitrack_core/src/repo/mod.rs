//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for projects, budget
//!   lines and project news.
//! - Isolate SQL details and transaction handling from consumers.
//!
//! # Invariants
//! - Every operation runs inside exactly one transaction scope: commit on
//!   success, rollback on every error path (uncommitted transactions roll
//!   back on drop).
//! - Operations targeting a missing id report it with `Option`/`bool`
//!   results, uniformly; errors are reserved for validation and storage
//!   failures.
//! - All returned records are detached snapshots, never live handles.

use crate::db::DbError;
use crate::model::project::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod budget_repo;
pub mod news_repo;
pub mod project_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Malformed or out-of-range input reaching the repository boundary.
    Validation(ValidationError),
    /// Storage failure; the surrounding transaction has been rolled back.
    Db(DbError),
    /// A project with this code already exists.
    UniqueCode(String),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UniqueCode(code) => write!(f, "project code `{code}` is already in use"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UniqueCode(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(format!("json column: {value}"))
    }
}
