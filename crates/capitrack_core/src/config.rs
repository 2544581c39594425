//! Database location configuration.
//!
//! # Responsibility
//! - Resolve the database file path from the environment with a local
//!   default.
//! - Create the containing directory before first use.

use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "CAPITRACK_DB_PATH";

const DEFAULT_DB_PATH: &str = "media/capitrack.db";

/// Resolves the database file path: `CAPITRACK_DB_PATH` when set and
/// non-empty, otherwise the local default.
pub fn database_path() -> PathBuf {
    match std::env::var(DB_PATH_ENV) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DB_PATH),
    }
}

/// Creates the directory containing the database file, if absent.
pub fn ensure_db_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
