//! Core persistence layer for capital-project budget tracking.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod summary;

pub use logging::{default_log_level, init_logging};
pub use model::budget::{BudgetLine, BudgetLineId, NewBudgetLine, NewsId, ProjectNews};
pub use model::money::{cents_to_euros, euros_to_cents, format_euros};
pub use model::month::{YearMonth, YearMonthParseError};
pub use model::project::{
    Investment, NewProject, Project, ProjectId, ProjectPatch, ProjectStatus, ValidationError,
};
pub use repo::budget_repo::{BudgetLineRepository, SqliteBudgetLineRepository};
pub use repo::news_repo::{NewsRepository, SqliteNewsRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::seed_demo_if_empty;
pub use summary::{amortization_schedule, budget_totals, AmortizationEntry, BudgetTotals};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
