//! Project domain model.
//!
//! # Responsibility
//! - Define the project record, its creation input and its update patch.
//! - Provide field-level validation invoked by repository write paths.
//!
//! # Invariants
//! - `code` and `name` are non-empty after trimming.
//! - Every investment entry has a positive amount and a positive duration.
//! - `investments` is always a sequence at the domain boundary, never a
//!   single bare record.

use crate::model::month::{YearMonth, YearMonthParseError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned project identifier.
pub type ProjectId = i64;

/// Closed set of status labels meaningful to business logic.
///
/// The storage column stays a free string so unknown historical labels
/// round-trip untouched; this enum only names the values consumers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Future,
    InProgress,
    Done,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "future" => Some(Self::Future),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// One investment tranche attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    /// Invested amount in integer cents. Must be positive.
    pub amount_cents: i64,
    /// Month the spend takes effect.
    pub purchase_month: YearMonth,
    /// Straight-line amortization duration. Must be positive.
    pub duration_months: u32,
}

/// Validation failures raised by repository write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyCode,
    EmptyName,
    EmptyLabel,
    EmptyNewsText,
    NonPositiveInvestmentAmount(i64),
    ZeroInvestmentDuration,
    MalformedMonth(YearMonthParseError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "project code must not be empty"),
            Self::EmptyName => write!(f, "project name must not be empty"),
            Self::EmptyLabel => write!(f, "budget line label must not be empty"),
            Self::EmptyNewsText => write!(f, "news text must not be empty"),
            Self::NonPositiveInvestmentAmount(cents) => {
                write!(f, "investment amount must be positive, got {cents} cents")
            }
            Self::ZeroInvestmentDuration => {
                write!(f, "investment duration must be at least one month")
            }
            Self::MalformedMonth(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedMonth(err) => Some(err),
            _ => None,
        }
    }
}

impl From<YearMonthParseError> for ValidationError {
    fn from(value: YearMonthParseError) -> Self {
        Self::MalformedMonth(value)
    }
}

/// Detached project snapshot returned by repository reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Globally unique business code, e.g. `PRJ-2025-001`.
    pub code: String,
    pub name: String,
    pub owner: Option<String>,
    /// Schedule bounds at month granularity.
    pub start_month: Option<YearMonth>,
    pub end_month: Option<YearMonth>,
    pub description: Option<String>,
    pub deliverables: Option<String>,
    /// Free string in storage; see [`ProjectStatus`] for the meaningful set.
    pub status: Option<String>,
    /// R&D tax-credit flag and claimed amount.
    pub cir: bool,
    pub cir_amount_cents: Option<i64>,
    /// Grant flag and amount.
    pub subvention: bool,
    pub subvention_amount_cents: Option<i64>,
    /// Whether investment amortization applies to this project.
    pub amortissement: bool,
    pub investments: Vec<Investment>,
    pub themes: Vec<String>,
    /// Image paths in display order.
    pub images: Vec<String>,
    /// Unix epoch milliseconds, store-managed.
    pub created_at: i64,
    pub updated_at: i64,
}

/// Creation input for a project. Only `code` and `name` are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub code: String,
    pub name: String,
    pub owner: Option<String>,
    pub start_month: Option<YearMonth>,
    pub end_month: Option<YearMonth>,
    pub description: Option<String>,
    pub deliverables: Option<String>,
    pub status: Option<String>,
    pub cir: bool,
    pub cir_amount_cents: Option<i64>,
    pub subvention: bool,
    pub subvention_amount_cents: Option<i64>,
    pub amortissement: bool,
    pub investments: Vec<Investment>,
    pub themes: Vec<String>,
    pub images: Vec<String>,
}

impl NewProject {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks required fields and investment entries before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_project_fields(&self.code, &self.name, &self.investments)
    }
}

/// Partial update for a project. `None` leaves the field untouched; for
/// clearable fields, `Some(None)` resets the stored value to null/empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub owner: Option<Option<String>>,
    pub start_month: Option<Option<YearMonth>>,
    pub end_month: Option<Option<YearMonth>>,
    pub description: Option<Option<String>>,
    pub deliverables: Option<Option<String>>,
    pub status: Option<Option<String>>,
    pub cir: Option<bool>,
    pub cir_amount_cents: Option<Option<i64>>,
    pub subvention: Option<bool>,
    pub subvention_amount_cents: Option<Option<i64>>,
    pub amortissement: Option<bool>,
    pub investments: Option<Vec<Investment>>,
    pub themes: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

impl ProjectPatch {
    /// Applies every supplied field onto the snapshot, leaving the rest as-is.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(code) = &self.code {
            project.code = code.clone();
        }
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(owner) = &self.owner {
            project.owner = owner.clone();
        }
        if let Some(start_month) = &self.start_month {
            project.start_month = *start_month;
        }
        if let Some(end_month) = &self.end_month {
            project.end_month = *end_month;
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(deliverables) = &self.deliverables {
            project.deliverables = deliverables.clone();
        }
        if let Some(status) = &self.status {
            project.status = status.clone();
        }
        if let Some(cir) = self.cir {
            project.cir = cir;
        }
        if let Some(cir_amount_cents) = &self.cir_amount_cents {
            project.cir_amount_cents = *cir_amount_cents;
        }
        if let Some(subvention) = self.subvention {
            project.subvention = subvention;
        }
        if let Some(subvention_amount_cents) = &self.subvention_amount_cents {
            project.subvention_amount_cents = *subvention_amount_cents;
        }
        if let Some(amortissement) = self.amortissement {
            project.amortissement = amortissement;
        }
        if let Some(investments) = &self.investments {
            project.investments = investments.clone();
        }
        if let Some(themes) = &self.themes {
            project.themes = themes.clone();
        }
        if let Some(images) = &self.images {
            project.images = images.clone();
        }
    }
}

/// Shared write-path validation for create and patched-update.
pub fn validate_project_fields(
    code: &str,
    name: &str,
    investments: &[Investment],
) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    validate_investments(investments)
}

/// Rejects malformed investment entries before they reach storage.
pub fn validate_investments(investments: &[Investment]) -> Result<(), ValidationError> {
    for entry in investments {
        if entry.amount_cents <= 0 {
            return Err(ValidationError::NonPositiveInvestmentAmount(
                entry.amount_cents,
            ));
        }
        if entry.duration_months == 0 {
            return Err(ValidationError::ZeroInvestmentDuration);
        }
    }
    Ok(())
}
