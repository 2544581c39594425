//! Budget line and project news models.
//!
//! # Invariants
//! - `amount_cents` is a signed exact integer; negative values represent
//!   reversals or credits.
//! - A budget line is immutable once created; news text may be edited.

use crate::model::project::ProjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned budget line identifier.
pub type BudgetLineId = i64;

/// Store-assigned news item identifier.
pub type NewsId = i64;

/// One capital or operating spend entry owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: BudgetLineId,
    pub project_id: ProjectId,
    pub label: String,
    /// `true` = capital expenditure, `false` = operating expenditure.
    pub is_capex: bool,
    /// Signed amount in integer cents.
    pub amount_cents: i64,
    /// Spend/engagement date, when known.
    pub value_date: Option<NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Creation input for a budget line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudgetLine {
    pub label: String,
    pub is_capex: bool,
    pub amount_cents: i64,
    pub value_date: Option<NaiveDate>,
}

impl NewBudgetLine {
    pub fn new(label: impl Into<String>, amount_cents: i64, is_capex: bool) -> Self {
        Self {
            label: label.into(),
            is_capex,
            amount_cents,
            value_date: None,
        }
    }
}

/// Free-text news item attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNews {
    pub id: NewsId,
    pub project_id: ProjectId,
    /// Trimmed, non-empty body text.
    pub text: String,
    pub created_at: i64,
}
