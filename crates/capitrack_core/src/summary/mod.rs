//! Aggregation helpers over retrieved snapshots.
//!
//! Pure functions: no transaction or connection involved. Callers fetch
//! snapshots through the repositories first.

mod amortization;
mod totals;

pub use amortization::{amortization_schedule, AmortizationEntry};
pub use totals::{budget_totals, BudgetTotals};
