//! CAPEX/OPEX totals over budget line snapshots.

use crate::model::budget::BudgetLine;

/// Per-partition spend totals for one project, in integer cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetTotals {
    pub capex_cents: i64,
    pub opex_cents: i64,
}

impl BudgetTotals {
    /// Combined capital and operating spend.
    pub fn total_cents(&self) -> i64 {
        self.capex_cents + self.opex_cents
    }
}

/// Partitions budget lines by `is_capex` and sums each side. Integer sums,
/// so the result is independent of insertion order.
pub fn budget_totals(lines: &[BudgetLine]) -> BudgetTotals {
    let mut totals = BudgetTotals::default();
    for line in lines {
        if line.is_capex {
            totals.capex_cents += line.amount_cents;
        } else {
            totals.opex_cents += line.amount_cents;
        }
    }
    totals
}
