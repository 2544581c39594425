//! Straight-line amortization schedules for investment entries.

use crate::model::month::YearMonth;
use crate::model::project::Investment;

/// One month of depreciation in a straight-line schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmortizationEntry {
    pub month: YearMonth,
    pub amount_cents: i64,
}

/// Produces the straight-line monthly depreciation sequence for one
/// investment: `duration_months` consecutive entries starting at
/// `purchase_month`, each `amount / duration` in cents.
///
/// The integer-division remainder is carried into the final period, so the
/// schedule always sums exactly to `amount_cents`.
///
/// Returns an empty schedule for entries the write path would have rejected
/// (non-positive amount or zero duration).
pub fn amortization_schedule(investment: &Investment) -> Vec<AmortizationEntry> {
    if investment.amount_cents <= 0 || investment.duration_months == 0 {
        return Vec::new();
    }

    let duration = i64::from(investment.duration_months);
    let base = investment.amount_cents / duration;
    let remainder = investment.amount_cents - base * duration;

    (0..investment.duration_months)
        .map(|offset| {
            let last = offset == investment.duration_months - 1;
            AmortizationEntry {
                month: investment.purchase_month.plus_months(offset),
                amount_cents: if last { base + remainder } else { base },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::amortization_schedule;
    use crate::model::project::Investment;

    fn investment(amount_cents: i64, purchase_month: &str, duration_months: u32) -> Investment {
        Investment {
            amount_cents,
            purchase_month: purchase_month.parse().unwrap(),
            duration_months,
        }
    }

    #[test]
    fn even_split_over_duration() {
        let schedule = amortization_schedule(&investment(36_000_00, "2025-01", 36));
        assert_eq!(schedule.len(), 36);
        assert!(schedule.iter().all(|entry| entry.amount_cents == 1_000_00));
        assert_eq!(schedule[0].month.to_string(), "2025-01");
        assert_eq!(schedule[35].month.to_string(), "2027-12");
    }

    #[test]
    fn remainder_lands_in_final_period_and_total_is_exact() {
        let schedule = amortization_schedule(&investment(10_000, "2024-11", 3));
        assert_eq!(
            schedule.iter().map(|e| e.amount_cents).collect::<Vec<_>>(),
            vec![3_333, 3_333, 3_334]
        );
        let total: i64 = schedule.iter().map(|e| e.amount_cents).sum();
        assert_eq!(total, 10_000);
        assert_eq!(schedule[2].month.to_string(), "2025-01");
    }

    #[test]
    fn single_month_duration_gets_full_amount() {
        let schedule = amortization_schedule(&investment(777, "2025-06", 1));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].amount_cents, 777);
    }

    #[test]
    fn rejected_shapes_yield_empty_schedule() {
        assert!(amortization_schedule(&investment(0, "2025-01", 12)).is_empty());
        assert!(amortization_schedule(&investment(100, "2025-01", 0)).is_empty());
    }
}
