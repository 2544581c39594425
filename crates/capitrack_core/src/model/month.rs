//! Month-granularity calendar value.
//!
//! # Responsibility
//! - Parse and render `YYYY-MM` boundary strings.
//! - Convert to/from the first calendar day of the month used by storage.
//!
//! # Invariants
//! - `month` is always in `1..=12`.
//! - A `YearMonth` maps to exactly one storage date (the first of the month).

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid year-month regex"));

/// Error for malformed `YYYY-MM` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearMonthParseError(pub String);

impl Display for YearMonthParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid year-month value `{}`; expected YYYY-MM", self.0)
    }
}

impl Error for YearMonthParseError {}

/// A calendar month. Day-of-month carries no meaning in this domain; fields
/// declared at month granularity are normalized to the first of the month at
/// the storage edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, rejecting out-of-range components. Years are
    /// limited to four digits to match the `YYYY-MM` wire form.
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthParseError> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(YearMonthParseError(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Month of the given calendar date, dropping the day component.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of this month, the canonical storage form.
    pub fn first_day(&self) -> NaiveDate {
        // Parse only admits 4-digit years, which chrono always supports.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month within chrono range")
    }

    /// The month `offset` months after this one.
    pub fn plus_months(&self, offset: u32) -> Self {
        let zero_based = self.month as i64 - 1 + offset as i64;
        Self {
            year: self.year + (zero_based / 12) as i32,
            month: (zero_based % 12) as u32 + 1,
        }
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let caps = YEAR_MONTH_RE
            .captures(trimmed)
            .ok_or_else(|| YearMonthParseError(trimmed.to_string()))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| YearMonthParseError(trimmed.to_string()))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| YearMonthParseError(trimmed.to_string()))?;
        Self::new(year, month)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::YearMonth;
    use chrono::NaiveDate;

    #[test]
    fn parses_and_displays_year_month() {
        let ym: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 3);
        assert_eq!(ym.to_string(), "2025-03");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025-00".parse::<YearMonth>().is_err());
        assert!("2025-3".parse::<YearMonth>().is_err());
        assert!("march 2025".parse::<YearMonth>().is_err());
    }

    #[test]
    fn first_day_normalizes_to_month_start() {
        let ym = YearMonth::from_date(NaiveDate::from_ymd_opt(2024, 7, 19).unwrap());
        assert_eq!(ym.first_day(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn plus_months_wraps_across_year_boundaries() {
        let ym: YearMonth = "2024-11".parse().unwrap();
        assert_eq!(ym.plus_months(0).to_string(), "2024-11");
        assert_eq!(ym.plus_months(2).to_string(), "2025-01");
        assert_eq!(ym.plus_months(14).to_string(), "2026-01");
    }
}
