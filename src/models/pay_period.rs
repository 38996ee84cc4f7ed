//! Monthly pay period model.
//!
//! Payroll runs once per calendar month, so a [`PayPeriod`] is simply a
//! month and a year. Periods order chronologically.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A monthly pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::Month;
///
/// let period = PayPeriod::new(Month::January, 2026);
/// assert_eq!(period.to_string(), "January 2026");
/// assert_eq!(period.previous(), PayPeriod::new(Month::December, 2025));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar month.
    pub month: Month,
    /// The calendar year.
    pub year: i32,
}

impl PayPeriod {
    /// Creates a pay period for the given month and year.
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// Returns the period a calendar date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        // month() is always 1..=12
        let month = u8::try_from(date.month())
            .ok()
            .and_then(|number| Month::try_from(number).ok())
            .unwrap_or(Month::January);
        Self::new(month, date.year())
    }

    /// Parses a month name ("March", "mar", "MARCH") together with a year.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::Month;
    ///
    /// let period = PayPeriod::from_name("sep", 2025).unwrap();
    /// assert_eq!(period.month, Month::September);
    /// assert!(PayPeriod::from_name("Smarch", 2025).is_err());
    /// ```
    pub fn from_name(month: &str, year: i32) -> EngineResult<Self> {
        let month = month
            .trim()
            .parse::<Month>()
            .map_err(|_| EngineError::InvalidPeriod {
                message: format!("unknown month '{}'", month),
            })?;

        if NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).is_none() {
            return Err(EngineError::InvalidPeriod {
                message: format!("year {} is out of range", year),
            });
        }

        Ok(Self { month, year })
    }

    /// Returns the first calendar day of the period.
    ///
    /// Used to select the payroll policy effective for this period.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// A monotone key: consecutive months differ by exactly one.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month.number_from_month()) - 1
    }

    /// Returns the period immediately before this one.
    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self::new(Month::December, self.year - 1),
            month => Self::new(month.pred(), self.year),
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

impl PartialOrd for PayPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PayPeriod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}
