//! Leave ledger models.
//!
//! A [`LeaveTransaction`] is written once per settlement and never edited.
//! A [`LeaveOutcome`] is the paid/unpaid split a settlement produced.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// One row of an employee's leave ledger.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{LeaveTransaction, PayPeriod};
/// use chrono::{Month, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let transaction = LeaveTransaction {
///     transaction_id: Uuid::new_v4(),
///     emp_id: "EMP001".to_string(),
///     period: PayPeriod::new(Month::March, 2025),
///     leaves_allocated: Decimal::new(15, 1),
///     leaves_used: Decimal::new(15, 1),
///     balance_before: Decimal::ZERO,
///     balance_after: Decimal::ZERO,
///     supersedes: None,
///     created_at: Utc::now(),
/// };
/// assert_eq!(transaction.available(), Decimal::new(15, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTransaction {
    /// Unique identifier for this ledger row.
    pub transaction_id: Uuid,
    /// The employee the row belongs to.
    pub emp_id: String,
    /// The period that was settled.
    pub period: PayPeriod,
    /// Days credited for the period.
    pub leaves_allocated: Decimal,
    /// Days drawn from the balance.
    pub leaves_used: Decimal,
    /// Balance carried in from the previous settlement.
    pub balance_before: Decimal,
    /// Balance carried out to the next settlement.
    pub balance_after: Decimal,
    /// The row for the same period that this one replaces, if the period
    /// was settled more than once.
    #[serde(default)]
    pub supersedes: Option<Uuid>,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl LeaveTransaction {
    /// Balance available for the period: carried-in balance plus allocation.
    pub fn available(&self) -> Decimal {
        self.balance_before + self.leaves_allocated
    }
}

/// The result of settling a month's leave against the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveOutcome {
    /// Carried-in balance plus the monthly allocation.
    pub available: Decimal,
    /// Days covered by the balance.
    pub leave_balance_used: Decimal,
    /// Days not covered by the balance (unpaid).
    pub loss_of_pay_days: Decimal,
    /// Balance carried to the next period.
    pub remaining_balance: Decimal,
    /// `days_in_month - loss_of_pay_days`.
    pub paid_days: Decimal,
    /// `days_in_month - leaves_taken`.
    pub present_days: Decimal,
}

impl LeaveOutcome {
    /// Returns true when part of the leave taken is unpaid.
    pub fn has_loss_of_pay(&self) -> bool {
        self.loss_of_pay_days > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_available_adds_allocation_to_opening_balance() {
        let transaction = LeaveTransaction {
            transaction_id: Uuid::new_v4(),
            emp_id: "EMP001".to_string(),
            period: PayPeriod::new(Month::May, 2025),
            leaves_allocated: dec("1.5"),
            leaves_used: dec("1"),
            balance_before: dec("3"),
            balance_after: dec("3.5"),
            supersedes: None,
            created_at: Utc::now(),
        };
        assert_eq!(transaction.available(), dec("4.5"));
    }

    #[test]
    fn test_has_loss_of_pay() {
        let mut outcome = LeaveOutcome {
            available: dec("1.5"),
            leave_balance_used: dec("1.5"),
            loss_of_pay_days: dec("0.5"),
            remaining_balance: Decimal::ZERO,
            paid_days: dec("29.5"),
            present_days: dec("28"),
        };
        assert!(outcome.has_loss_of_pay());

        outcome.loss_of_pay_days = Decimal::ZERO;
        assert!(!outcome.has_loss_of_pay());
    }

    #[test]
    fn test_transaction_deserializes_without_supersedes() {
        let json = r#"{
            "transaction_id": "7f1c3c1e-2a7b-4a35-9d55-1f0b4f4a2d10",
            "emp_id": "EMP001",
            "period": {"month": "June", "year": 2025},
            "leaves_allocated": "1.5",
            "leaves_used": "0",
            "balance_before": "2",
            "balance_after": "3.5",
            "created_at": "2025-06-30T10:00:00Z"
        }"#;

        let transaction: LeaveTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.period, PayPeriod::new(Month::June, 2025));
        assert!(transaction.supersedes.is_none());
        assert_eq!(transaction.balance_after, dec("3.5"));
    }
}
