//! Result types returned by the payroll service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LeaveOutcome, PayPeriod, PayrollRecord, UpsertOutcome};

/// The outcome of processing one payroll request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPayroll {
    /// The stored payroll record.
    pub record: PayrollRecord,
    /// How the period's leave was settled.
    pub leave: LeaveOutcome,
    /// Whether the record was created or replaced an earlier run.
    pub upsert: UpsertOutcome,
}

/// A batch row that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee in the failing row.
    pub emp_id: String,
    /// Why the row failed.
    pub reason: String,
}

/// The outcome of processing a batch of requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Rows processed successfully.
    pub processed: Vec<ProcessedPayroll>,
    /// Rows that failed.
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    /// Number of rows processed successfully.
    pub fn success_count(&self) -> usize {
        self.processed.len()
    }

    /// Number of rows that failed.
    pub fn error_count(&self) -> usize {
        self.failed.len()
    }
}

/// One period of an employee's leave history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveHistoryEntry {
    /// The processed period.
    pub period: PayPeriod,
    /// Leave days taken.
    pub leaves_taken: Decimal,
    /// Days covered by the balance.
    pub leave_balance_used: Decimal,
    /// Unpaid days.
    pub loss_of_pay_days: Decimal,
    /// Days paid.
    pub paid_days: Decimal,
}

/// Totals across every employee processed for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period summarised.
    pub period: PayPeriod,
    /// Number of payroll records for the period.
    pub employees_processed: usize,
    /// Sum of gross salaries.
    pub total_gross: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
    /// Sum of employer PF contributions.
    pub total_pf_employer: Decimal,
}
