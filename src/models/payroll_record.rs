//! Payroll record models.
//!
//! This module contains the [`PayrollRecord`] stored per employee and period,
//! the [`SalaryBreakdown`] it carries, and the audit trace types that record
//! how every line item was derived.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// Earning line items for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Basic salary.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Balancing allowance that brings the fixed components up to CTC.
    pub special_allowance: Decimal,
    /// Conveyance allowance.
    pub conveyance_allowance: Decimal,
    /// Medical allowance.
    pub medical_allowance: Decimal,
    /// Overtime paid for the period.
    pub overtime_amount: Decimal,
    /// Reimbursed expenses.
    pub expenses: Decimal,
    /// One-off bonus.
    pub bonus: Decimal,
    /// Monetised remaining leave balance.
    pub leave_balance_amount: Decimal,
}

impl Earnings {
    /// Sum of every earning line.
    pub fn sum(&self) -> Decimal {
        self.basic
            + self.hra
            + self.special_allowance
            + self.conveyance_allowance
            + self.medical_allowance
            + self.overtime_amount
            + self.expenses
            + self.bonus
            + self.leave_balance_amount
    }

    /// Sum of the CTC-derived lines (excludes variable earnings).
    pub fn fixed_sum(&self) -> Decimal {
        self.basic
            + self.hra
            + self.special_allowance
            + self.conveyance_allowance
            + self.medical_allowance
    }
}

/// Deduction line items for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Employee provident fund contribution.
    pub pf_employee: Decimal,
    /// Voluntary provident fund.
    pub vpf: Decimal,
    /// Professional tax.
    pub pt: Decimal,
    /// Charity contribution.
    pub charity: Decimal,
    /// Miscellaneous deduction.
    pub misc_deduction: Decimal,
    /// Ad-hoc deduction for this period (advance recovery, fine).
    pub additional_deduction: Decimal,
}

impl Deductions {
    /// Sum of every deduction line.
    pub fn sum(&self) -> Decimal {
        self.pf_employee
            + self.vpf
            + self.pt
            + self.charity
            + self.misc_deduction
            + self.additional_deduction
    }
}

/// Contributions paid by the employer on top of CTC-derived pay.
///
/// These are reported on the payslip but are not part of the employee's
/// deductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer provident fund contribution (mirrors the employee's).
    pub pf_employer: Decimal,
}

/// Aggregated totals for a salary breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryTotals {
    /// Sum of all earnings, rounded to currency.
    pub gross_salary: Decimal,
    /// Sum of all deductions, rounded to currency.
    pub total_deductions: Decimal,
    /// `gross_salary - total_deductions`.
    pub net_salary: Decimal,
}

/// The complete salary breakdown for one employee and period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Deductions, Earnings, EmployerContributions, SalaryBreakdown, SalaryTotals};
/// use rust_decimal::Decimal;
///
/// let breakdown = SalaryBreakdown {
///     earnings: Earnings { basic: Decimal::new(25000, 0), ..Default::default() },
///     deductions: Deductions { pf_employee: Decimal::new(1800, 0), ..Default::default() },
///     employer: EmployerContributions { pf_employer: Decimal::new(1800, 0) },
///     totals: SalaryTotals {
///         gross_salary: Decimal::new(25000, 0),
///         total_deductions: Decimal::new(1800, 0),
///         net_salary: Decimal::new(23200, 0),
///     },
/// };
/// assert!(breakdown.is_balanced());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Earning lines.
    pub earnings: Earnings,
    /// Deduction lines.
    pub deductions: Deductions,
    /// Employer-side contributions.
    pub employer: EmployerContributions,
    /// Totals derived from the lines above.
    pub totals: SalaryTotals,
}

impl SalaryBreakdown {
    /// Returns true when the totals agree with the line items.
    pub fn is_balanced(&self) -> bool {
        self.totals.gross_salary.round_dp(2) == self.earnings.sum().round_dp(2)
            && self.totals.total_deductions.round_dp(2) == self.deductions.sum().round_dp(2)
            && self.totals.net_salary == self.totals.gross_salary - self.totals.total_deductions
    }
}

/// Attendance figures for a period, in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Days in the payroll month (fixed by policy).
    pub total_days: Decimal,
    /// `total_days - leaves_taken`.
    pub present_days: Decimal,
    /// Leave days taken in the period.
    pub leaves_taken: Decimal,
    /// `total_days - loss_of_pay_days`.
    pub paid_days: Decimal,
    /// Leave days not covered by the balance.
    pub loss_of_pay_days: Decimal,
    /// Leave days covered by the balance.
    pub leave_balance_used: Decimal,
}

/// Natural key of a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayrollKey {
    /// The employee identifier.
    pub emp_id: String,
    /// The pay period.
    pub period: PayPeriod,
}

impl PayrollKey {
    /// Creates a key for the given employee and period.
    pub fn new(emp_id: impl Into<String>, period: PayPeriod) -> Self {
        Self {
            emp_id: emp_id.into(),
            period,
        }
    }
}

/// What an upsert did to the stored payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No record existed for the key; one was created.
    Created,
    /// A record existed for the key and was overwritten.
    Replaced,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The policy setting(s) the rule draws on.
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during processing.
///
/// Warnings flag results that are valid but may need a reviewer's attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during processing.
    pub warnings: Vec<AuditWarning>,
    /// The total processing duration in microseconds.
    pub duration_us: u64,
}

/// The stored result of processing one employee for one period.
///
/// Uniquely keyed by `(emp_id, period)`; processing the same key again
/// overwrites every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for this processing run.
    pub record_id: Uuid,
    /// The employee the record is for.
    pub emp_id: String,
    /// The pay period.
    pub period: PayPeriod,
    /// Attendance and leave figures.
    pub attendance: Attendance,
    /// Every computed line item and the totals.
    pub breakdown: SalaryBreakdown,
    /// One-off hike added to this period's CTC only.
    pub hike_amount: Decimal,
    /// Why the additional deduction was made.
    pub deduction_reason: String,
    /// The user that processed the payroll.
    pub processed_by: String,
    /// When the payroll was processed.
    pub processed_at: DateTime<Utc>,
    /// The version of the engine that produced the record.
    pub engine_version: String,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollRecord {
    /// Returns the natural key of this record.
    pub fn key(&self) -> PayrollKey {
        PayrollKey::new(self.emp_id.clone(), self.period)
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

    fn create_sample_earnings() -> Earnings {
        Earnings {
            basic: dec("25000"),
            hra: dec("5000"),
            special_allowance: dec("15000"),
            conveyance_allowance: dec("2500"),
            medical_allowance: dec("2500"),
            overtime_amount: dec("1200.50"),
            expenses: dec("300"),
            bonus: dec("1000"),
            leave_balance_amount: dec("150"),
        }
    }

    #[test]
    fn test_earnings_sum_includes_every_line() {
        assert_eq!(create_sample_earnings().sum(), dec("52650.50"));
    }

    #[test]
    fn test_earnings_fixed_sum_excludes_variable_lines() {
        assert_eq!(create_sample_earnings().fixed_sum(), dec("50000"));
    }

    #[test]
    fn test_deductions_sum_includes_additional_deduction() {
        let deductions = Deductions {
            pf_employee: dec("1800"),
            pt: dec("200"),
            additional_deduction: dec("500"),
            ..Default::default()
        };
        assert_eq!(deductions.sum(), dec("2500"));
    }

    #[test]
    fn test_breakdown_is_balanced() {
        let earnings = create_sample_earnings();
        let deductions = Deductions {
            pf_employee: dec("1800"),
            ..Default::default()
        };
        let breakdown = SalaryBreakdown {
            totals: SalaryTotals {
                gross_salary: earnings.sum(),
                total_deductions: deductions.sum(),
                net_salary: earnings.sum() - deductions.sum(),
            },
            earnings,
            deductions,
            employer: EmployerContributions {
                pf_employer: dec("1800"),
            },
        };
        assert!(breakdown.is_balanced());
    }

    #[test]
    fn test_breakdown_detects_stale_totals() {
        let breakdown = SalaryBreakdown {
            earnings: create_sample_earnings(),
            totals: SalaryTotals {
                gross_salary: dec("50000"),
                total_deductions: Decimal::ZERO,
                net_salary: dec("50000"),
            },
            ..Default::default()
        };
        assert!(!breakdown.is_balanced());
    }

    #[test]
    fn test_upsert_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&UpsertOutcome::Created).unwrap(),
            "\"created\""
        );
        assert_eq!(
            serde_json::to_string(&UpsertOutcome::Replaced).unwrap(),
            "\"replaced\""
        );
    }

    #[test]
    fn test_payroll_keys_order_by_employee_then_period() {
        let a = PayrollKey::new("EMP001", PayPeriod::new(Month::December, 2024));
        let b = PayrollKey::new("EMP001", PayPeriod::new(Month::January, 2025));
        let c = PayrollKey::new("EMP002", PayPeriod::new(Month::January, 2024));
        assert!(a < b);
        assert!(b < c);
    }
}
