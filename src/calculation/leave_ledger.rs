//! Leave ledger settlement.
//!
//! Each month the employee is credited the monthly allocation. Leave taken
//! is drawn from the resulting balance; whatever the balance cannot cover
//! becomes loss-of-pay days. Settlement never mutates its inputs: it returns
//! the updated employee and a new ledger row for the caller to persist.
//!
//! Settling the same period twice does not credit the allocation twice. A
//! period always opens from the closing balance of the latest settled period
//! before it, and a re-settlement records which row it supersedes. Settling
//! a period earlier than the latest settled one leaves the employee's stored
//! balance alone.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::LeavePolicy;
use crate::models::{AuditStep, Employee, LeaveOutcome, LeaveTransaction, PayPeriod};

/// The result of settling a period's leave.
#[derive(Debug, Clone)]
pub struct LeaveSettlement {
    /// The paid/unpaid split.
    pub outcome: LeaveOutcome,
    /// The employee, with the remaining balance stored unless a later period
    /// is already settled.
    pub employee: Employee,
    /// The ledger row to append.
    pub transaction: LeaveTransaction,
    /// Whether the ledger already holds a period after this one.
    pub later_periods_settled: bool,
    /// The audit step recording this settlement.
    pub audit_step: AuditStep,
}

/// Where a settlement's opening balance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningBalance {
    /// The balance carried into the period.
    pub balance: Decimal,
    /// The ledger row being re-settled, if any.
    pub supersedes: Option<Uuid>,
}

/// Determines the balance carried into `period`.
///
/// `ledger` is the employee's rows in append order, so the last row for a
/// period is the one in force.
///
/// - an earlier period is settled: the closing balance of the latest one
/// - otherwise the opening balance of the first row ever settled
/// - no rows: the employee's stored balance
pub fn opening_balance(
    employee: &Employee,
    ledger: &[LeaveTransaction],
    period: PayPeriod,
) -> OpeningBalance {
    let prior = ledger
        .iter()
        .filter(|transaction| transaction.period < period)
        .fold(None, |latest: Option<&LeaveTransaction>, transaction| match latest {
            Some(row) if row.period > transaction.period => Some(row),
            _ => Some(transaction),
        });

    let balance = match (prior, ledger.first()) {
        (Some(row), _) => row.balance_after,
        (None, Some(first)) => first.balance_before,
        (None, None) => employee.leave_balance,
    };

    let supersedes = ledger
        .iter()
        .rev()
        .find(|transaction| transaction.period == period)
        .map(|transaction| transaction.transaction_id);

    OpeningBalance {
        balance,
        supersedes,
    }
}

/// Splits leave taken into covered and unpaid days against an opening
/// balance.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_leave;
/// use payroll_engine::config::LeavePolicy;
/// use rust_decimal::Decimal;
///
/// let outcome = split_leave(Decimal::ZERO, Decimal::new(2, 0), &LeavePolicy::default());
/// assert_eq!(outcome.available, Decimal::new(15, 1));
/// assert_eq!(outcome.leave_balance_used, Decimal::new(15, 1));
/// assert_eq!(outcome.loss_of_pay_days, Decimal::new(5, 1));
/// assert_eq!(outcome.remaining_balance, Decimal::ZERO);
/// ```
pub fn split_leave(
    opening_balance: Decimal,
    leaves_taken: Decimal,
    policy: &LeavePolicy,
) -> LeaveOutcome {
    let available = opening_balance + policy.monthly_allocation;
    let leave_balance_used = leaves_taken.min(available);
    let loss_of_pay_days = (leaves_taken - available).max(Decimal::ZERO);
    let remaining_balance = available - leave_balance_used;

    LeaveOutcome {
        available,
        leave_balance_used,
        loss_of_pay_days,
        remaining_balance,
        paid_days: policy.days_in_month - loss_of_pay_days,
        present_days: policy.days_in_month - leaves_taken,
    }
}

/// Settles a period's leave for an employee.
///
/// `ledger` is every row already settled for the employee, oldest first.
/// Negative `leaves_taken` is not rejected here; the caller validates input.
pub fn settle_leave(
    policy: &LeavePolicy,
    employee: &Employee,
    ledger: &[LeaveTransaction],
    leaves_taken: Decimal,
    period: PayPeriod,
    step_number: u32,
) -> LeaveSettlement {
    let opening = opening_balance(employee, ledger, period);
    let later_periods_settled = ledger.iter().any(|transaction| transaction.period > period);
    let outcome = split_leave(opening.balance, leaves_taken, policy);

    let transaction = LeaveTransaction {
        transaction_id: Uuid::new_v4(),
        emp_id: employee.emp_id.clone(),
        period,
        leaves_allocated: policy.monthly_allocation,
        leaves_used: outcome.leave_balance_used,
        balance_before: outcome.available - policy.monthly_allocation,
        balance_after: outcome.remaining_balance,
        supersedes: opening.supersedes,
        created_at: Utc::now(),
    };

    let mut updated = employee.clone();
    if !later_periods_settled {
        updated.leave_balance = outcome.remaining_balance;
    }

    let reasoning = if outcome.has_loss_of_pay() {
        format!(
            "{} days taken against {} available ({} carried + {} allocated): {} covered, {} unpaid",
            leaves_taken.normalize(),
            outcome.available.normalize(),
            opening.balance.normalize(),
            policy.monthly_allocation.normalize(),
            outcome.leave_balance_used.normalize(),
            outcome.loss_of_pay_days.normalize()
        )
    } else {
        format!(
            "{} days taken against {} available ({} carried + {} allocated): all covered, {} remaining",
            leaves_taken.normalize(),
            outcome.available.normalize(),
            opening.balance.normalize(),
            policy.monthly_allocation.normalize(),
            outcome.remaining_balance.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_settlement".to_string(),
        rule_name: "Leave Settlement".to_string(),
        policy_ref: "leave.monthly_allocation".to_string(),
        input: serde_json::json!({
            "leaves_taken": leaves_taken.normalize().to_string(),
            "opening_balance": opening.balance.normalize().to_string(),
            "monthly_allocation": policy.monthly_allocation.normalize().to_string(),
            "period": period.to_string(),
            "resettlement": opening.supersedes.is_some()
        }),
        output: serde_json::json!({
            "available": outcome.available.normalize().to_string(),
            "leave_balance_used": outcome.leave_balance_used.normalize().to_string(),
            "loss_of_pay_days": outcome.loss_of_pay_days.normalize().to_string(),
            "remaining_balance": outcome.remaining_balance.normalize().to_string(),
            "paid_days": outcome.paid_days.normalize().to_string(),
            "present_days": outcome.present_days.normalize().to_string()
        }),
        reasoning,
    };

    LeaveSettlement {
        outcome,
        employee: updated,
        transaction,
        later_periods_settled,
        audit_step,
    }
}

/// Shows the balance available in `period` with no leave taken, without
/// producing a ledger row.
///
/// A period that is already settled previews from its own opening balance,
/// so the result is the same before and after the month is processed.
pub fn preview_leave_balance(
    policy: &LeavePolicy,
    employee: &Employee,
    ledger: &[LeaveTransaction],
    period: PayPeriod,
) -> LeaveOutcome {
    let opening = opening_balance(employee, ledger, period);
    split_leave(opening.balance, Decimal::ZERO, policy)
}
