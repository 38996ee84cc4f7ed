//! Property tests for the calculation core.
//!
//! These check the invariants that must hold for any CTC, leave count and
//! adjustment, rather than for hand-picked scenarios.

use chrono::{Month, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    SalaryInput, VariableEarnings, apply_permanent_hike, compute_salary, loss_of_pay_ratio,
    round_currency, settle_leave, split_ctc,
};
use payroll_engine::config::{LeavePolicy, PayrollPolicy, ProvidentFundPolicy, SalarySplitPolicy};
use payroll_engine::models::{Employee, MONTHS_PER_YEAR, PayPeriod};

// =============================================================================
// Strategies
// =============================================================================

/// Monthly CTC between 0.01 and 10,000,000.00.
fn any_ctc() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

/// A non-negative amount up to 100,000.00.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

/// Leave days in half-day steps, 0 to 30.
fn any_leave_days() -> impl Strategy<Value = Decimal> {
    (0i64..=60).prop_map(|halves| Decimal::new(halves * 5, 1))
}

/// A carried-in balance in half-day steps, 0 to 20.
fn any_balance() -> impl Strategy<Value = Decimal> {
    (0i64..=40).prop_map(|halves| Decimal::new(halves * 5, 1))
}

fn employee(ctc_monthly: Decimal, leave_balance: Decimal) -> Employee {
    Employee {
        emp_id: "EMP001".to_string(),
        name: "Asha Rao".to_string(),
        email: "asha.rao@example.com".to_string(),
        designation: None,
        department: None,
        joining_date: None,
        ctc_monthly,
        ctc_annual: ctc_monthly * MONTHS_PER_YEAR,
        pf_opted: true,
        leave_balance,
        created_by: "hr".to_string(),
        created_at: Utc::now(),
    }
}

fn march() -> PayPeriod {
    PayPeriod::new(Month::March, 2025)
}

// =============================================================================
// Salary
// =============================================================================

proptest! {
    #[test]
    fn fixed_components_sum_to_ctc(ctc in any_ctc()) {
        let split = split_ctc(ctc, &SalarySplitPolicy::default(), 1);
        prop_assert_eq!(split.components.sum(), ctc);
    }

    #[test]
    fn pf_follows_basic_and_cap(ctc in any_ctc(), lop_days in any_leave_days(), pf_opted in any::<bool>()) {
        let policy = PayrollPolicy::default();
        let input = SalaryInput {
            loss_of_pay_ratio: loss_of_pay_ratio(lop_days, policy.leave.days_in_month),
            ..SalaryInput::new(ctc, pf_opted)
        };
        let breakdown = compute_salary(&policy, &input, 1).breakdown;

        let pf = ProvidentFundPolicy::default();
        if pf_opted {
            let expected = round_currency((breakdown.earnings.basic * pf.rate).min(pf.monthly_cap));
            prop_assert_eq!(breakdown.deductions.pf_employee, expected);
            prop_assert!(breakdown.deductions.pf_employee <= pf.monthly_cap);
        } else {
            prop_assert_eq!(breakdown.deductions.pf_employee, Decimal::ZERO);
        }
        prop_assert_eq!(breakdown.employer.pf_employer, breakdown.deductions.pf_employee);
    }

    #[test]
    fn net_is_gross_minus_deductions(
        ctc in any_ctc(),
        lop_days in any_leave_days(),
        additional_deduction in any_amount(),
        overtime_amount in any_amount(),
        expenses in any_amount(),
        bonus in any_amount(),
        leave_balance_amount in any_amount()
    ) {
        let input = SalaryInput {
            additional_deduction,
            loss_of_pay_ratio: loss_of_pay_ratio(lop_days, Decimal::new(30, 0)),
            overrides: VariableEarnings {
                overtime_amount,
                expenses,
                bonus,
                leave_balance_amount,
            },
            ..SalaryInput::new(ctc, true)
        };
        let breakdown = compute_salary(&PayrollPolicy::default(), &input, 1).breakdown;

        prop_assert_eq!(
            breakdown.totals.gross_salary - breakdown.totals.total_deductions,
            breakdown.totals.net_salary
        );
        prop_assert!(breakdown.is_balanced());
    }

    #[test]
    fn loss_of_pay_never_raises_fixed_pay(ctc in any_ctc(), lop_days in any_leave_days()) {
        let policy = PayrollPolicy::default();
        let full = compute_salary(&policy, &SalaryInput::new(ctc, true), 1).breakdown;
        let input = SalaryInput {
            loss_of_pay_ratio: loss_of_pay_ratio(lop_days, policy.leave.days_in_month),
            ..SalaryInput::new(ctc, true)
        };
        let scaled = compute_salary(&policy, &input, 1).breakdown;

        prop_assert!(scaled.earnings.basic <= full.earnings.basic);
        prop_assert!(scaled.earnings.hra <= full.earnings.hra);
    }
}

// =============================================================================
// Leave
// =============================================================================

proptest! {
    #[test]
    fn settlement_splits_leave_consistently(opening in any_balance(), taken in any_leave_days()) {
        let policy = LeavePolicy::default();
        let settlement = settle_leave(&policy, &employee(Decimal::new(50000, 0), opening), &[], taken, march(), 1);
        let outcome = settlement.outcome;

        prop_assert_eq!(outcome.available, opening + policy.monthly_allocation);
        prop_assert!(outcome.leave_balance_used <= outcome.available);
        prop_assert_eq!(outcome.loss_of_pay_days, (taken - outcome.available).max(Decimal::ZERO));
        prop_assert_eq!(outcome.remaining_balance, outcome.available - outcome.leave_balance_used);
        prop_assert!(outcome.remaining_balance >= Decimal::ZERO);
        prop_assert_eq!(outcome.leave_balance_used + outcome.loss_of_pay_days, taken);
        prop_assert_eq!(outcome.present_days + taken, policy.days_in_month);
        prop_assert_eq!(outcome.paid_days, policy.days_in_month - outcome.loss_of_pay_days);
        prop_assert_eq!(settlement.transaction.balance_before, opening);
        prop_assert_eq!(settlement.employee.leave_balance, outcome.remaining_balance);
    }

    #[test]
    fn resettling_a_period_is_idempotent(opening in any_balance(), first in any_leave_days(), second in any_leave_days()) {
        let policy = LeavePolicy::default();
        let base = employee(Decimal::new(50000, 0), opening);

        let once = settle_leave(&policy, &base, &[], first, march(), 1);
        let again = settle_leave(&policy, &once.employee, std::slice::from_ref(&once.transaction), second, march(), 1);
        let direct = settle_leave(&policy, &base, &[], second, march(), 1);

        prop_assert_eq!(again.outcome, direct.outcome);
        prop_assert_eq!(again.transaction.supersedes, Some(once.transaction.transaction_id));
    }

    #[test]
    fn resettling_an_earlier_period_ignores_later_ones(opening in any_balance(), first in any_leave_days(), later in any_leave_days()) {
        let policy = LeavePolicy::default();
        let base = employee(Decimal::new(50000, 0), opening);
        let april = PayPeriod::new(Month::April, 2025);

        let march_run = settle_leave(&policy, &base, &[], first, march(), 1);
        let april_run = settle_leave(&policy, &march_run.employee, std::slice::from_ref(&march_run.transaction), later, april, 1);
        let ledger = vec![march_run.transaction.clone(), april_run.transaction.clone()];
        let rerun = settle_leave(&policy, &april_run.employee, &ledger, first, march(), 1);

        prop_assert_eq!(rerun.outcome, march_run.outcome);
        prop_assert_eq!(rerun.employee.leave_balance, april_run.employee.leave_balance);
    }
}

// =============================================================================
// Hikes
// =============================================================================

proptest! {
    #[test]
    fn permanent_hike_keeps_annual_in_step(ctc in any_ctc(), hike in any_amount()) {
        let result = apply_permanent_hike(&employee(ctc, Decimal::ZERO), hike, 1);

        prop_assert_eq!(result.employee.ctc_monthly, ctc + hike);
        prop_assert_eq!(result.employee.ctc_annual, (ctc + hike) * MONTHS_PER_YEAR);
    }
}
