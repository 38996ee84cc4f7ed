//! Salary calculation.
//!
//! Runs the full breakdown for one period in a fixed order:
//!
//! 1. Split CTC into fixed components
//! 2. Scale fixed components for loss of pay
//! 3. Calculate provident fund from the scaled basic
//! 4. Add variable earnings and other deductions, then derive totals
//!
//! The calculation is pure and performs no validation; negative amounts flow
//! through the arithmetic unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::models::{
    AuditStep, Deductions, Earnings, EmployerContributions, SalaryBreakdown, SalaryTotals,
};

use super::{apply_loss_of_pay, calculate_provident_fund, round_currency, split_ctc};

/// Earnings added on top of the CTC split, never scaled for loss of pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEarnings {
    /// Overtime pay for the period.
    #[serde(default)]
    pub overtime_amount: Decimal,
    /// Reimbursed expenses.
    #[serde(default)]
    pub expenses: Decimal,
    /// Bonus for the period.
    #[serde(default)]
    pub bonus: Decimal,
    /// Monetised remaining leave balance.
    #[serde(default)]
    pub leave_balance_amount: Decimal,
}

/// Deduction lines that default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeductions {
    /// Voluntary provident fund.
    #[serde(default)]
    pub vpf: Decimal,
    /// Professional tax.
    #[serde(default)]
    pub pt: Decimal,
    /// Charity contribution.
    #[serde(default)]
    pub charity: Decimal,
    /// Miscellaneous deduction.
    #[serde(default)]
    pub misc_deduction: Decimal,
}

/// Everything needed to compute one period's salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// CTC for this period, including any one-off hike.
    pub ctc_monthly: Decimal,
    /// Whether provident fund applies.
    pub pf_opted: bool,
    /// Ad-hoc deduction such as an advance or fine.
    #[serde(default)]
    pub additional_deduction: Decimal,
    /// Unpaid fraction of the month, from leave settlement.
    #[serde(default)]
    pub loss_of_pay_ratio: Decimal,
    /// Variable earnings.
    #[serde(default)]
    pub overrides: VariableEarnings,
    /// Remaining deduction lines.
    #[serde(default)]
    pub other_deductions: OtherDeductions,
}

impl SalaryInput {
    /// Creates an input with no loss of pay and no adjustments.
    pub fn new(ctc_monthly: Decimal, pf_opted: bool) -> Self {
        Self {
            ctc_monthly,
            pf_opted,
            additional_deduction: Decimal::ZERO,
            loss_of_pay_ratio: Decimal::ZERO,
            overrides: VariableEarnings::default(),
            other_deductions: OtherDeductions::default(),
        }
    }
}

/// The computed breakdown and the steps that produced it.
#[derive(Debug, Clone)]
pub struct SalaryCalculation {
    /// The complete, balanced breakdown.
    pub breakdown: SalaryBreakdown,
    /// Audit steps in the order they ran.
    pub audit_steps: Vec<AuditStep>,
}

/// Monetises a leave balance at a per-day rate, rounded to currency.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::leave_encashment_amount;
/// use rust_decimal::Decimal;
///
/// let amount = leave_encashment_amount(Decimal::new(35, 1), Decimal::new(100, 0));
/// assert_eq!(amount, Decimal::new(350, 0));
/// ```
pub fn leave_encashment_amount(remaining_balance: Decimal, rate_per_day: Decimal) -> Decimal {
    round_currency(remaining_balance * rate_per_day)
}

/// Computes the full salary breakdown for one period.
///
/// Audit steps are numbered from `step_number` onwards.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{SalaryInput, compute_salary};
/// use payroll_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::new(50000, 0), true);
/// let result = compute_salary(&PayrollPolicy::default(), &input, 1);
///
/// assert_eq!(result.breakdown.totals.gross_salary, Decimal::new(50000, 0));
/// assert_eq!(result.breakdown.deductions.pf_employee, Decimal::new(1800, 0));
/// assert_eq!(result.breakdown.totals.net_salary, Decimal::new(48200, 0));
/// ```
pub fn compute_salary(
    policy: &PayrollPolicy,
    input: &SalaryInput,
    step_number: u32,
) -> SalaryCalculation {
    let mut audit_steps = Vec::with_capacity(4);
    let mut step = step_number;

    let split = split_ctc(input.ctc_monthly, &policy.salary, step);
    audit_steps.push(split.audit_step);
    step += 1;

    let scaled = apply_loss_of_pay(&split.components, input.loss_of_pay_ratio, step);
    audit_steps.push(scaled.audit_step);
    step += 1;
    let fixed = scaled.components;

    let pf = calculate_provident_fund(fixed.basic, input.pf_opted, &policy.provident_fund, step);
    audit_steps.push(pf.audit_step);
    step += 1;

    let earnings = Earnings {
        basic: fixed.basic,
        hra: fixed.hra,
        special_allowance: fixed.special_allowance,
        conveyance_allowance: fixed.conveyance_allowance,
        medical_allowance: fixed.medical_allowance,
        overtime_amount: input.overrides.overtime_amount,
        expenses: input.overrides.expenses,
        bonus: input.overrides.bonus,
        leave_balance_amount: input.overrides.leave_balance_amount,
    };

    let deductions = Deductions {
        pf_employee: pf.employee_contribution,
        vpf: input.other_deductions.vpf,
        pt: input.other_deductions.pt,
        charity: input.other_deductions.charity,
        misc_deduction: input.other_deductions.misc_deduction,
        additional_deduction: input.additional_deduction,
    };

    let gross_salary = round_currency(earnings.sum());
    let total_deductions = round_currency(deductions.sum());
    let net_salary = gross_salary - total_deductions;

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "salary_totals".to_string(),
        rule_name: "Salary Totals".to_string(),
        policy_ref: "salary".to_string(),
        input: serde_json::json!({
            "fixed_earnings": earnings.fixed_sum().normalize().to_string(),
            "overtime_amount": earnings.overtime_amount.normalize().to_string(),
            "expenses": earnings.expenses.normalize().to_string(),
            "bonus": earnings.bonus.normalize().to_string(),
            "leave_balance_amount": earnings.leave_balance_amount.normalize().to_string(),
            "pf_employee": deductions.pf_employee.normalize().to_string(),
            "additional_deduction": deductions.additional_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "Gross {} - deductions {} = net {}",
            gross_salary.normalize(),
            total_deductions.normalize(),
            net_salary.normalize()
        ),
    });

    SalaryCalculation {
        breakdown: SalaryBreakdown {
            earnings,
            deductions,
            employer: EmployerContributions {
                pf_employer: pf.employer_contribution,
            },
            totals: SalaryTotals {
                gross_salary,
                total_deductions,
                net_salary,
            },
        },
        audit_steps,
    }
}
