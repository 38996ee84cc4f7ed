//! Provident fund contribution.
//!
//! Employees who opt in contribute a share of basic salary, capped at the
//! statutory monthly ceiling; the employer contributes the same amount.

use rust_decimal::Decimal;

use crate::config::ProvidentFundPolicy;
use crate::models::AuditStep;

use super::round_currency;

/// The result of calculating provident fund contributions.
#[derive(Debug, Clone)]
pub struct ProvidentFundResult {
    /// Deducted from the employee's pay.
    pub employee_contribution: Decimal,
    /// Paid by the employer on top.
    pub employer_contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates provident fund contributions from basic salary.
///
/// `basic` is the basic salary actually paid for the period, i.e. after any
/// loss-of-pay scaling.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_provident_fund;
/// use payroll_engine::config::ProvidentFundPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = ProvidentFundPolicy::default();
///
/// let capped = calculate_provident_fund(Decimal::new(25000, 0), true, &policy, 1);
/// assert_eq!(capped.employee_contribution, Decimal::new(1800, 0));
///
/// let opted_out = calculate_provident_fund(Decimal::new(25000, 0), false, &policy, 1);
/// assert_eq!(opted_out.employee_contribution, Decimal::ZERO);
/// ```
pub fn calculate_provident_fund(
    basic: Decimal,
    pf_opted: bool,
    policy: &ProvidentFundPolicy,
    step_number: u32,
) -> ProvidentFundResult {
    if !pf_opted {
        let audit_step = AuditStep {
            step_number,
            rule_id: "provident_fund".to_string(),
            rule_name: "Provident Fund".to_string(),
            policy_ref: "provident_fund".to_string(),
            input: serde_json::json!({
                "basic": basic.normalize().to_string(),
                "pf_opted": false
            }),
            output: serde_json::json!({
                "pf_employee": "0",
                "pf_employer": "0"
            }),
            reasoning: "No provident fund - employee has not opted in".to_string(),
        };

        return ProvidentFundResult {
            employee_contribution: Decimal::ZERO,
            employer_contribution: Decimal::ZERO,
            audit_step,
        };
    }

    let uncapped = basic * policy.rate;
    let capped = uncapped > policy.monthly_cap;
    let contribution = round_currency(uncapped.min(policy.monthly_cap));

    let reasoning = if capped {
        format!(
            "{} x {} = {} exceeds cap; contribution capped at {}",
            basic.normalize(),
            policy.rate.normalize(),
            uncapped.normalize(),
            contribution.normalize()
        )
    } else {
        format!(
            "{} x {} = {}",
            basic.normalize(),
            policy.rate.normalize(),
            contribution.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "provident_fund".to_string(),
        rule_name: "Provident Fund".to_string(),
        policy_ref: "provident_fund".to_string(),
        input: serde_json::json!({
            "basic": basic.normalize().to_string(),
            "pf_opted": true,
            "rate": policy.rate.normalize().to_string(),
            "monthly_cap": policy.monthly_cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "pf_employee": contribution.normalize().to_string(),
            "pf_employer": contribution.normalize().to_string(),
            "capped": capped
        }),
        reasoning,
    };

    ProvidentFundResult {
        employee_contribution: contribution,
        employer_contribution: contribution,
        audit_step,
    }
}
