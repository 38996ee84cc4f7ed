//! CTC hikes.
//!
//! A permanent hike changes the employee's stored CTC from now on. A one-off
//! hike only raises the CTC used for a single period's calculation and never
//! touches the employee.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Employee, MONTHS_PER_YEAR};

/// The result of applying a permanent hike.
#[derive(Debug, Clone)]
pub struct HikeResult {
    /// The employee with the new CTC.
    pub employee: Employee,
    /// The audit step recording the change.
    pub audit_step: AuditStep,
}

/// Adds `amount` to the employee's monthly CTC and recomputes annual CTC.
///
/// The amount is not validated; a negative amount lowers CTC.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::apply_permanent_hike;
/// use payroll_engine::models::NewEmployee;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let employee = NewEmployee {
///     emp_id: "EMP001".to_string(),
///     name: "Asha Rao".to_string(),
///     email: "asha.rao@example.com".to_string(),
///     designation: None,
///     department: None,
///     joining_date: None,
///     ctc_monthly: Decimal::new(50000, 0),
///     pf_opted: true,
///     created_by: "hr".to_string(),
/// }
/// .into_employee(Decimal::new(15, 1), Utc::now());
///
/// let result = apply_permanent_hike(&employee, Decimal::new(5000, 0), 1);
/// assert_eq!(result.employee.ctc_monthly, Decimal::new(55000, 0));
/// assert_eq!(result.employee.ctc_annual, Decimal::new(660000, 0));
/// ```
pub fn apply_permanent_hike(employee: &Employee, amount: Decimal, step_number: u32) -> HikeResult {
    let previous_monthly = employee.ctc_monthly;
    let mut updated = employee.clone();
    updated.ctc_monthly = previous_monthly + amount;
    updated.ctc_annual = updated.ctc_monthly * MONTHS_PER_YEAR;

    let audit_step = AuditStep {
        step_number,
        rule_id: "permanent_hike".to_string(),
        rule_name: "Permanent Hike".to_string(),
        policy_ref: "employee.ctc_monthly".to_string(),
        input: serde_json::json!({
            "ctc_monthly": previous_monthly.normalize().to_string(),
            "hike_amount": amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "ctc_monthly": updated.ctc_monthly.normalize().to_string(),
            "ctc_annual": updated.ctc_annual.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} = {} monthly, {} x {} = {} annual",
            previous_monthly.normalize(),
            amount.normalize(),
            updated.ctc_monthly.normalize(),
            updated.ctc_monthly.normalize(),
            MONTHS_PER_YEAR,
            updated.ctc_annual.normalize()
        ),
    };

    HikeResult {
        employee: updated,
        audit_step,
    }
}

/// Returns the CTC to use for one period when a one-off hike applies.
pub fn one_off_ctc(employee: &Employee, one_off_hike: Decimal) -> Decimal {
    employee.ctc_monthly + one_off_hike
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(ctc_monthly: &str) -> Employee {
        Employee {
            emp_id: "EMP001".to_string(),
            name: "Asha Rao".to_string(),
            email: "asha.rao@example.com".to_string(),
            designation: None,
            department: None,
            joining_date: None,
            ctc_monthly: dec(ctc_monthly),
            ctc_annual: dec(ctc_monthly) * dec("12"),
            pf_opted: true,
            leave_balance: dec("1.5"),
            created_by: "hr".to_string(),
            created_at: Utc::now(),
        }
    }

    /// HK-001: 5000 on 50000
    #[test]
    fn test_permanent_hike_updates_monthly_and_annual() {
        let employee = create_test_employee("50000");
        let result = apply_permanent_hike(&employee, dec("5000"), 1);

        assert_eq!(result.employee.ctc_monthly, dec("55000"));
        assert_eq!(result.employee.ctc_annual, dec("660000"));
    }

    /// HK-002: the input employee is untouched
    #[test]
    fn test_permanent_hike_returns_copy() {
        let employee = create_test_employee("50000");
        let _ = apply_permanent_hike(&employee, dec("5000"), 1);

        assert_eq!(employee.ctc_monthly, dec("50000"));
    }

    /// HK-003: negative correction
    #[test]
    fn test_negative_hike_lowers_ctc() {
        let employee = create_test_employee("50000");
        let result = apply_permanent_hike(&employee, dec("-2500"), 1);

        assert_eq!(result.employee.ctc_monthly, dec("47500"));
        assert_eq!(result.employee.ctc_annual, dec("570000"));
    }

    /// HK-004: one-off hike raises only the period CTC
    #[test]
    fn test_one_off_ctc_leaves_employee_alone() {
        let employee = create_test_employee("50000");

        assert_eq!(one_off_ctc(&employee, dec("3000")), dec("53000"));
        assert_eq!(one_off_ctc(&employee, Decimal::ZERO), dec("50000"));
        assert_eq!(employee.ctc_monthly, dec("50000"));
    }

    #[test]
    fn test_audit_step_records_before_and_after() {
        let employee = create_test_employee("50000");
        let result = apply_permanent_hike(&employee, dec("5000"), 1);

        assert_eq!(result.audit_step.rule_id, "permanent_hike");
        assert_eq!(result.audit_step.input["ctc_monthly"].as_str().unwrap(), "50000");
        assert_eq!(result.audit_step.output["ctc_annual"].as_str().unwrap(), "660000");
        assert!(result.audit_step.reasoning.contains("50000 + 5000 = 55000"));
    }
}
