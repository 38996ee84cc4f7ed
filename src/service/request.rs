//! Request types for the payroll service and their validation.
//!
//! The calculation core accepts any numbers it is given. Everything that
//! reaches it through the service is checked here first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{NewEmployee, PayPeriod};

/// A request to process one employee for one period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use payroll_engine::service::PayrollRequest;
/// use chrono::Month;
/// use rust_decimal::Decimal;
///
/// let request = PayrollRequest::new("EMP001", PayPeriod::new(Month::March, 2025), "hr")
///     .with_leaves_taken(Decimal::new(2, 0));
/// assert_eq!(request.leaves_taken, Decimal::new(2, 0));
/// assert!(request.pf_opted.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee to process.
    pub emp_id: String,
    /// The period to process.
    pub period: PayPeriod,
    /// Leave days taken in the period.
    #[serde(default)]
    pub leaves_taken: Decimal,
    /// Overrides the employee's stored PF opt-in for this run.
    #[serde(default)]
    pub pf_opted: Option<bool>,
    /// Added to CTC for this period only.
    #[serde(default)]
    pub one_off_hike: Decimal,
    /// Ad-hoc deduction such as an advance or fine.
    #[serde(default)]
    pub additional_deduction: Decimal,
    /// Why the ad-hoc deduction was made.
    #[serde(default)]
    pub deduction_reason: String,
    /// Overtime pay.
    #[serde(default)]
    pub overtime_amount: Decimal,
    /// Reimbursed expenses.
    #[serde(default)]
    pub expenses: Decimal,
    /// Bonus.
    #[serde(default)]
    pub bonus: Decimal,
    /// The user processing the payroll.
    pub processed_by: String,
}

impl PayrollRequest {
    /// Creates a request with no leave and no adjustments.
    pub fn new(emp_id: impl Into<String>, period: PayPeriod, processed_by: impl Into<String>) -> Self {
        Self {
            emp_id: emp_id.into(),
            period,
            leaves_taken: Decimal::ZERO,
            pf_opted: None,
            one_off_hike: Decimal::ZERO,
            additional_deduction: Decimal::ZERO,
            deduction_reason: String::new(),
            overtime_amount: Decimal::ZERO,
            expenses: Decimal::ZERO,
            bonus: Decimal::ZERO,
            processed_by: processed_by.into(),
        }
    }

    /// Sets the leave days taken.
    pub fn with_leaves_taken(mut self, leaves_taken: Decimal) -> Self {
        self.leaves_taken = leaves_taken;
        self
    }

    /// Checks the request against the period's month length.
    ///
    /// Leave must lie within `0..=days_in_month` and every monetary
    /// adjustment must be non-negative.
    pub fn validate(&self, days_in_month: Decimal) -> EngineResult<()> {
        if self.emp_id.trim().is_empty() {
            return Err(invalid_input("emp_id", "must not be empty"));
        }
        if self.leaves_taken < Decimal::ZERO {
            return Err(invalid_input("leaves_taken", "must not be negative"));
        }
        if self.leaves_taken > days_in_month {
            return Err(invalid_input(
                "leaves_taken",
                format!("must not exceed {} days", days_in_month.normalize()),
            ));
        }

        let amounts = [
            ("one_off_hike", self.one_off_hike),
            ("additional_deduction", self.additional_deduction),
            ("overtime_amount", self.overtime_amount),
            ("expenses", self.expenses),
            ("bonus", self.bonus),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, amount)| *amount < Decimal::ZERO) {
            return Err(invalid_input(field, "must not be negative"));
        }

        Ok(())
    }
}

fn invalid_input(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPayrollInput {
        field: field.to_string(),
        message: message.into(),
    }
}

fn invalid_employee(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Checks a registration before it reaches the store.
pub fn validate_new_employee(new_employee: &NewEmployee) -> EngineResult<()> {
    if new_employee.emp_id.trim().is_empty() {
        return Err(invalid_employee("emp_id", "must not be empty"));
    }
    if new_employee.name.trim().is_empty() {
        return Err(invalid_employee("name", "must not be empty"));
    }
    if !is_valid_email(&new_employee.email) {
        return Err(invalid_employee("email", "must be a valid email address"));
    }
    if new_employee.ctc_monthly <= Decimal::ZERO {
        return Err(invalid_employee("ctc_monthly", "must be greater than zero"));
    }
    Ok(())
}

/// One `@`, a non-empty local part and a dotted domain with no empty labels.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.trim().split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_request() -> PayrollRequest {
        PayrollRequest::new("EMP001", PayPeriod::new(Month::March, 2025), "hr")
    }

    fn create_new_employee() -> NewEmployee {
        NewEmployee {
            emp_id: "EMP001".to_string(),
            name: "Asha Rao".to_string(),
            email: "asha.rao@example.com".to_string(),
            designation: None,
            department: None,
            joining_date: None,
            ctc_monthly: dec("50000"),
            pf_opted: true,
            created_by: "hr".to_string(),
        }
    }

    fn invalid_field(result: EngineResult<()>) -> String {
        match result {
            Err(EngineError::InvalidPayrollInput { field, .. }) => field,
            Err(EngineError::InvalidEmployee { field, .. }) => field,
            other => panic!("Expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_request_is_valid() {
        assert!(create_request().validate(dec("30")).is_ok());
    }

    #[test]
    fn test_negative_leave_rejected() {
        let request = create_request().with_leaves_taken(dec("-1"));
        assert_eq!(invalid_field(request.validate(dec("30"))), "leaves_taken");
    }

    #[test]
    fn test_leave_above_month_rejected() {
        let request = create_request().with_leaves_taken(dec("30.5"));
        assert_eq!(invalid_field(request.validate(dec("30"))), "leaves_taken");
    }

    #[test]
    fn test_full_month_of_leave_accepted() {
        let request = create_request().with_leaves_taken(dec("30"));
        assert!(request.validate(dec("30")).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let request = PayrollRequest {
            bonus: dec("-100"),
            ..create_request()
        };
        assert_eq!(invalid_field(request.validate(dec("30"))), "bonus");
    }

    #[test]
    fn test_blank_emp_id_rejected() {
        let request = PayrollRequest::new("  ", PayPeriod::new(Month::March, 2025), "hr");
        assert_eq!(invalid_field(request.validate(dec("30"))), "emp_id");
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{
            "emp_id": "EMP001",
            "period": { "month": "March", "year": 2025 },
            "leaves_taken": "1.5",
            "processed_by": "hr"
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.leaves_taken, dec("1.5"));
        assert_eq!(request.bonus, Decimal::ZERO);
        assert!(request.pf_opted.is_none());
    }

    #[test]
    fn test_valid_new_employee() {
        assert!(validate_new_employee(&create_new_employee()).is_ok());
    }

    #[test]
    fn test_new_employee_requires_name() {
        let new_employee = NewEmployee {
            name: " ".to_string(),
            ..create_new_employee()
        };
        assert_eq!(invalid_field(validate_new_employee(&new_employee)), "name");
    }

    #[test]
    fn test_new_employee_requires_positive_ctc() {
        let new_employee = NewEmployee {
            ctc_monthly: Decimal::ZERO,
            ..create_new_employee()
        };
        assert_eq!(invalid_field(validate_new_employee(&new_employee)), "ctc_monthly");
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a.b@mail.example.co.in"));
        assert!(!is_valid_email("asha.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha@localhost"));
        assert!(!is_valid_email("asha@example."));
        assert!(!is_valid_email("asha@@example.com"));
    }
}
