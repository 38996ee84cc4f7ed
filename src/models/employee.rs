//! Employee model and registration input.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of months used to derive annual CTC from monthly CTC.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Represents an employee on the payroll.
///
/// `ctc_monthly` changes only through a permanent hike and `leave_balance`
/// only through leave settlement; both return an updated copy rather than
/// mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Organisation-assigned employee identifier (e.g. "EMP001").
    pub emp_id: String,
    /// Full name.
    pub name: String,
    /// Address payslips are delivered to.
    pub email: String,
    /// Job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Date the employee joined.
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    /// Monthly cost to company.
    pub ctc_monthly: Decimal,
    /// Annual cost to company (always `ctc_monthly * 12`).
    pub ctc_annual: Decimal,
    /// Whether the employee contributes to the provident fund.
    pub pf_opted: bool,
    /// Paid-leave days carried into the next settlement.
    pub leave_balance: Decimal,
    /// The user that registered this employee.
    pub created_by: String,
    /// When the employee was registered.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a new employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::NewEmployee;
/// use rust_decimal::Decimal;
///
/// let new_employee = NewEmployee {
///     emp_id: "EMP001".to_string(),
///     name: "Asha Rao".to_string(),
///     email: "asha.rao@example.com".to_string(),
///     designation: Some("Developer".to_string()),
///     department: None,
///     joining_date: None,
///     ctc_monthly: Decimal::new(50000, 0),
///     pf_opted: true,
///     created_by: "hr".to_string(),
/// };
/// assert_eq!(new_employee.emp_id, "EMP001");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Organisation-assigned employee identifier.
    pub emp_id: String,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Date the employee joined.
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    /// Monthly cost to company.
    pub ctc_monthly: Decimal,
    /// Whether the employee contributes to the provident fund.
    #[serde(default = "default_pf_opted")]
    pub pf_opted: bool,
    /// The user registering the employee.
    pub created_by: String,
}

fn default_pf_opted() -> bool {
    true
}

impl NewEmployee {
    /// Builds the stored employee with derived annual CTC and an opening
    /// leave balance.
    pub fn into_employee(self, opening_leave_balance: Decimal, now: DateTime<Utc>) -> Employee {
        Employee {
            emp_id: self.emp_id,
            name: self.name,
            email: self.email,
            designation: self.designation,
            department: self.department,
            joining_date: self.joining_date,
            ctc_annual: self.ctc_monthly * MONTHS_PER_YEAR,
            ctc_monthly: self.ctc_monthly,
            pf_opted: self.pf_opted,
            leave_balance: opening_leave_balance,
            created_by: self.created_by,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_new_employee() -> NewEmployee {
        NewEmployee {
            emp_id: "EMP001".to_string(),
            name: "Asha Rao".to_string(),
            email: "asha.rao@example.com".to_string(),
            designation: Some("Developer".to_string()),
            department: Some("Engineering".to_string()),
            joining_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            ctc_monthly: dec("50000"),
            pf_opted: true,
            created_by: "hr".to_string(),
        }
    }

    #[test]
    fn test_into_employee_derives_annual_ctc() {
        let employee = create_new_employee().into_employee(dec("1.5"), Utc::now());
        assert_eq!(employee.ctc_monthly, dec("50000"));
        assert_eq!(employee.ctc_annual, dec("600000"));
    }

    #[test]
    fn test_into_employee_sets_opening_balance() {
        let employee = create_new_employee().into_employee(dec("1.5"), Utc::now());
        assert_eq!(employee.leave_balance, dec("1.5"));
        assert_eq!(employee.created_by, "hr");
    }

    #[test]
    fn test_deserialize_new_employee_defaults_pf_opted() {
        let json = r#"{
            "emp_id": "EMP002",
            "name": "Ravi Kumar",
            "email": "ravi@example.com",
            "ctc_monthly": "42000.00",
            "created_by": "admin"
        }"#;

        let new_employee: NewEmployee = serde_json::from_str(json).unwrap();
        assert!(new_employee.pf_opted);
        assert_eq!(new_employee.ctc_monthly, dec("42000.00"));
        assert!(new_employee.designation.is_none());
    }

    #[test]
    fn test_employee_serializes_decimals_as_strings() {
        let employee = create_new_employee().into_employee(dec("1.5"), Utc::now());
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["ctc_monthly"], "50000");
        assert_eq!(json["leave_balance"], "1.5");
    }
}
