//! Configuration types for payroll processing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the named policy
//! constants that supply their defaults.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Basic salary as a fraction of monthly CTC (50%).
pub const DEFAULT_BASIC_PCT_OF_CTC: Decimal = Decimal::from_parts(50, 0, 0, false, 2);
/// HRA as a fraction of basic salary (20%).
pub const DEFAULT_HRA_PCT_OF_BASIC: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
/// Conveyance allowance as a fraction of monthly CTC (5%).
pub const DEFAULT_CONVEYANCE_PCT_OF_CTC: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Medical allowance as a fraction of monthly CTC (5%).
pub const DEFAULT_MEDICAL_PCT_OF_CTC: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Provident fund contribution as a fraction of basic salary (12%).
pub const DEFAULT_PF_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);
/// Statutory monthly cap on the provident fund contribution.
pub const DEFAULT_PF_MONTHLY_CAP: Decimal = Decimal::from_parts(1800, 0, 0, false, 0);
/// Paid-leave days credited every month.
pub const DEFAULT_MONTHLY_LEAVE_ALLOCATION: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Days in a payroll month, regardless of the calendar.
pub const DEFAULT_DAYS_IN_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
/// Amount paid per day of remaining leave balance.
pub const DEFAULT_LEAVE_ENCASHMENT_RATE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Metadata about the organisation running payroll.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationMetadata {
    /// Short organisation code (e.g., "ACME").
    pub code: String,
    /// The organisation's display name.
    pub name: String,
    /// ISO currency code amounts are paid in.
    pub currency: String,
    /// Version label of this configuration set.
    pub version: String,
}

/// How monthly CTC is split into fixed earning components.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalarySplitPolicy {
    /// Basic salary as a fraction of CTC.
    pub basic_pct_of_ctc: Decimal,
    /// HRA as a fraction of basic salary.
    pub hra_pct_of_basic: Decimal,
    /// Conveyance allowance as a fraction of CTC.
    pub conveyance_pct_of_ctc: Decimal,
    /// Medical allowance as a fraction of CTC.
    pub medical_pct_of_ctc: Decimal,
}

impl Default for SalarySplitPolicy {
    fn default() -> Self {
        Self {
            basic_pct_of_ctc: DEFAULT_BASIC_PCT_OF_CTC,
            hra_pct_of_basic: DEFAULT_HRA_PCT_OF_BASIC,
            conveyance_pct_of_ctc: DEFAULT_CONVEYANCE_PCT_OF_CTC,
            medical_pct_of_ctc: DEFAULT_MEDICAL_PCT_OF_CTC,
        }
    }
}

/// Provident fund contribution rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProvidentFundPolicy {
    /// Contribution as a fraction of basic salary.
    pub rate: Decimal,
    /// Maximum monthly contribution.
    pub monthly_cap: Decimal,
}

impl Default for ProvidentFundPolicy {
    fn default() -> Self {
        Self {
            rate: DEFAULT_PF_RATE,
            monthly_cap: DEFAULT_PF_MONTHLY_CAP,
        }
    }
}

/// Paid-leave accrual and loss-of-pay rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeavePolicy {
    /// Days credited to the balance each month.
    pub monthly_allocation: Decimal,
    /// Days in a payroll month.
    pub days_in_month: Decimal,
    /// Amount paid per day of remaining balance.
    pub encashment_rate_per_day: Decimal,
    /// Balance a newly registered employee starts with.
    pub opening_balance: Decimal,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            monthly_allocation: DEFAULT_MONTHLY_LEAVE_ALLOCATION,
            days_in_month: DEFAULT_DAYS_IN_MONTH,
            encashment_rate_per_day: DEFAULT_LEAVE_ENCASHMENT_RATE,
            opening_balance: DEFAULT_MONTHLY_LEAVE_ALLOCATION,
        }
    }
}

/// A payroll policy, effective from a given date until superseded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollPolicy {
    /// The first day this policy applies to.
    pub effective_date: NaiveDate,
    /// CTC split rules.
    pub salary: SalarySplitPolicy,
    /// Provident fund rules.
    pub provident_fund: ProvidentFundPolicy,
    /// Leave rules.
    pub leave: LeavePolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            effective_date: NaiveDate::MIN,
            salary: SalarySplitPolicy::default(),
            provident_fund: ProvidentFundPolicy::default(),
            leave: LeavePolicy::default(),
        }
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Organisation metadata.
    metadata: OrganizationMetadata,
    /// Policies by effective date (sorted oldest first).
    policies: Vec<PayrollPolicy>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: OrganizationMetadata, policies: Vec<PayrollPolicy>) -> Self {
        let mut sorted_policies = policies;
        sorted_policies.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            policies: sorted_policies,
        }
    }

    /// Returns the organisation metadata.
    pub fn organization(&self) -> &OrganizationMetadata {
        &self.metadata
    }

    /// Returns all policies, oldest first.
    pub fn policies(&self) -> &[PayrollPolicy] {
        &self.policies
    }
}
