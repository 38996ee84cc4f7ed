//! Fixed CTC split.
//!
//! Splits monthly CTC into basic, HRA, conveyance, medical and a balancing
//! special allowance so that the five components add back up to CTC.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SalarySplitPolicy;
use crate::models::AuditStep;

use super::round_currency;

/// The five CTC-derived earning components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedComponents {
    /// Basic salary.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Conveyance allowance.
    pub conveyance_allowance: Decimal,
    /// Medical allowance.
    pub medical_allowance: Decimal,
    /// CTC minus the other four components.
    pub special_allowance: Decimal,
}

impl FixedComponents {
    /// Sum of all five components.
    pub fn sum(&self) -> Decimal {
        self.basic
            + self.hra
            + self.conveyance_allowance
            + self.medical_allowance
            + self.special_allowance
    }
}

/// The result of splitting CTC, including the components and audit step.
#[derive(Debug, Clone)]
pub struct CtcSplitResult {
    /// The split components.
    pub components: FixedComponents,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits monthly CTC into fixed earning components.
///
/// Basic, HRA (a share of basic), conveyance and medical are each rounded to
/// currency; special allowance takes whatever is left so the components sum
/// to `ctc_monthly` up to rounding of the input itself.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_ctc;
/// use payroll_engine::config::SalarySplitPolicy;
/// use rust_decimal::Decimal;
///
/// let result = split_ctc(Decimal::new(50000, 0), &SalarySplitPolicy::default(), 1);
/// assert_eq!(result.components.basic, Decimal::new(25000, 0));
/// assert_eq!(result.components.hra, Decimal::new(5000, 0));
/// assert_eq!(result.components.special_allowance, Decimal::new(15000, 0));
/// assert_eq!(result.components.sum(), Decimal::new(50000, 0));
/// ```
pub fn split_ctc(
    ctc_monthly: Decimal,
    policy: &SalarySplitPolicy,
    step_number: u32,
) -> CtcSplitResult {
    let basic = round_currency(ctc_monthly * policy.basic_pct_of_ctc);
    let hra = round_currency(basic * policy.hra_pct_of_basic);
    let conveyance_allowance = round_currency(ctc_monthly * policy.conveyance_pct_of_ctc);
    let medical_allowance = round_currency(ctc_monthly * policy.medical_pct_of_ctc);
    let special_allowance =
        round_currency(ctc_monthly - basic - hra - conveyance_allowance - medical_allowance);

    let components = FixedComponents {
        basic,
        hra,
        conveyance_allowance,
        medical_allowance,
        special_allowance,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "ctc_split".to_string(),
        rule_name: "CTC Split".to_string(),
        policy_ref: "salary".to_string(),
        input: serde_json::json!({
            "ctc_monthly": ctc_monthly.normalize().to_string(),
            "basic_pct_of_ctc": policy.basic_pct_of_ctc.normalize().to_string(),
            "hra_pct_of_basic": policy.hra_pct_of_basic.normalize().to_string(),
            "conveyance_pct_of_ctc": policy.conveyance_pct_of_ctc.normalize().to_string(),
            "medical_pct_of_ctc": policy.medical_pct_of_ctc.normalize().to_string()
        }),
        output: serde_json::json!({
            "basic": basic.normalize().to_string(),
            "hra": hra.normalize().to_string(),
            "conveyance_allowance": conveyance_allowance.normalize().to_string(),
            "medical_allowance": medical_allowance.normalize().to_string(),
            "special_allowance": special_allowance.normalize().to_string()
        }),
        reasoning: format!(
            "CTC {} split into basic {}, HRA {}, conveyance {}, medical {}; special allowance {} balances to CTC",
            ctc_monthly.normalize(),
            basic.normalize(),
            hra.normalize(),
            conveyance_allowance.normalize(),
            medical_allowance.normalize(),
            special_allowance.normalize()
        ),
    };

    CtcSplitResult {
        components,
        audit_step,
    }
}
