//! Loss-of-pay adjustment.
//!
//! Unpaid leave days reduce the CTC-derived components in proportion to the
//! days in the payroll month. Each component is scaled and rounded on its
//! own; the components are not re-balanced afterwards, so their sum may
//! drift from the scaled CTC by a few paise.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::{FixedComponents, round_currency};

/// The result of applying loss of pay, including the scaled components and
/// audit step.
#[derive(Debug, Clone)]
pub struct LossOfPayResult {
    /// The components after scaling.
    pub components: FixedComponents,
    /// The audit step recording this adjustment.
    pub audit_step: AuditStep,
}

/// Returns the unpaid fraction of the month.
///
/// A zero-day month yields a zero ratio rather than dividing by zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::loss_of_pay_ratio;
/// use rust_decimal::Decimal;
///
/// let ratio = loss_of_pay_ratio(Decimal::new(3, 0), Decimal::new(30, 0));
/// assert_eq!(ratio, Decimal::new(1, 1));
/// ```
pub fn loss_of_pay_ratio(loss_of_pay_days: Decimal, days_in_month: Decimal) -> Decimal {
    if days_in_month.is_zero() {
        return Decimal::ZERO;
    }
    loss_of_pay_days / days_in_month
}

/// Scales the fixed components by `1 - ratio`.
///
/// A ratio of zero or below leaves the components untouched.
pub fn apply_loss_of_pay(
    components: &FixedComponents,
    loss_of_pay_ratio: Decimal,
    step_number: u32,
) -> LossOfPayResult {
    if loss_of_pay_ratio <= Decimal::ZERO {
        let audit_step = AuditStep {
            step_number,
            rule_id: "loss_of_pay".to_string(),
            rule_name: "Loss of Pay".to_string(),
            policy_ref: "leave.days_in_month".to_string(),
            input: serde_json::json!({
                "loss_of_pay_ratio": loss_of_pay_ratio.normalize().to_string(),
                "fixed_total": components.sum().normalize().to_string()
            }),
            output: serde_json::json!({
                "adjustment_applied": false,
                "fixed_total": components.sum().normalize().to_string()
            }),
            reasoning: "No loss of pay - all leave covered by balance".to_string(),
        };

        return LossOfPayResult {
            components: components.clone(),
            audit_step,
        };
    }

    let factor = Decimal::ONE - loss_of_pay_ratio;
    let scaled = FixedComponents {
        basic: round_currency(components.basic * factor),
        hra: round_currency(components.hra * factor),
        conveyance_allowance: round_currency(components.conveyance_allowance * factor),
        medical_allowance: round_currency(components.medical_allowance * factor),
        special_allowance: round_currency(components.special_allowance * factor),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "loss_of_pay".to_string(),
        rule_name: "Loss of Pay".to_string(),
        policy_ref: "leave.days_in_month".to_string(),
        input: serde_json::json!({
            "loss_of_pay_ratio": loss_of_pay_ratio.round_dp(6).normalize().to_string(),
            "fixed_total": components.sum().normalize().to_string()
        }),
        output: serde_json::json!({
            "adjustment_applied": true,
            "basic": scaled.basic.normalize().to_string(),
            "hra": scaled.hra.normalize().to_string(),
            "conveyance_allowance": scaled.conveyance_allowance.normalize().to_string(),
            "medical_allowance": scaled.medical_allowance.normalize().to_string(),
            "special_allowance": scaled.special_allowance.normalize().to_string(),
            "fixed_total": scaled.sum().normalize().to_string()
        }),
        reasoning: format!(
            "Fixed components {} x (1 - {}) = {}",
            components.sum().normalize(),
            loss_of_pay_ratio.round_dp(6).normalize(),
            scaled.sum().normalize()
        ),
    };

    LossOfPayResult {
        components: scaled,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn components_for_50000() -> FixedComponents {
        FixedComponents {
            basic: dec("25000"),
            hra: dec("5000"),
            conveyance_allowance: dec("2500"),
            medical_allowance: dec("2500"),
            special_allowance: dec("15000"),
        }
    }

    /// LOP-001: zero ratio leaves components unchanged
    #[test]
    fn test_zero_ratio_is_noop() {
        let result = apply_loss_of_pay(&components_for_50000(), Decimal::ZERO, 1);

        assert_eq!(result.components, components_for_50000());
        assert_eq!(
            result.audit_step.output["adjustment_applied"].as_bool().unwrap(),
            false
        );
    }

    /// LOP-002: one unpaid day scales each component by 29/30
    #[test]
    fn test_one_day_scales_by_29_over_30() {
        let ratio = loss_of_pay_ratio(dec("1"), dec("30"));
        let result = apply_loss_of_pay(&components_for_50000(), ratio, 1);
        let c = &result.components;

        assert_eq!(c.basic, dec("24166.67"));
        assert_eq!(c.hra, dec("4833.33"));
        assert_eq!(c.conveyance_allowance, dec("2416.67"));
        assert_eq!(c.medical_allowance, dec("2416.67"));
        assert_eq!(c.special_allowance, dec("14500"));
    }

    /// LOP-003: rounding drift is accepted, not re-balanced
    #[test]
    fn test_rounding_drift_is_not_rebalanced() {
        let ratio = loss_of_pay_ratio(dec("1"), dec("30"));
        let result = apply_loss_of_pay(&components_for_50000(), ratio, 1);

        // 50000 * 29/30 = 48333.33, components round up to 48333.34
        assert_eq!(result.components.sum(), dec("48333.34"));
    }

    /// LOP-004: a fully unpaid month zeroes every component
    #[test]
    fn test_full_month_unpaid_zeroes_components() {
        let ratio = loss_of_pay_ratio(dec("30"), dec("30"));
        let result = apply_loss_of_pay(&components_for_50000(), ratio, 1);

        assert_eq!(result.components.sum(), Decimal::ZERO);
    }

    /// LOP-005: half-day loss of pay
    #[test]
    fn test_half_day() {
        let ratio = loss_of_pay_ratio(dec("0.5"), dec("30"));
        let result = apply_loss_of_pay(&components_for_50000(), ratio, 1);

        // 25000 * (1 - 1/60) = 24583.333...
        assert_eq!(result.components.basic, dec("24583.33"));
    }

    #[test]
    fn test_ratio_for_zero_day_month_is_zero() {
        assert_eq!(loss_of_pay_ratio(dec("2"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_ratio_is_days_over_month() {
        assert_eq!(loss_of_pay_ratio(dec("6"), dec("30")), dec("0.2"));
    }

    #[test]
    fn test_audit_reasoning_shows_before_and_after() {
        let result = apply_loss_of_pay(&components_for_50000(), dec("0.1"), 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert!(result.audit_step.reasoning.contains("50000"));
        assert!(result.audit_step.reasoning.contains("0.1"));
        assert!(result.audit_step.reasoning.contains("45000"));
    }
}
