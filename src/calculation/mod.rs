//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions for a payroll run:
//! currency rounding, the fixed CTC split, loss-of-pay scaling, provident
//! fund, leave ledger settlement, CTC hikes and the full salary breakdown.
//! None of these functions touch storage or fail; each returns its result
//! alongside the audit step that explains it.

mod ctc_split;
mod hike;
mod leave_ledger;
mod loss_of_pay;
mod provident_fund;
mod rounding;
mod salary;

pub use ctc_split::{CtcSplitResult, FixedComponents, split_ctc};
pub use hike::{HikeResult, apply_permanent_hike, one_off_ctc};
pub use leave_ledger::{
    LeaveSettlement, OpeningBalance, opening_balance, preview_leave_balance, settle_leave,
    split_leave,
};
pub use loss_of_pay::{LossOfPayResult, apply_loss_of_pay, loss_of_pay_ratio};
pub use provident_fund::{ProvidentFundResult, calculate_provident_fund};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
pub use salary::{
    OtherDeductions, SalaryCalculation, SalaryInput, VariableEarnings, compute_salary,
    leave_encashment_amount,
};
