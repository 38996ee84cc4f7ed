//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod leave;
mod pay_period;
mod payroll_record;

pub use employee::{Employee, MONTHS_PER_YEAR, NewEmployee};
pub use leave::{LeaveOutcome, LeaveTransaction};
pub use pay_period::PayPeriod;
pub use payroll_record::{
    Attendance, AuditStep, AuditTrace, AuditWarning, Deductions, Earnings, EmployerContributions,
    PayrollKey, PayrollRecord, SalaryBreakdown, SalaryTotals, UpsertOutcome,
};
