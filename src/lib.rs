//! Payroll and leave-balance engine
//!
//! This crate computes monthly payroll: it splits an employee's CTC into
//! salary components, settles the month's leave against a rolling balance,
//! scales pay for unpaid days, applies provident fund and ad-hoc
//! adjustments, and records every decision in an audit trace.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
