//! Configuration loading and management for the payroll engine.
//!
//! This module loads organisation metadata and effective-dated payroll
//! policies from YAML files. Every policy number (split percentages, PF rate
//! and cap, leave allocation, days per month, encashment rate) lives here
//! rather than in the calculation code.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded organisation: {}", config.organization().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BASIC_PCT_OF_CTC, DEFAULT_CONVEYANCE_PCT_OF_CTC, DEFAULT_DAYS_IN_MONTH,
    DEFAULT_HRA_PCT_OF_BASIC, DEFAULT_LEAVE_ENCASHMENT_RATE, DEFAULT_MEDICAL_PCT_OF_CTC,
    DEFAULT_MONTHLY_LEAVE_ALLOCATION, DEFAULT_PF_MONTHLY_CAP, DEFAULT_PF_RATE, LeavePolicy,
    OrganizationMetadata, PayrollConfig, PayrollPolicy, ProvidentFundPolicy, SalarySplitPolicy,
};
