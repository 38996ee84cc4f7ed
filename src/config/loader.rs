//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::PayPeriod;

use super::types::{OrganizationMetadata, PayrollConfig, PayrollPolicy};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── organization.yaml   # Organisation metadata
/// └── policies/
///     └── 2024-04-01.yaml # Policy effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayPeriod;
/// use chrono::Month;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let policy = loader.policy_for(PayPeriod::new(Month::May, 2025))?;
/// println!("PF cap: {}", policy.provident_fund.monthly_cap);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `organization.yaml` or the `policies/` directory is
    /// missing, if no policy file is present, or if any file is not valid YAML
    /// for its type.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization_path = path.join("organization.yaml");
        let metadata = Self::load_yaml::<OrganizationMetadata>(&organization_path)?;

        let policies_dir = path.join("policies");
        let policies = Self::load_policies(&policies_dir)?;

        Ok(Self {
            config: PayrollConfig::new(metadata, policies),
        })
    }

    /// Builds a loader around a single in-memory policy.
    pub fn from_policy(metadata: OrganizationMetadata, policy: PayrollPolicy) -> Self {
        Self {
            config: PayrollConfig::new(metadata, vec![policy]),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all policy files from the policies directory.
    fn load_policies(policies_dir: &Path) -> EngineResult<Vec<PayrollPolicy>> {
        let policies_dir_str = policies_dir.display().to_string();

        let entries = fs::read_dir(policies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: policies_dir_str.clone(),
        })?;

        let mut policies = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: policies_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                policies.push(Self::load_yaml::<PayrollPolicy>(&path)?);
            }
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", policies_dir_str),
            });
        }

        Ok(policies)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the organisation metadata.
    pub fn organization(&self) -> &OrganizationMetadata {
        self.config.organization()
    }

    /// Gets the policy in force for a pay period.
    ///
    /// The most recent policy whose effective date is on or before the first
    /// day of the period wins.
    pub fn policy_for(&self, period: PayPeriod) -> EngineResult<&PayrollPolicy> {
        let first_day = period.first_day();
        self.config
            .policies()
            .iter()
            .rfind(|policy| policy.effective_date <= first_day)
            .ok_or_else(|| EngineError::PolicyNotFound {
                period: period.to_string(),
            })
    }
}
