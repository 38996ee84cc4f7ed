//! Error types for the payroll engine.
//!
//! The calculation core is infallible; these errors come from configuration
//! loading, the store and the service layer's input validation.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     emp_id: "EMP042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: EMP042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No payroll policy is effective for the requested period.
    #[error("No payroll policy effective for {period}")]
    PolicyNotFound {
        /// The pay period, rendered as "Month Year".
        period: String,
    },

    /// The employee does not exist in the store.
    #[error("Employee not found: {emp_id}")]
    EmployeeNotFound {
        /// The employee identifier that was looked up.
        emp_id: String,
    },

    /// An employee with the same identifier is already registered.
    #[error("Employee already exists: {emp_id}")]
    DuplicateEmployee {
        /// The conflicting employee identifier.
        emp_id: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A payroll request carried an invalid value.
    #[error("Invalid payroll input '{field}': {message}")]
    InvalidPayrollInput {
        /// The request field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A month name or year could not be interpreted as a pay period.
    #[error("Invalid pay period: {message}")]
    InvalidPeriod {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
