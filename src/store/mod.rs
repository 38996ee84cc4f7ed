//! Persistence seam for employees, the leave ledger and payroll records.
//!
//! The engine only talks to storage through [`PayrollStore`]. Writes take
//! `&mut self`: one payroll run per employee-period is expected at a time and
//! callers that share a store across threads serialise access themselves.

mod memory;

pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{Employee, LeaveTransaction, PayPeriod, PayrollRecord, UpsertOutcome};

/// Interface for payroll persistence.
///
/// Implementations:
/// - [`InMemoryStore`]: in-process maps, used by tests and benchmarks
pub trait PayrollStore {
    /// Retrieve an employee by identifier.
    ///
    /// Returns `None` if the employee is not registered.
    fn employee(&self, emp_id: &str) -> EngineResult<Option<Employee>>;

    /// All registered employees, ordered by identifier.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// Register a new employee.
    ///
    /// Fails with `DuplicateEmployee` if the identifier is taken.
    fn insert_employee(&mut self, employee: Employee) -> EngineResult<()>;

    /// Replace a registered employee.
    ///
    /// Fails with `EmployeeNotFound` if the employee is not registered.
    fn save_employee(&mut self, employee: Employee) -> EngineResult<()>;

    /// The most recently appended ledger row for an employee.
    fn latest_leave_transaction(&self, emp_id: &str) -> EngineResult<Option<LeaveTransaction>>;

    /// Every ledger row for an employee, oldest first.
    fn leave_transactions(&self, emp_id: &str) -> EngineResult<Vec<LeaveTransaction>>;

    /// Append a ledger row. Rows are never edited or removed.
    fn append_leave_transaction(&mut self, transaction: LeaveTransaction) -> EngineResult<()>;

    /// The payroll record for an employee and period.
    fn payroll(&self, emp_id: &str, period: PayPeriod) -> EngineResult<Option<PayrollRecord>>;

    /// Every payroll record for a period, ordered by employee.
    fn payrolls_for_period(&self, period: PayPeriod) -> EngineResult<Vec<PayrollRecord>>;

    /// Every payroll record for an employee, oldest period first.
    fn payrolls_for_employee(&self, emp_id: &str) -> EngineResult<Vec<PayrollRecord>>;

    /// Insert or overwrite the record for its (employee, period) key.
    fn upsert_payroll(&mut self, record: PayrollRecord) -> EngineResult<UpsertOutcome>;

    /// Persist the three writes of one payroll run as a unit.
    ///
    /// The employee must already be registered; nothing is written if it is
    /// not.
    fn commit_payroll_run(
        &mut self,
        employee: Employee,
        transaction: LeaveTransaction,
        record: PayrollRecord,
    ) -> EngineResult<UpsertOutcome>;
}
