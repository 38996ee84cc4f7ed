//! In-memory [`PayrollStore`] implementation.

use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, LeaveTransaction, PayPeriod, PayrollKey, PayrollRecord, UpsertOutcome,
};

use super::PayrollStore;

/// Store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: BTreeMap<String, Employee>,
    ledger: HashMap<String, Vec<LeaveTransaction>>,
    payrolls: BTreeMap<PayrollKey, PayrollRecord>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger rows across all employees.
    pub fn ledger_len(&self) -> usize {
        self.ledger.values().map(Vec::len).sum()
    }

    /// Number of payroll records.
    pub fn payroll_count(&self) -> usize {
        self.payrolls.len()
    }
}

impl PayrollStore for InMemoryStore {
    fn employee(&self, emp_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.get(emp_id).cloned())
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.values().cloned().collect())
    }

    fn insert_employee(&mut self, employee: Employee) -> EngineResult<()> {
        if self.employees.contains_key(&employee.emp_id) {
            return Err(EngineError::DuplicateEmployee {
                emp_id: employee.emp_id,
            });
        }
        self.employees.insert(employee.emp_id.clone(), employee);
        Ok(())
    }

    fn save_employee(&mut self, employee: Employee) -> EngineResult<()> {
        match self.employees.get_mut(&employee.emp_id) {
            Some(stored) => {
                *stored = employee;
                Ok(())
            }
            None => Err(EngineError::EmployeeNotFound {
                emp_id: employee.emp_id,
            }),
        }
    }

    fn latest_leave_transaction(&self, emp_id: &str) -> EngineResult<Option<LeaveTransaction>> {
        Ok(self
            .ledger
            .get(emp_id)
            .and_then(|rows| rows.last())
            .cloned())
    }

    fn leave_transactions(&self, emp_id: &str) -> EngineResult<Vec<LeaveTransaction>> {
        Ok(self.ledger.get(emp_id).cloned().unwrap_or_default())
    }

    fn append_leave_transaction(&mut self, transaction: LeaveTransaction) -> EngineResult<()> {
        self.ledger
            .entry(transaction.emp_id.clone())
            .or_default()
            .push(transaction);
        Ok(())
    }

    fn payroll(&self, emp_id: &str, period: PayPeriod) -> EngineResult<Option<PayrollRecord>> {
        Ok(self.payrolls.get(&PayrollKey::new(emp_id, period)).cloned())
    }

    fn payrolls_for_period(&self, period: PayPeriod) -> EngineResult<Vec<PayrollRecord>> {
        Ok(self
            .payrolls
            .values()
            .filter(|record| record.period == period)
            .cloned()
            .collect())
    }

    fn payrolls_for_employee(&self, emp_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        let mut records: Vec<PayrollRecord> = self
            .payrolls
            .values()
            .filter(|record| record.emp_id == emp_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.period);
        Ok(records)
    }

    fn upsert_payroll(&mut self, record: PayrollRecord) -> EngineResult<UpsertOutcome> {
        match self.payrolls.insert(record.key(), record) {
            Some(_) => Ok(UpsertOutcome::Replaced),
            None => Ok(UpsertOutcome::Created),
        }
    }

    fn commit_payroll_run(
        &mut self,
        employee: Employee,
        transaction: LeaveTransaction,
        record: PayrollRecord,
    ) -> EngineResult<UpsertOutcome> {
        if !self.employees.contains_key(&employee.emp_id) {
            return Err(EngineError::EmployeeNotFound {
                emp_id: employee.emp_id,
            });
        }
        self.save_employee(employee)?;
        self.append_leave_transaction(transaction)?;
        self.upsert_payroll(record)
    }
}
