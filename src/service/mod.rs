//! Payroll service.
//!
//! Ties the calculation core to a [`PayrollStore`]: validates input, resolves
//! the policy in force for a period, runs leave settlement and the salary
//! calculation, and persists the employee, ledger row and payroll record of
//! a run together.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::{ConfigLoader, OrganizationMetadata, PayrollPolicy};
//! use payroll_engine::models::{NewEmployee, PayPeriod};
//! use payroll_engine::service::{PayrollRequest, PayrollService};
//! use payroll_engine::store::InMemoryStore;
//! use chrono::Month;
//! use rust_decimal::Decimal;
//!
//! let metadata = OrganizationMetadata {
//!     code: "ACME".to_string(),
//!     name: "Acme".to_string(),
//!     currency: "INR".to_string(),
//!     version: "1".to_string(),
//! };
//! let config = ConfigLoader::from_policy(metadata, PayrollPolicy::default());
//! let mut service = PayrollService::new(config, InMemoryStore::new());
//!
//! service.register_employee(NewEmployee {
//!     emp_id: "EMP001".to_string(),
//!     name: "Asha Rao".to_string(),
//!     email: "asha.rao@example.com".to_string(),
//!     designation: None,
//!     department: None,
//!     joining_date: None,
//!     ctc_monthly: Decimal::new(50000, 0),
//!     pf_opted: false,
//!     created_by: "hr".to_string(),
//! })?;
//!
//! let period = PayPeriod::new(Month::March, 2025);
//! let processed = service.process_payroll(PayrollRequest::new("EMP001", period, "hr"))?;
//! assert_eq!(processed.record.breakdown.earnings.fixed_sum(), Decimal::new(50000, 0));
//! # Ok::<(), payroll_engine::error::EngineError>(())
//! ```

mod request;
mod response;

pub use request::{PayrollRequest, validate_new_employee};
pub use response::{
    BatchFailure, BatchSummary, LeaveHistoryEntry, PeriodSummary, ProcessedPayroll,
};

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::calculation::{
    SalaryInput, VariableEarnings, apply_permanent_hike, compute_salary, leave_encashment_amount,
    loss_of_pay_ratio, one_off_ctc, preview_leave_balance, settle_leave,
};
use crate::config::{ConfigLoader, PayrollPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Attendance, AuditTrace, AuditWarning, Employee, LeaveOutcome, NewEmployee, PayPeriod,
    PayrollRecord,
};
use crate::store::PayrollStore;

/// Runs payroll against a store using the loaded configuration.
#[derive(Debug)]
pub struct PayrollService<S: PayrollStore> {
    config: ConfigLoader,
    store: S,
}

impl<S: PayrollStore> PayrollService<S> {
    /// Creates a service over the given configuration and store.
    pub fn new(config: ConfigLoader, store: S) -> Self {
        Self { config, store }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new employee with the opening leave balance of the policy
    /// currently in force.
    pub fn register_employee(&mut self, new_employee: NewEmployee) -> EngineResult<Employee> {
        if let Err(err) = validate_new_employee(&new_employee) {
            warn!(emp_id = %new_employee.emp_id, error = %err, "Rejected employee registration");
            return Err(err);
        }

        let now = Utc::now();
        let policy = self.config.policy_for(PayPeriod::containing(now.date_naive()))?;
        let employee = new_employee.into_employee(policy.leave.opening_balance, now);
        self.store.insert_employee(employee.clone())?;

        info!(
            emp_id = %employee.emp_id,
            ctc_monthly = %employee.ctc_monthly,
            leave_balance = %employee.leave_balance,
            "Employee registered"
        );
        Ok(employee)
    }

    /// Looks up a registered employee.
    pub fn employee(&self, emp_id: &str) -> EngineResult<Employee> {
        self.store
            .employee(emp_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                emp_id: emp_id.to_string(),
            })
    }

    /// Processes one employee for one period.
    ///
    /// Processing the same employee and period again replaces the stored
    /// record and re-settles leave from the same opening balance.
    pub fn process_payroll(&mut self, request: PayrollRequest) -> EngineResult<ProcessedPayroll> {
        let correlation_id = Uuid::new_v4();
        info!(
            correlation_id = %correlation_id,
            emp_id = %request.emp_id,
            period = %request.period,
            "Processing payroll"
        );

        match self.run_payroll(&request) {
            Ok(processed) => {
                info!(
                    correlation_id = %correlation_id,
                    emp_id = %request.emp_id,
                    period = %request.period,
                    loss_of_pay_days = %processed.leave.loss_of_pay_days,
                    gross_salary = %processed.record.breakdown.totals.gross_salary,
                    net_salary = %processed.record.breakdown.totals.net_salary,
                    upsert = ?processed.upsert,
                    duration_us = processed.record.audit_trace.duration_us,
                    "Payroll processed successfully"
                );
                Ok(processed)
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    emp_id = %request.emp_id,
                    error = %err,
                    "Payroll processing failed"
                );
                Err(err)
            }
        }
    }

    fn run_payroll(&mut self, request: &PayrollRequest) -> EngineResult<ProcessedPayroll> {
        let start_time = Instant::now();
        let policy: &PayrollPolicy = self.config.policy_for(request.period)?;
        let days_in_month = policy.leave.days_in_month;
        request.validate(days_in_month)?;

        let employee = self
            .store
            .employee(&request.emp_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                emp_id: request.emp_id.clone(),
            })?;
        let ledger = self.store.leave_transactions(&employee.emp_id)?;
        let reprocessing = self.store.payroll(&employee.emp_id, request.period)?.is_some();

        let mut step_number: u32 = 1;
        let settlement = settle_leave(
            &policy.leave,
            &employee,
            &ledger,
            request.leaves_taken,
            request.period,
            step_number,
        );
        step_number += 1;
        let outcome = settlement.outcome.clone();
        debug!(
            emp_id = %employee.emp_id,
            leave_balance_used = %outcome.leave_balance_used,
            loss_of_pay_days = %outcome.loss_of_pay_days,
            remaining_balance = %outcome.remaining_balance,
            "Leave settled"
        );

        let input = SalaryInput {
            ctc_monthly: one_off_ctc(&employee, request.one_off_hike),
            pf_opted: request.pf_opted.unwrap_or(employee.pf_opted),
            additional_deduction: request.additional_deduction,
            loss_of_pay_ratio: loss_of_pay_ratio(outcome.loss_of_pay_days, days_in_month),
            overrides: VariableEarnings {
                overtime_amount: request.overtime_amount,
                expenses: request.expenses,
                bonus: request.bonus,
                leave_balance_amount: leave_encashment_amount(
                    outcome.remaining_balance,
                    policy.leave.encashment_rate_per_day,
                ),
            },
            other_deductions: Default::default(),
        };
        let salary = compute_salary(policy, &input, step_number);

        let mut warnings = Vec::new();
        if outcome.has_loss_of_pay() {
            warnings.push(AuditWarning {
                code: "LOSS_OF_PAY_APPLIED".to_string(),
                message: format!(
                    "{} unpaid leave day(s) reduced fixed earnings",
                    outcome.loss_of_pay_days.normalize()
                ),
                severity: "medium".to_string(),
            });
        }
        if salary.breakdown.totals.net_salary < Decimal::ZERO {
            warnings.push(AuditWarning {
                code: "NEGATIVE_NET_SALARY".to_string(),
                message: format!(
                    "Deductions exceed gross salary; net is {}",
                    salary.breakdown.totals.net_salary.normalize()
                ),
                severity: "high".to_string(),
            });
        }
        let superseded_closing = settlement.transaction.supersedes.and_then(|id| {
            ledger
                .iter()
                .find(|transaction| transaction.transaction_id == id)
                .map(|transaction| transaction.balance_after)
        });
        if settlement.later_periods_settled
            && superseded_closing != Some(outcome.remaining_balance)
        {
            warn!(
                emp_id = %employee.emp_id,
                period = %request.period,
                remaining_balance = %outcome.remaining_balance,
                "Closing leave balance changed for a period with later settlements"
            );
            warnings.push(AuditWarning {
                code: "LATER_PERIODS_NOT_RESETTLED".to_string(),
                message: format!(
                    "Closing leave balance of {} is now {}; later periods still carry the previous balance",
                    request.period,
                    outcome.remaining_balance.normalize()
                ),
                severity: "medium".to_string(),
            });
        }
        if reprocessing || settlement.transaction.supersedes.is_some() {
            warnings.push(AuditWarning {
                code: "PAYROLL_REPROCESSED".to_string(),
                message: format!("{} was already processed and has been replaced", request.period),
                severity: "low".to_string(),
            });
        }

        let mut steps = Vec::with_capacity(salary.audit_steps.len() + 1);
        steps.push(settlement.audit_step);
        steps.extend(salary.audit_steps);

        let record = PayrollRecord {
            record_id: Uuid::new_v4(),
            emp_id: employee.emp_id.clone(),
            period: request.period,
            attendance: Attendance {
                total_days: days_in_month,
                present_days: outcome.present_days,
                leaves_taken: request.leaves_taken,
                paid_days: outcome.paid_days,
                loss_of_pay_days: outcome.loss_of_pay_days,
                leave_balance_used: outcome.leave_balance_used,
            },
            breakdown: salary.breakdown,
            hike_amount: request.one_off_hike,
            deduction_reason: request.deduction_reason.clone(),
            processed_by: request.processed_by.clone(),
            processed_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us: start_time.elapsed().as_micros() as u64,
            },
        };

        let upsert = self.store.commit_payroll_run(
            settlement.employee,
            settlement.transaction,
            record.clone(),
        )?;

        Ok(ProcessedPayroll {
            record,
            leave: outcome,
            upsert,
        })
    }

    /// Processes every request, collecting failures instead of stopping at
    /// the first one.
    pub fn process_batch(&mut self, requests: Vec<PayrollRequest>) -> BatchSummary {
        let batch_id = Uuid::new_v4();
        info!(batch_id = %batch_id, rows = requests.len(), "Processing payroll batch");

        let mut summary = BatchSummary::default();
        for request in requests {
            let emp_id = request.emp_id.clone();
            match self.process_payroll(request) {
                Ok(processed) => summary.processed.push(processed),
                Err(err) => {
                    error!(batch_id = %batch_id, emp_id = %emp_id, error = %err, "Batch row failed");
                    summary.failed.push(BatchFailure {
                        emp_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            batch_id = %batch_id,
            success_count = summary.success_count(),
            error_count = summary.error_count(),
            "Payroll batch completed"
        );
        summary
    }

    /// Permanently changes an employee's monthly CTC by `amount`.
    pub fn apply_permanent_hike(
        &mut self,
        emp_id: &str,
        amount: Decimal,
        reason: &str,
    ) -> EngineResult<Employee> {
        if amount.is_zero() {
            return Err(EngineError::InvalidPayrollInput {
                field: "amount".to_string(),
                message: "hike amount must not be zero".to_string(),
            });
        }

        let employee = self.employee(emp_id)?;
        let result = apply_permanent_hike(&employee, amount, 1);
        self.store.save_employee(result.employee.clone())?;

        info!(
            emp_id = %emp_id,
            amount = %amount,
            reason = %reason,
            ctc_monthly = %result.employee.ctc_monthly,
            "Permanent hike applied"
        );
        debug!(emp_id = %emp_id, reasoning = %result.audit_step.reasoning, "Hike audit");
        Ok(result.employee)
    }

    /// The last `months` processed periods for an employee, newest first.
    pub fn leave_history(&self, emp_id: &str, months: usize) -> EngineResult<Vec<LeaveHistoryEntry>> {
        self.employee(emp_id)?;
        let records = self.store.payrolls_for_employee(emp_id)?;

        Ok(records
            .into_iter()
            .rev()
            .take(months)
            .map(|record| LeaveHistoryEntry {
                period: record.period,
                leaves_taken: record.attendance.leaves_taken,
                leave_balance_used: record.attendance.leave_balance_used,
                loss_of_pay_days: record.attendance.loss_of_pay_days,
                paid_days: record.attendance.paid_days,
            })
            .collect())
    }

    /// The balance available in the current month if no leave is taken.
    /// Writes nothing.
    pub fn leave_preview(&self, emp_id: &str) -> EngineResult<LeaveOutcome> {
        self.leave_preview_for(emp_id, PayPeriod::containing(Utc::now().date_naive()))
    }

    /// The balance available in `period` if no leave is taken. A period that
    /// is already processed previews from its own opening balance.
    pub fn leave_preview_for(&self, emp_id: &str, period: PayPeriod) -> EngineResult<LeaveOutcome> {
        let employee = self.employee(emp_id)?;
        let ledger = self.store.leave_transactions(emp_id)?;
        let policy = self.config.policy_for(period)?;

        Ok(preview_leave_balance(&policy.leave, &employee, &ledger, period))
    }

    /// Totals across every record stored for a period.
    pub fn period_summary(&self, period: PayPeriod) -> EngineResult<PeriodSummary> {
        let records = self.store.payrolls_for_period(period)?;

        Ok(PeriodSummary {
            period,
            employees_processed: records.len(),
            total_gross: records.iter().map(|r| r.breakdown.totals.gross_salary).sum(),
            total_deductions: records.iter().map(|r| r.breakdown.totals.total_deductions).sum(),
            total_net: records.iter().map(|r| r.breakdown.totals.net_salary).sum(),
            total_pf_employer: records.iter().map(|r| r.breakdown.employer.pf_employer).sum(),
        })
    }

    /// The stored record for an employee and period, if processed.
    pub fn payroll(&self, emp_id: &str, period: PayPeriod) -> EngineResult<Option<PayrollRecord>> {
        self.store.payroll(emp_id, period)
    }
}
