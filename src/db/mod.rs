use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use crate::error::RepositoryError;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::payroll::{PayPeriod, PayrollRecord};

pub mod seed;

/// Source of payroll records, one per employee per pay period.
pub trait PayrollRepository: Send + Sync {
    /// Every record of `period`, ordered by employee id.
    fn load_period(&self, period: PayPeriod) -> Vec<PayrollRecord>;

    fn find(&self, period: PayPeriod, employee_id: &str) -> Option<PayrollRecord>;

    fn insert(&self, record: PayrollRecord) -> Result<(), RepositoryError>;

    /// Swaps `expected` for `record`. Fails with `Conflict` when the stored
    /// record no longer equals `expected`; paid records are never overwritten.
    fn replace(
        &self,
        expected: &PayrollRecord,
        record: PayrollRecord,
    ) -> Result<(), RepositoryError>;
}

/// Employee directory and daily attendance register.
pub trait DirectoryRepository: Send + Sync {
    fn employees(&self) -> Vec<Employee>;

    fn attendance_on(&self, date: NaiveDate) -> Vec<AttendanceRecord>;
}

type PayrollKey = (PayPeriod, String);

fn key_of(record: &PayrollRecord) -> PayrollKey {
    (record.period(), record.employee_id.clone())
}

#[derive(Default)]
pub struct InMemoryDb {
    payroll: RwLock<BTreeMap<PayrollKey, PayrollRecord>>,
    employees: RwLock<Vec<Employee>>,
    attendance: RwLock<Vec<AttendanceRecord>>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(self, employees: Vec<Employee>) -> Self {
        *self.employees.write().unwrap_or_else(PoisonError::into_inner) = employees;
        self
    }

    pub fn with_attendance(self, attendance: Vec<AttendanceRecord>) -> Self {
        *self.attendance.write().unwrap_or_else(PoisonError::into_inner) = attendance;
        self
    }
}

impl PayrollRepository for InMemoryDb {
    fn load_period(&self, period: PayPeriod) -> Vec<PayrollRecord> {
        self.payroll
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|((record_period, _), _)| *record_period == period)
            .map(|(_, record)| record.clone())
            .collect()
    }

    fn find(&self, period: PayPeriod, employee_id: &str) -> Option<PayrollRecord> {
        self.payroll
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(period, employee_id.to_string()))
            .cloned()
    }

    fn insert(&self, record: PayrollRecord) -> Result<(), RepositoryError> {
        let mut payroll = self.payroll.write().unwrap_or_else(PoisonError::into_inner);
        let key = key_of(&record);
        if payroll.contains_key(&key) {
            return Err(RepositoryError::Duplicate {
                period: record.period().to_string(),
                employee_id: record.employee_id,
            });
        }
        payroll.insert(key, record);
        Ok(())
    }

    fn replace(
        &self,
        expected: &PayrollRecord,
        record: PayrollRecord,
    ) -> Result<(), RepositoryError> {
        if key_of(expected) != key_of(&record) {
            return Err(RepositoryError::Conflict {
                employee_id: record.employee_id,
            });
        }

        let mut payroll = self.payroll.write().unwrap_or_else(PoisonError::into_inner);
        match payroll.get_mut(&key_of(&record)) {
            None => Err(RepositoryError::NotFound {
                period: record.period().to_string(),
                employee_id: record.employee_id,
            }),
            Some(current) if current.is_locked() => Err(RepositoryError::Locked {
                employee_id: record.employee_id,
            }),
            Some(current) if current != expected => Err(RepositoryError::Conflict {
                employee_id: record.employee_id,
            }),
            Some(current) => {
                *current = record;
                Ok(())
            }
        }
    }
}

impl DirectoryRepository for InMemoryDb {
    fn employees(&self) -> Vec<Employee> {
        self.employees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn attendance_on(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.attendance
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }
}
