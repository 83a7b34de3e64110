//! Employee use-case service.
//!
//! # Responsibility
//! - Commit employee inserts, full-row updates and deletes.
//! - Rebuild the employee lookup cache inside the same transaction.
//!
//! # Invariants
//! - Inserts and updates are refused unless the department id is present in
//!   the department cache handed in by the caller.
//! - Read APIs never open a write transaction.

use crate::cache::{LookupCache, RecordSet};
use crate::model::employee::{Employee, EmployeeId, EmployeeRow, NewEmployee};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::service::{ServiceError, ServiceResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Employee commits and reads over one connection.
pub struct EmployeeService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> EmployeeService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Inserts one employee; returns its id and the rebuilt employee cache.
    pub fn create_employee(
        &mut self,
        departments: &LookupCache,
        employee: &NewEmployee,
    ) -> ServiceResult<(EmployeeId, LookupCache)> {
        let started_at = Instant::now();
        let result = ensure_department(departments, employee.department).and_then(|()| {
            self.in_transaction(|repo| repo.create_employee(employee).map_err(Into::into))
        });
        log_outcome("employee_create", started_at, &result, |(id, _)| Some(*id));
        result
    }

    /// Writes every field of `employee` back; returns the rebuilt cache.
    pub fn update_employee(
        &mut self,
        departments: &LookupCache,
        employee: &Employee,
    ) -> ServiceResult<LookupCache> {
        let started_at = Instant::now();
        let result = ensure_department(departments, employee.department).and_then(|()| {
            self.in_transaction(|repo| repo.update_employee(employee).map_err(Into::into))
        });
        log_outcome("employee_update", started_at, &result, |_| Some(employee.id));
        result.map(|((), cache)| cache)
    }

    /// Deletes one employee; returns the rebuilt cache.
    pub fn delete_employee(&mut self, id: EmployeeId) -> ServiceResult<LookupCache> {
        let started_at = Instant::now();
        let result = self.in_transaction(|repo| repo.delete_employee(id).map_err(Into::into));
        log_outcome("employee_delete", started_at, &result, |_| Some(id));
        result.map(|((), cache)| cache)
    }

    pub fn get_employee(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self.repo().get_employee(id)?)
    }

    pub fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo().list_employees()?)
    }

    /// Employees joined with their department names.
    pub fn list_employee_rows(&self) -> ServiceResult<Vec<EmployeeRow>> {
        Ok(self.repo().list_employee_rows()?)
    }

    fn repo(&self) -> SqliteEmployeeRepository<'_> {
        SqliteEmployeeRepository::new(&*self.conn)
    }

    fn in_transaction<T>(
        &mut self,
        write: impl FnOnce(&SqliteEmployeeRepository<'_>) -> ServiceResult<T>,
    ) -> ServiceResult<(T, LookupCache)> {
        let tx = self.conn.transaction()?;
        let value = write(&SqliteEmployeeRepository::new(&tx))?;
        let cache = LookupCache::rebuild(&tx, RecordSet::Employees)?;
        tx.commit()?;
        Ok((value, cache))
    }
}

fn ensure_department(departments: &LookupCache, id: i64) -> ServiceResult<()> {
    if departments.contains_id(id) {
        Ok(())
    } else {
        Err(ServiceError::UnknownDepartment(id))
    }
}

fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: &ServiceResult<T>,
    employee_id: impl FnOnce(&T) -> Option<EmployeeId>,
) {
    match result {
        Ok(value) => info!(
            "event={event} module=service status=ok employee_id={} duration_ms={}",
            employee_id(value).map_or_else(|| "-".to_string(), |id| id.to_string()),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event={event} module=service status=error duration_ms={} error_code={}",
            started_at.elapsed().as_millis(),
            err.error_code()
        ),
    }
}
