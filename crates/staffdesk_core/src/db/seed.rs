//! Default rows for a fresh store.
//!
//! # Invariants
//! - Departments are seeded only when `departments` is empty, employees only
//!   when `employees` is empty; each check is independent.
//! - Seeded employees reference departments by name through the department
//!   lookup cache, so ids follow whatever the store generated.

use crate::cache::{LookupCache, RecordSet};
use crate::model::employee::{Age, NewEmployee};
use crate::model::salary::Salary;
use crate::repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::RepoResult;
use log::{info, warn};
use rusqlite::Connection;

/// Department names inserted into an empty store, in id order.
pub const DEFAULT_DEPARTMENTS: [&str; 4] = ["HR", "IT", "Finance", "Marketing"];

/// `(name, age, department name, whole salary)` inserted into an empty store.
pub const DEFAULT_EMPLOYEES: [(&str, u8, &str, i64); 4] = [
    ("Alice", 30, "HR", 50_000),
    ("Bob", 25, "IT", 60_000),
    ("Charlie", 35, "Finance", 70_000),
    ("David", 28, "Marketing", 55_000),
];

/// Rows inserted by one `seed_defaults` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub departments_inserted: usize,
    pub employees_inserted: usize,
}

/// Inserts the default departments and employees where missing.
pub fn seed_defaults(conn: &mut Connection) -> RepoResult<SeedReport> {
    let tx = conn.transaction()?;
    let mut report = SeedReport::default();

    let departments = SqliteDepartmentRepository::new(&tx);
    if departments.count_departments()? == 0 {
        for name in DEFAULT_DEPARTMENTS {
            departments.create_department(name)?;
            report.departments_inserted += 1;
        }
    }

    let employees = SqliteEmployeeRepository::new(&tx);
    if employees.count_employees()? == 0 {
        let department_ids = LookupCache::rebuild(&tx, RecordSet::Departments)?;
        for (name, age, department_name, salary_units) in DEFAULT_EMPLOYEES {
            let Some(department) = department_ids.id_for(department_name) else {
                warn!(
                    "event=seed_employee module=db status=skipped reason=missing_department department={department_name}"
                );
                continue;
            };
            employees.create_employee(&NewEmployee {
                name: name.to_string(),
                age: Age::new(age),
                department,
                salary: Salary::from_units(salary_units),
            })?;
            report.employees_inserted += 1;
        }
    }

    tx.commit()?;
    info!(
        "event=seed_defaults module=db status=ok departments_inserted={} employees_inserted={}",
        report.departments_inserted, report.employees_inserted
    );
    Ok(report)
}
