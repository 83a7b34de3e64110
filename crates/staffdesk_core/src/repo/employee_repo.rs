//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `employees` plus the joined read models used by the
//!   employee list and the department headcount report.
//!
//! # Invariants
//! - Updates always write all four mutable fields.
//! - Joined reads use an inner join, so employees whose department id has
//!   no matching department row are omitted from joined results.
//! - `employees.department` is read as an integer whatever its declared
//!   column type.

use crate::cache::RecordSet;
use crate::model::department::DepartmentHeadcount;
use crate::model::employee::{Age, Employee, EmployeeId, EmployeeRow, NewEmployee};
use crate::model::salary::Salary;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

// Files created before the schema was versioned declare `department TEXT`;
// reads cast it so both layouts parse the same.
const EMPLOYEE_SELECT_SQL: &str =
    "SELECT id, name, age, CAST(department AS INTEGER) AS department, salary FROM employees";

const EMPLOYEE_ROW_SELECT_SQL: &str = "SELECT
    employees.id AS id,
    employees.name AS name,
    employees.age AS age,
    CAST(employees.department AS INTEGER) AS department,
    employees.salary AS salary,
    departments.name AS department_name
FROM employees
JOIN departments ON departments.id = CAST(employees.department AS INTEGER)";

/// Repository interface for the `employees` record set.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<EmployeeId>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn list_employee_rows(&self) -> RepoResult<Vec<EmployeeRow>>;
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
    fn count_employees(&self) -> RepoResult<u64>;
    /// Counts per department name, largest first, ties by name.
    fn headcount_by_department(&self) -> RepoResult<Vec<DepartmentHeadcount>>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        self.conn.execute(
            "INSERT INTO employees (name, age, department, salary) VALUES (?1, ?2, ?3, ?4);",
            params![
                employee.name.as_str(),
                employee.age.years(),
                employee.department,
                employee.salary.to_stored(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn list_employee_rows(&self) -> RepoResult<Vec<EmployeeRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_ROW_SELECT_SQL} ORDER BY employees.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(EmployeeRow {
                employee: parse_employee_row(row)?,
                department_name: row.get("department_name")?,
            });
        }
        Ok(items)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET name = ?1, age = ?2, department = ?3, salary = ?4
             WHERE id = ?5;",
            params![
                employee.name.as_str(),
                employee.age.years(),
                employee.department,
                employee.salary.to_stored(),
                employee.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                record_set: RecordSet::Employees,
                id: employee.id,
            });
        }
        Ok(())
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                record_set: RecordSet::Employees,
                id,
            });
        }
        Ok(())
    }

    fn count_employees(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative employee count {count}")))
    }

    fn headcount_by_department(&self) -> RepoResult<Vec<DepartmentHeadcount>> {
        let mut stmt = self.conn.prepare(
            "SELECT departments.name AS department_name, COUNT(*) AS headcount
             FROM employees
             JOIN departments ON departments.id = CAST(employees.department AS INTEGER)
             GROUP BY departments.name
             ORDER BY headcount DESC, departments.name ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next()? {
            let employees: i64 = row.get("headcount")?;
            counts.push(DepartmentHeadcount {
                department_name: row.get("department_name")?,
                employees: u64::try_from(employees).map_err(|_| {
                    RepoError::InvalidData(format!("negative headcount {employees}"))
                })?,
            });
        }
        Ok(counts)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;

    let age = match row.get::<_, Option<i64>>("age")? {
        Some(years) => u8::try_from(years).map(Age::new).map_err(|_| {
            RepoError::InvalidData(format!("invalid age `{years}` in employees.age for id {id}"))
        })?,
        None => {
            return Err(RepoError::InvalidData(format!(
                "missing employees.age for id {id}"
            )))
        }
    };

    let department = row.get::<_, Option<i64>>("department")?.ok_or_else(|| {
        RepoError::InvalidData(format!("missing employees.department for id {id}"))
    })?;

    let salary = match row.get::<_, Option<f64>>("salary")? {
        Some(value) => Salary::from_stored(value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid salary in employees.salary for id {id}"))
        })?,
        None => {
            return Err(RepoError::InvalidData(format!(
                "missing employees.salary for id {id}"
            )))
        }
    };

    Ok(Employee {
        id,
        name: row.get("name")?,
        age,
        department,
        salary,
    })
}
