//! Department repository contract and SQLite implementation.
//!
//! # Invariants
//! - Name uniqueness is enforced by the store and surfaced as
//!   `RepoError::DuplicateName`.
//! - List results are ordered by id ascending.

use crate::model::department::{Department, DepartmentId};
use crate::repo::{is_constraint_violation, RepoError, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for the `departments` record set.
pub trait DepartmentRepository {
    fn create_department(&self, name: &str) -> RepoResult<DepartmentId>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
    fn count_departments(&self) -> RepoResult<u64>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_department(&self, name: &str) -> RepoResult<DepartmentId> {
        match self
            .conn
            .execute("INSERT INTO departments (name) VALUES (?1);", params![name])
        {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_constraint_violation(&err) => {
                Err(RepoError::DuplicateName(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM departments WHERE id = ?1;")?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Department {
                id: row.get("id")?,
                name: row.get("name")?,
            }));
        }
        Ok(None)
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM departments ORDER BY id ASC;")?;
        let departments = stmt
            .query_map([], |row| {
                Ok(Department {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn count_departments(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM departments;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative department count {count}")))
    }
}
