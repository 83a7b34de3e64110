//! Department use-case service.
//!
//! # Invariants
//! - Department names are inserted as given; uniqueness is left to the store.

use crate::cache::{LookupCache, RecordSet};
use crate::model::department::DepartmentId;
use crate::repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
use crate::service::ServiceResult;
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Department commits over one connection.
pub struct DepartmentService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> DepartmentService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Inserts one department and returns its id with the rebuilt cache.
    pub fn create_department(&mut self, name: &str) -> ServiceResult<(DepartmentId, LookupCache)> {
        let started_at = Instant::now();
        let result = self.create_department_tx(name);
        match &result {
            Ok((id, cache)) => info!(
                "event=department_create module=service status=ok department_id={id} departments={} duration_ms={}",
                cache.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=department_create module=service status=error duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.error_code()
            ),
        }
        result
    }

    fn create_department_tx(&mut self, name: &str) -> ServiceResult<(DepartmentId, LookupCache)> {
        let tx = self.conn.transaction()?;
        let id = SqliteDepartmentRepository::new(&tx).create_department(name)?;
        let cache = LookupCache::rebuild(&tx, RecordSet::Departments)?;
        tx.commit()?;
        Ok((id, cache))
    }
}
