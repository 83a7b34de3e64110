//! Name→id lookup caches for both record sets.
//!
//! # Responsibility
//! - Derive a `name → id` mapping per record set from the store.
//! - Hold both mappings in one explicit context owned by the menu loop.
//!
//! # Invariants
//! - Lookup queries come from the closed `RecordSet` enum; no identifier is
//!   ever interpolated into SQL.
//! - A cache only changes by being rebuilt from the store and installed
//!   through `LookupContext::install`.
//! - Duplicate names collapse to the highest id (last row wins).

use crate::model::department::DepartmentId;
use crate::repo::RepoResult;
use log::{debug, warn};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The two managed record sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSet {
    Departments,
    Employees,
}

impl RecordSet {
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::Employees => "employees",
        }
    }

    const fn lookup_sql(self) -> &'static str {
        match self {
            Self::Departments => "SELECT id, name FROM departments ORDER BY id ASC;",
            Self::Employees => "SELECT id, name FROM employees ORDER BY id ASC;",
        }
    }
}

impl Display for RecordSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Snapshot of one record set's `name → id` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCache {
    record_set: RecordSet,
    entries: BTreeMap<String, i64>,
}

impl LookupCache {
    /// Re-reads every `(id, name)` pair of `record_set`.
    pub fn rebuild(conn: &Connection, record_set: RecordSet) -> RepoResult<Self> {
        let mut stmt = conn.prepare(record_set.lookup_sql())?;
        let mut rows = stmt.query([])?;
        let mut entries = BTreeMap::new();
        let mut collapsed = 0usize;

        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let name: String = row.get(1)?;
            if entries.insert(name, id).is_some() {
                collapsed += 1;
            }
        }

        if collapsed > 0 {
            warn!(
                "event=cache_rebuild module=cache status=degraded record_set={record_set} duplicate_names={collapsed}"
            );
        }
        debug!(
            "event=cache_rebuild module=cache status=ok record_set={record_set} entries={}",
            entries.len()
        );

        Ok(Self {
            record_set,
            entries,
        })
    }

    pub fn record_set(&self) -> RecordSet {
        self.record_set
    }

    pub fn id_for(&self, name: &str) -> Option<i64> {
        self.entries.get(name).copied()
    }

    /// Whether `id` is one of the mapped ids.
    pub fn contains_id(&self, id: i64) -> bool {
        self.entries.values().any(|value| *value == id)
    }

    /// `(name, id)` pairs ordered by id.
    pub fn entries_by_id(&self) -> Vec<(&str, i64)> {
        let mut entries: Vec<(&str, i64)> = self
            .entries
            .iter()
            .map(|(name, id)| (name.as_str(), *id))
            .collect();
        entries.sort_by_key(|(_, id)| *id);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fresh cache produced by an operation, to be installed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheUpdate {
    /// The operation changed nothing (cancelled, not found, read-only).
    Unchanged,
    Departments(LookupCache),
    Employees(LookupCache),
}

impl CacheUpdate {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Both lookup caches, threaded explicitly through every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupContext {
    departments: LookupCache,
    employees: LookupCache,
}

impl LookupContext {
    /// Builds both caches from the current store state.
    pub fn load(conn: &Connection) -> RepoResult<Self> {
        Ok(Self {
            departments: LookupCache::rebuild(conn, RecordSet::Departments)?,
            employees: LookupCache::rebuild(conn, RecordSet::Employees)?,
        })
    }

    pub fn departments(&self) -> &LookupCache {
        &self.departments
    }

    pub fn employees(&self) -> &LookupCache {
        &self.employees
    }

    /// Whether `id` currently names a known department.
    pub fn has_department(&self, id: DepartmentId) -> bool {
        self.departments.contains_id(id)
    }

    /// Installs an operation result; `Unchanged` keeps both caches.
    pub fn install(&mut self, update: CacheUpdate) {
        let (slot, cache) = match update {
            CacheUpdate::Unchanged => return,
            CacheUpdate::Departments(cache) => (&mut self.departments, cache),
            CacheUpdate::Employees(cache) => (&mut self.employees, cache),
        };
        debug!(
            "event=cache_install module=cache status=ok record_set={} entries={}",
            cache.record_set(),
            cache.len()
        );
        *slot = cache;
    }
}
