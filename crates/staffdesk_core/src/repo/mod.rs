//! Record store gateway: parameterized CRUD over both record sets.
//!
//! # Responsibility
//! - Define per-record-set data access contracts.
//! - Keep every SQL statement inside this module tree.
//!
//! # Invariants
//! - User-supplied values are always bound as parameters.
//! - Read paths reject malformed persisted rows instead of masking them.
//! - Repositories never commit; transaction scope belongs to the caller.

use crate::cache::RecordSet;
use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod employee_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Gateway error shared by both record sets.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { record_set: RecordSet, id: i64 },
    /// Store-enforced unique constraint on `departments.name`.
    DuplicateName(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { record_set, id } => {
                write!(f, "{} row not found: {id}", record_set.table_name())
            }
            Self::DuplicateName(name) => write!(f, "department `{name}` already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}
