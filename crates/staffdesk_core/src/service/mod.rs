//! Commit services: one transaction per logical mutation.
//!
//! # Responsibility
//! - Run each write and the lookup-cache rebuild it invalidates inside one
//!   SQLite transaction.
//! - Gate every employee write on the department lookup cache.
//!
//! # Invariants
//! - A rebuilt cache is returned only after its transaction committed.
//! - On any error the transaction rolls back and no cache is returned.

use crate::model::department::DepartmentId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_service;
pub mod employee_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error for commit-service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Written department id is not in the department lookup cache.
    UnknownDepartment(DepartmentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Stable, content-free error code for log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDepartment(_) => "unknown_department",
            Self::Repo(RepoError::Db(_)) => "db_error",
            Self::Repo(RepoError::NotFound { .. }) => "not_found",
            Self::Repo(RepoError::DuplicateName(_)) => "duplicate_name",
            Self::Repo(RepoError::InvalidData(_)) => "invalid_data",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDepartment(id) => write!(f, "no department with id {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::UnknownDepartment(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}
