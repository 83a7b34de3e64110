//! Core of staffdesk: a department/employee record manager.
//! This crate owns every validation and referential-integrity rule.

pub mod cache;
pub mod db;
pub mod logging;
pub mod menu;
pub mod model;
pub mod ops;
pub mod prompt;
pub mod repo;
pub mod report;
pub mod service;
pub mod validate;

pub use cache::{CacheUpdate, LookupCache, LookupContext, RecordSet};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use menu::{run_menu, MenuChoice, MenuConfig};
pub use model::department::{Department, DepartmentHeadcount, DepartmentId};
pub use model::employee::{Age, Employee, EmployeeChanges, EmployeeId, EmployeeRow, NewEmployee};
pub use model::salary::Salary;
pub use ops::{OpError, OpResult};
pub use prompt::{LinePrompter, Prompter};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::{RepoError, RepoResult};
pub use report::{ReportError, ReportResult, DEFAULT_CHART_FILE};
pub use service::department_service::DepartmentService;
pub use service::employee_service::EmployeeService;
pub use service::{ServiceError, ServiceResult};
pub use validate::FieldError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
