//! Department record.

/// Store-generated department identifier.
pub type DepartmentId = i64;

/// One row of the `departments` record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: DepartmentId,
    /// Unique, non-empty display name.
    pub name: String,
}

/// Number of employees referencing one department, by department name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentHeadcount {
    pub department_name: String,
    pub employees: u64,
}
