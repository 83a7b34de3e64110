//! Employee records and partial updates.
//!
//! # Invariants
//! - `Employee::apply` keeps every field the change set leaves as `None`.
//! - `EmployeeRow` is a read-only projection; it is never written back.

use crate::model::department::DepartmentId;
use crate::model::salary::Salary;
use std::fmt::{Display, Formatter};

/// Store-generated employee identifier.
pub type EmployeeId = i64;

/// Employee age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u8);

impl Age {
    pub const fn new(years: u8) -> Self {
        Self(years)
    }

    pub const fn years(self) -> u8 {
        self.0
    }
}

impl Display for Age {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values for an employee that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub age: Age,
    pub department: DepartmentId,
    pub salary: Salary,
}

/// One row of the `employees` record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub age: Age,
    /// Expected to match a `Department::id`.
    pub department: DepartmentId,
    pub salary: Salary,
}

/// Per-field replacements for an update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub age: Option<Age>,
    pub department: Option<DepartmentId>,
    pub salary: Option<Salary>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.department.is_none() && self.salary.is_none()
    }
}

impl Employee {
    /// Returns the record with `changes` applied over the current values.
    pub fn apply(&self, changes: &EmployeeChanges) -> Employee {
        Employee {
            id: self.id,
            name: changes.name.clone().unwrap_or_else(|| self.name.clone()),
            age: changes.age.unwrap_or(self.age),
            department: changes.department.unwrap_or(self.department),
            salary: changes.salary.unwrap_or(self.salary),
        }
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} | age {} | department {} | salary {}",
            self.id, self.name, self.age, self.department, self.salary
        )
    }
}

/// Employee joined with its department name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub employee: Employee,
    pub department_name: String,
}

impl Display for EmployeeRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let employee = &self.employee;
        write!(
            f,
            "#{} {} | age {} | department {} ({}) | salary {}",
            employee.id,
            employee.name,
            employee.age,
            employee.department,
            self.department_name,
            employee.salary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Age, Employee, EmployeeChanges};
    use crate::model::salary::Salary;

    fn alice() -> Employee {
        Employee {
            id: 1,
            name: "Alice".to_string(),
            age: Age::new(30),
            department: 1,
            salary: Salary::from_units(50_000),
        }
    }

    #[test]
    fn apply_with_no_changes_is_identity() {
        let changes = EmployeeChanges::default();
        assert!(changes.is_empty());
        assert_eq!(alice().apply(&changes), alice());
    }

    #[test]
    fn apply_replaces_only_given_fields() {
        let changes = EmployeeChanges {
            name: Some("Alicia".to_string()),
            salary: Some(Salary::from_cents(5_100_050)),
            ..EmployeeChanges::default()
        };
        let updated = alice().apply(&changes);
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.salary.to_string(), "51000.50");
        assert_eq!(updated.age, Age::new(30));
        assert_eq!(updated.department, 1);
        assert_eq!(updated.id, 1);
    }
}
