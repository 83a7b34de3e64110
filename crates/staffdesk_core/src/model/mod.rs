//! Record-set domain model.
//!
//! # Responsibility
//! - Define the department and employee records shared by every layer.
//! - Provide exact value types for fields with domain rules (`Age`, `Salary`).
//!
//! # Invariants
//! - Ids are generated by the store and never reused within a record set.
//! - An employee's `department` is expected to equal an existing
//!   `Department::id`; the store does not enforce this.

pub mod department;
pub mod employee;
pub mod salary;
