//! Employee add/view/update/delete flows.
//!
//! # Invariants
//! - Department answers are checked against `LookupContext::departments()`
//!   before the commit service checks them again.
//! - Update writes all four fields, including the ones left unchanged.
//! - A department kept by Update is re-prompted for when it is not in
//!   the department cache.
//! - Delete happens only after an explicit `yes`.

use crate::cache::{CacheUpdate, LookupContext};
use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::ops::{ask, ask_optional, ask_valid, OpResult};
use crate::prompt::Prompter;
use crate::service::employee_service::EmployeeService;
use crate::validate::{
    validate_age, validate_department_ref, validate_employee_name, validate_record_id,
    validate_salary, FieldError,
};
use rusqlite::Connection;

const RETRY_AGE: &str = "Enter valid age: ";
const RETRY_DEPARTMENT: &str = "Enter valid department: ";
const RETRY_ID: &str = "Enter valid Id: ";

/// Prompts for all employee fields and inserts the employee.
pub fn add_employee(
    conn: &mut Connection,
    lookups: &LookupContext,
    io: &mut impl Prompter,
) -> OpResult<CacheUpdate> {
    let name = ask_valid(io, "Enter name: ", "Enter name: ", validate_employee_name)?;
    let age = ask_valid(io, "Enter age: ", RETRY_AGE, validate_age)?;
    say_departments(io, lookups)?;
    let department = ask_valid(io, "Enter department: ", RETRY_DEPARTMENT, |raw| {
        validate_department_ref(raw, lookups.departments())
    })?;
    let salary = ask_valid(io, "Enter salary: ", "Enter valid salary: ", validate_salary)?;

    let employee = NewEmployee {
        name,
        age,
        department,
        salary,
    };
    let (id, employees) =
        EmployeeService::new(conn).create_employee(lookups.departments(), &employee)?;
    io.say(&format!(
        "Employee {} added successfully with id {id}!",
        employee.name
    ))?;
    Ok(CacheUpdate::Employees(employees))
}

/// Prints every employee with its department name.
pub fn view_employees(
    conn: &mut Connection,
    _lookups: &LookupContext,
    io: &mut impl Prompter,
) -> OpResult<CacheUpdate> {
    let rows = EmployeeService::new(conn).list_employee_rows()?;
    if rows.is_empty() {
        io.say("No employees found.")?;
    } else {
        io.say("Employee List:")?;
        for row in &rows {
            io.say(&row.to_string())?;
        }
    }
    Ok(CacheUpdate::Unchanged)
}

/// Updates any subset of an employee's fields; blank answers keep values.
pub fn update_employee(
    conn: &mut Connection,
    lookups: &LookupContext,
    io: &mut impl Prompter,
) -> OpResult<CacheUpdate> {
    let mut service = EmployeeService::new(conn);
    let id = ask_valid(
        io,
        "Enter Employee ID to update, or 0 to cancel: ",
        RETRY_ID,
        validate_record_id,
    )?;
    let Some(current) = service.get_employee(id)? else {
        io.say("Employee not found!")?;
        return Ok(CacheUpdate::Unchanged);
    };
    io.say(&format!("Updating Employee: {current}"))?;

    let name = ask(io, "Enter new name (or press Enter to keep the same): ")?;
    let age = ask_optional(
        io,
        "Enter new age (or press Enter to keep the same): ",
        RETRY_AGE,
        validate_age,
    )?;
    say_departments(io, lookups)?;
    let department = ask_optional(
        io,
        "Enter new department (or press Enter to keep the same): ",
        RETRY_DEPARTMENT,
        |raw| validate_department_ref(raw, lookups.departments()),
    )?;
    // A kept department must still exist.
    let department = match department {
        None if !lookups.has_department(current.department) => {
            io.say(&format!(
                "  {}",
                FieldError::UnknownDepartment(current.department)
            ))?;
            Some(ask_valid(io, RETRY_DEPARTMENT, RETRY_DEPARTMENT, |raw| {
                validate_department_ref(raw, lookups.departments())
            })?)
        }
        other => other,
    };
    let salary = ask_optional(
        io,
        "Enter new salary (or press Enter to keep the same): ",
        "Enter valid salary (up to two decimal places): ",
        validate_salary,
    )?;

    let changes = EmployeeChanges {
        name: (!name.is_empty()).then_some(name),
        age,
        department,
        salary,
    };
    let updated = current.apply(&changes);
    let employees = service.update_employee(lookups.departments(), &updated)?;
    io.say(&format!("Employee ID {id} updated successfully!"))?;
    Ok(CacheUpdate::Employees(employees))
}

/// Lists employees, then deletes one after a `yes` confirmation.
pub fn delete_employee(
    conn: &mut Connection,
    _lookups: &LookupContext,
    io: &mut impl Prompter,
) -> OpResult<CacheUpdate> {
    let mut service = EmployeeService::new(conn);
    say_employee_list(io, &service.list_employees()?)?;

    let id = ask_valid(
        io,
        "Enter Employee ID to delete, or 0 to cancel: ",
        RETRY_ID,
        validate_record_id,
    )?;
    let Some(employee) = service.get_employee(id)? else {
        io.say("Employee not found!")?;
        return Ok(CacheUpdate::Unchanged);
    };

    let confirm = ask(
        io,
        &format!(
            "Are you sure you want to delete {}? (yes/no): ",
            employee.name
        ),
    )?;
    if !confirm.trim().eq_ignore_ascii_case("yes") {
        io.say("Delete action canceled.")?;
        return Ok(CacheUpdate::Unchanged);
    }

    let employees = service.delete_employee(id)?;
    io.say(&format!("Employee ID {id} deleted successfully!"))?;
    Ok(CacheUpdate::Employees(employees))
}

fn say_departments(io: &mut impl Prompter, lookups: &LookupContext) -> OpResult<()> {
    let listing = lookups
        .departments()
        .entries_by_id()
        .into_iter()
        .map(|(name, id)| format!("{id}={name}"))
        .collect::<Vec<_>>()
        .join(", ");
    io.say(&format!("Departments: {listing}"))?;
    Ok(())
}

fn say_employee_list(io: &mut impl Prompter, employees: &[Employee]) -> OpResult<()> {
    if employees.is_empty() {
        io.say("No employees found.")?;
        return Ok(());
    }
    io.say("Employee List:")?;
    for employee in employees {
        io.say(&employee.to_string())?;
    }
    Ok(())
}
