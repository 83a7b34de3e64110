//! Add-Department flow.

use crate::cache::{CacheUpdate, LookupContext};
use crate::ops::{ask, OpResult};
use crate::prompt::Prompter;
use crate::service::department_service::DepartmentService;
use crate::validate::validate_department_name;
use rusqlite::Connection;

/// Prompts for a department name and inserts it.
///
/// A blank name cancels with `Unchanged`. A duplicate name is rejected by
/// the store and returned as an error.
pub fn add_department(
    conn: &mut Connection,
    _lookups: &LookupContext,
    io: &mut impl Prompter,
) -> OpResult<CacheUpdate> {
    let raw = ask(io, "Enter new Department name (leave blank to cancel): ")?;
    let Ok(name) = validate_department_name(&raw) else {
        io.say("No department added.")?;
        return Ok(CacheUpdate::Unchanged);
    };

    let (id, departments) = DepartmentService::new(conn).create_department(&name)?;
    io.say(&format!("Department {name} added successfully with id {id}!"))?;
    Ok(CacheUpdate::Departments(departments))
}
