//! Numbered menu loop.
//!
//! # Responsibility
//! - Dispatch choices 1–7 to the CRUD operations and the report.
//! - Own the `LookupContext` and install every returned `CacheUpdate`.
//!
//! # Invariants
//! - A failed operation leaves the caches as they were before it ran.
//! - End of input at any prompt ends the loop like choice 7.

use crate::cache::LookupContext;
use crate::ops::{
    add_department, add_employee, delete_employee, show_report, update_employee, view_employees,
    OpError, OpResult,
};
use crate::prompt::Prompter;
use log::{error, info};
use rusqlite::Connection;
use std::path::PathBuf;

const MENU_LINES: [&str; 8] = [
    "Employee Management System",
    "1. Add Department",
    "2. Add Employee",
    "3. View Employees",
    "4. Update Employee",
    "5. Delete Employee",
    "6. Show Employee Count by Department",
    "7. Exit",
];

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddDepartment,
    AddEmployee,
    ViewEmployees,
    UpdateEmployee,
    DeleteEmployee,
    ShowReport,
    Exit,
}

impl MenuChoice {
    /// Parses a menu answer; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::AddDepartment),
            "2" => Some(Self::AddEmployee),
            "3" => Some(Self::ViewEmployees),
            "4" => Some(Self::UpdateEmployee),
            "5" => Some(Self::DeleteEmployee),
            "6" => Some(Self::ShowReport),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }

    fn event_name(self) -> &'static str {
        match self {
            Self::AddDepartment => "add_department",
            Self::AddEmployee => "add_employee",
            Self::ViewEmployees => "view_employees",
            Self::UpdateEmployee => "update_employee",
            Self::DeleteEmployee => "delete_employee",
            Self::ShowReport => "show_report",
            Self::Exit => "exit",
        }
    }
}

/// Session settings the menu needs beyond the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Where the report chart is written.
    pub chart_path: PathBuf,
}

/// Runs the menu until Exit or end of input.
///
/// Store failures of a single operation are reported and the loop goes on;
/// terminal I/O failures end the loop with an error.
pub fn run_menu(
    conn: &mut Connection,
    lookups: &mut LookupContext,
    io: &mut impl Prompter,
    config: &MenuConfig,
) -> OpResult<()> {
    loop {
        io.say("")?;
        for line in MENU_LINES {
            io.say(line)?;
        }
        let Some(answer) = io.ask("Enter your choice: ")? else {
            break;
        };
        let Some(choice) = MenuChoice::parse(&answer) else {
            io.say("Invalid choice! Please enter a number between 1 and 7.")?;
            continue;
        };
        let outcome = match choice {
            MenuChoice::Exit => break,
            MenuChoice::AddDepartment => add_department(conn, lookups, io),
            MenuChoice::AddEmployee => add_employee(conn, lookups, io),
            MenuChoice::ViewEmployees => view_employees(conn, lookups, io),
            MenuChoice::UpdateEmployee => update_employee(conn, lookups, io),
            MenuChoice::DeleteEmployee => delete_employee(conn, lookups, io),
            MenuChoice::ShowReport => show_report(conn, lookups, io, &config.chart_path),
        };

        match outcome {
            Ok(update) => {
                info!(
                    "event=menu_op module=menu status=ok op={} cache_changed={}",
                    choice.event_name(),
                    !update.is_unchanged()
                );
                lookups.install(update);
            }
            Err(OpError::InputClosed) => break,
            Err(OpError::Io(err)) => return Err(OpError::Io(err)),
            Err(err) => {
                error!(
                    "event=menu_op module=menu status=error op={} error={}",
                    choice.event_name(),
                    error_kind(&err)
                );
                io.say(&format!("Operation failed: {err}"))?;
            }
        }
    }

    io.say("Exiting... Goodbye!")?;
    Ok(())
}

fn error_kind(err: &OpError) -> &'static str {
    match err {
        OpError::InputClosed => "input_closed",
        OpError::Io(_) => "io",
        OpError::Service(service) => service.error_code(),
        OpError::Report(_) => "report",
    }
}

#[cfg(test)]
mod tests {
    use super::MenuChoice;

    #[test]
    fn parse_accepts_only_one_through_seven() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddDepartment));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::ShowReport));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("one"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }
}
