//! Show-Aggregate-Report flow.

use crate::cache::{CacheUpdate, LookupContext};
use crate::ops::OpResult;
use crate::prompt::Prompter;
use crate::report::{department_headcounts, render_headcount_chart};
use rusqlite::Connection;
use std::path::Path;

/// Prints employee counts per department and writes the chart to
/// `chart_path`. Never changes the store.
pub fn show_report(
    conn: &Connection,
    _lookups: &LookupContext,
    io: &mut impl Prompter,
    chart_path: &Path,
) -> OpResult<CacheUpdate> {
    let counts = department_headcounts(conn)?;

    io.say("Number of Employees per Department:")?;
    if counts.is_empty() {
        io.say("No employees found.")?;
    }
    let width = counts
        .iter()
        .map(|count| count.department_name.chars().count())
        .max()
        .unwrap_or(0);
    for count in &counts {
        io.say(&format!(
            "{:<width$}  {}",
            count.department_name, count.employees
        ))?;
    }

    render_headcount_chart(&counts, chart_path)?;
    io.say(&format!("Barchart saved to {}", chart_path.display()))?;
    Ok(CacheUpdate::Unchanged)
}
