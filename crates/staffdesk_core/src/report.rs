//! Department headcount report and its bar chart.
//!
//! # Responsibility
//! - Count employees per department name through the store join.
//! - Render the counts as an SVG bar chart written to a fixed path.
//!
//! # Invariants
//! - The report is read-only with respect to the store.
//! - Bars follow the order of the count table.
//! - An empty count table renders axes and titles without bars.

use crate::model::department::DepartmentHeadcount;
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::RepoError;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use svg::node::element::{Line, Rectangle, Text};
use svg::Document;

/// Default chart file, relative to the working directory.
pub const DEFAULT_CHART_FILE: &str = "employees_per_department.svg";

pub const CHART_TITLE: &str = "Number of Employees per Department";

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const PLOT_LEFT: f64 = 80.0;
const PLOT_RIGHT: f64 = 780.0;
const PLOT_TOP: f64 = 60.0;
const PLOT_BOTTOM: f64 = 360.0;
const BAR_FILL: &str = "skyblue";
const MAX_GRIDLINES: u64 = 10;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug)]
pub enum ReportError {
    Repo(RepoError),
    Chart { path: PathBuf, source: io::Error },
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Chart { path, source } => {
                write!(f, "failed to write chart `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Chart { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for ReportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Employee counts per department name, largest first.
pub fn department_headcounts(conn: &Connection) -> ReportResult<Vec<DepartmentHeadcount>> {
    Ok(SqliteEmployeeRepository::new(conn).headcount_by_department()?)
}

/// Writes the bar chart for `counts` to `path`, replacing any existing file.
pub fn render_headcount_chart(
    counts: &[DepartmentHeadcount],
    path: impl AsRef<Path>,
) -> ReportResult<()> {
    let path = path.as_ref();
    svg::save(path, &headcount_chart(counts)).map_err(|source| ReportError::Chart {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "event=chart_render module=report status=ok bars={}",
        counts.len()
    );
    Ok(())
}

/// Builds the chart document: one bar per department, labels at 45°,
/// dashed horizontal gridlines at every y tick.
pub fn headcount_chart(counts: &[DepartmentHeadcount]) -> Document {
    let max_count = counts.iter().map(|count| count.employees).max().unwrap_or(0);
    let step = tick_step(max_count);
    let y_max = (max_count.div_ceil(step) * step).max(step);
    let y_of = |value: u64| PLOT_BOTTOM - (value as f64 / y_max as f64) * (PLOT_BOTTOM - PLOT_TOP);

    let mut document = Document::new()
        .set("viewBox", format!("0 0 {WIDTH} {HEIGHT}"))
        .set("width", px(WIDTH))
        .set("height", px(HEIGHT))
        .set("font-family", "sans-serif")
        .add(
            Rectangle::new()
                .set("width", px(WIDTH))
                .set("height", px(HEIGHT))
                .set("fill", "white"),
        )
        .add(
            Text::new(CHART_TITLE)
                .set("x", px(WIDTH / 2.0))
                .set("y", px(30.0))
                .set("text-anchor", "middle")
                .set("font-size", "18"),
        );

    let mut tick = 0;
    while tick <= y_max {
        let y = y_of(tick);
        document = document
            .add(
                Line::new()
                    .set("x1", px(PLOT_LEFT))
                    .set("x2", px(PLOT_RIGHT))
                    .set("y1", px(y))
                    .set("y2", px(y))
                    .set("stroke", "#b0b0b0")
                    .set("stroke-dasharray", "4 4"),
            )
            .add(
                Text::new(tick.to_string())
                    .set("x", px(PLOT_LEFT - 8.0))
                    .set("y", px(y + 4.0))
                    .set("text-anchor", "end")
                    .set("font-size", "12"),
            );
        tick += step;
    }

    let slot = (PLOT_RIGHT - PLOT_LEFT) / counts.len().max(1) as f64;
    for (index, count) in counts.iter().enumerate() {
        let center = PLOT_LEFT + slot * (index as f64 + 0.5);
        let bar_width = slot * 0.6;
        let top = y_of(count.employees);
        let label_y = PLOT_BOTTOM + 16.0;
        document = document
            .add(
                Rectangle::new()
                    .set("x", px(center - bar_width / 2.0))
                    .set("y", px(top))
                    .set("width", px(bar_width))
                    .set("height", px(PLOT_BOTTOM - top))
                    .set("fill", BAR_FILL),
            )
            .add(
                Text::new(count.department_name.clone())
                    .set("x", px(center))
                    .set("y", px(label_y))
                    .set("text-anchor", "end")
                    .set("font-size", "12")
                    .set(
                        "transform",
                        format!("rotate(-45 {} {})", px(center), px(label_y)),
                    ),
            );
    }

    document
        .add(axis_line(PLOT_LEFT, PLOT_TOP, PLOT_LEFT, PLOT_BOTTOM))
        .add(axis_line(PLOT_LEFT, PLOT_BOTTOM, PLOT_RIGHT, PLOT_BOTTOM))
        .add(
            Text::new("Department")
                .set("x", px((PLOT_LEFT + PLOT_RIGHT) / 2.0))
                .set("y", px(HEIGHT - 16.0))
                .set("text-anchor", "middle")
                .set("font-size", "14"),
        )
        .add(
            Text::new("Number of Employees")
                .set("x", px(24.0))
                .set("y", px((PLOT_TOP + PLOT_BOTTOM) / 2.0))
                .set("text-anchor", "middle")
                .set("font-size", "14")
                .set(
                    "transform",
                    format!("rotate(-90 24 {})", px((PLOT_TOP + PLOT_BOTTOM) / 2.0)),
                ),
        )
}

/// Smallest whole step giving at most `MAX_GRIDLINES` intervals.
fn tick_step(max_count: u64) -> u64 {
    max_count.div_ceil(MAX_GRIDLINES).max(1)
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", px(x1))
        .set("y1", px(y1))
        .set("x2", px(x2))
        .set("y2", px(y2))
        .set("stroke", "black")
}

fn px(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
