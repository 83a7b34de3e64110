//! Command-line and environment configuration.
//!
//! # Invariants
//! - Every option has a default; running without flags starts the menu on
//!   `staffdesk.sqlite3` in the working directory.
//! - `log_dir` is always absolute after `AppConfig::resolve`.

use clap::Parser;
use staffdesk_core::{default_log_level, DEFAULT_CHART_FILE};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "staffdesk.sqlite3";
const DEFAULT_LOG_SUBDIR: &str = "logs";

/// Interactive department and employee record manager.
#[derive(Parser, Debug)]
#[command(name = "staffdesk")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite file holding departments and employees.
    #[arg(long, env = "STAFFDESK_DB", default_value = DEFAULT_DB_FILE)]
    pub db_path: PathBuf,

    /// Output file for the headcount bar chart.
    #[arg(long, env = "STAFFDESK_CHART", default_value = DEFAULT_CHART_FILE)]
    pub chart_path: PathBuf,

    /// Directory for rotated log files [default: <cwd>/logs].
    #[arg(long, env = "STAFFDESK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "STAFFDESK_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub chart_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Applies defaults that depend on the working directory.
    pub fn resolve(args: Args, cwd: &Path) -> Self {
        let log_dir = match args.log_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => cwd.join(DEFAULT_LOG_SUBDIR),
        };
        Self {
            db_path: args.db_path,
            chart_path: args.chart_path,
            log_dir,
            log_level: args
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}
