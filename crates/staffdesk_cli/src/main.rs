//! `staffdesk` binary entry point.
//!
//! # Responsibility
//! - Resolve configuration, start file logging, open and seed the store.
//! - Hand stdin/stdout to the core menu loop.

mod config;

use anyhow::Context;
use clap::Parser;
use config::{AppConfig, Args};
use log::{info, warn};
use staffdesk_core::db::{open_db, seed_defaults};
use staffdesk_core::{
    init_logging, logging_status, run_menu, LinePrompter, LookupContext, MenuConfig,
};
use std::io;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let config = AppConfig::resolve(args, &cwd);

    // Stdout is the menu; a logging failure only costs diagnostics.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=cli_start module=cli status=ok core_version={} level={level} log_dir={}",
            staffdesk_core::core_version(),
            log_dir.display()
        );
    }

    let mut conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;

    let seeded = seed_defaults(&mut conn).context("failed to seed default records")?;
    if seeded.departments_inserted > 0 {
        println!("Departments inserted successfully!");
    }
    if seeded.employees_inserted > 0 {
        println!("Employees inserted successfully!");
    }

    let mut lookups = LookupContext::load(&conn).context("failed to load lookup caches")?;
    let menu_config = MenuConfig {
        chart_path: config.chart_path.clone(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = LinePrompter::new(stdin.lock(), stdout.lock());
    if let Err(err) = run_menu(&mut conn, &mut lookups, &mut prompter, &menu_config) {
        warn!("event=cli_exit module=cli status=error error={err}");
        return Err(err).context("menu loop aborted");
    }

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
