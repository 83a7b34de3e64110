//! SQLite storage bootstrap: connection setup, schema, default rows.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection used by the process.
//! - Apply the schema before any record is read or written.
//! - Seed the default departments and employees into an empty store.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No foreign key is declared between `employees.department` and
//!   `departments.id`; references are validated against the lookup cache.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
pub mod seed;

pub use open::{open_db, open_db_in_memory};
pub use seed::{seed_defaults, SeedReport};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
