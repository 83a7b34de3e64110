//! Interactive CRUD operations.
//!
//! # Responsibility
//! - Drive each menu operation as a prompt → validate → commit sequence.
//! - Report every outcome as a `CacheUpdate` for the caller to install.
//!
//! # Invariants
//! - Invalid input is never an error: it is re-prompted or the operation
//!   ends with `CacheUpdate::Unchanged`.
//! - Nothing is written before the last prompt of an operation succeeds.
//! - Operations read caches through `&LookupContext` and never mutate it.

use crate::prompt::Prompter;
use crate::report::ReportError;
use crate::service::ServiceError;
use crate::validate::FieldResult;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub mod department_ops;
pub mod employee_ops;
pub mod report_ops;

pub use department_ops::add_department;
pub use employee_ops::{add_employee, delete_employee, update_employee, view_employees};
pub use report_ops::show_report;

pub type OpResult<T> = Result<T, OpError>;

/// Failure that ends an operation without a result.
#[derive(Debug)]
pub enum OpError {
    /// The input stream ended while a prompt was waiting.
    InputClosed,
    /// Reading or writing the terminal failed.
    Io(io::Error),
    /// The store rejected a commit or read.
    Service(ServiceError),
    /// The aggregate report could not be produced.
    Report(ReportError),
}

impl Display for OpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputClosed => write!(f, "input closed"),
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Report(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InputClosed => None,
            Self::Io(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Report(err) => Some(err),
        }
    }
}

impl From<io::Error> for OpError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ServiceError> for OpError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<ReportError> for OpError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

/// Asks once; end of input becomes `OpError::InputClosed`.
pub(crate) fn ask(io: &mut impl Prompter, prompt: &str) -> OpResult<String> {
    io.ask(prompt)?.ok_or(OpError::InputClosed)
}

/// Asks until `validate` accepts, printing each rejection reason.
pub(crate) fn ask_valid<T>(
    io: &mut impl Prompter,
    prompt: &str,
    retry_prompt: &str,
    validate: impl Fn(&str) -> FieldResult<T>,
) -> OpResult<T> {
    let first = ask(io, prompt)?;
    revalidate(io, first, retry_prompt, validate)
}

/// Like `ask_valid`, but an empty first answer yields `None`.
///
/// Once a non-empty answer was given, re-prompts require a valid value.
pub(crate) fn ask_optional<T>(
    io: &mut impl Prompter,
    prompt: &str,
    retry_prompt: &str,
    validate: impl Fn(&str) -> FieldResult<T>,
) -> OpResult<Option<T>> {
    let first = ask(io, prompt)?;
    if first.is_empty() {
        return Ok(None);
    }
    revalidate(io, first, retry_prompt, validate).map(Some)
}

fn revalidate<T>(
    io: &mut impl Prompter,
    mut answer: String,
    retry_prompt: &str,
    validate: impl Fn(&str) -> FieldResult<T>,
) -> OpResult<T> {
    loop {
        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(reason) => {
                debug!("event=input_rejected module=ops status=retry reason={reason:?}");
                io.say(&format!("  {reason}"))?;
                answer = ask(io, retry_prompt)?;
            }
        }
    }
}
