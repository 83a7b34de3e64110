//! Field validators for raw user input.
//!
//! # Responsibility
//! - Turn raw prompt text into typed field values or a `FieldError` reason.
//! - Check department references against the department lookup cache.
//!
//! # Invariants
//! - Validators are pure: no I/O and no store access.
//! - Only ASCII digits count as digits.
//! - Accepted ages satisfy `18 < age <= 100`.
//! - Accepted salaries are positive, carry at most two fraction digits and
//!   do not exceed `Salary::MAX_CENTS`.

use crate::cache::LookupCache;
use crate::model::department::DepartmentId;
use crate::model::employee::Age;
use crate::model::salary::Salary;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_AGE_EXCLUSIVE: u64 = 18;
const MAX_AGE_INCLUSIVE: u64 = 100;

static SALARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(?:\.([0-9]{1,2}))?$").expect("valid salary regex"));

/// Why a raw input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Required text is empty or blank.
    Empty,
    /// Input is not a whole number.
    NotANumber,
    /// Whole number outside the accepted age range.
    AgeOutOfRange,
    /// Whole number too large to be a record id.
    IdOutOfRange,
    /// Whole number that is not a current department id.
    UnknownDepartment(DepartmentId),
    /// Salary does not look like `digits[.d]` or `digits[.dd]`.
    SalaryMalformed,
    /// Salary is zero.
    SalaryNotPositive,
    /// Salary exceeds `Salary::MAX_CENTS`.
    SalaryTooLarge,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "a value is required"),
            Self::NotANumber => write!(f, "expected a whole number"),
            Self::AgeOutOfRange => write!(
                f,
                "age must be greater than {MIN_AGE_EXCLUSIVE} and at most {MAX_AGE_INCLUSIVE}"
            ),
            Self::IdOutOfRange => write!(f, "id is too large"),
            Self::UnknownDepartment(id) => write!(f, "no department with id {id}"),
            Self::SalaryMalformed => {
                write!(f, "salary must be digits with up to two decimal places")
            }
            Self::SalaryNotPositive => write!(f, "salary must be greater than zero"),
            Self::SalaryTooLarge => write!(
                f,
                "salary must be at most {}",
                Salary::from_cents(Salary::MAX_CENTS)
            ),
        }
    }
}

impl Error for FieldError {}

pub type FieldResult<T> = Result<T, FieldError>;

/// Validates a salary such as `50000`, `1234.5` or `0.99`.
pub fn validate_salary(raw: &str) -> FieldResult<Salary> {
    let captures = SALARY_RE.captures(raw).ok_or(FieldError::SalaryMalformed)?;

    let units = captures[1]
        .parse::<i64>()
        .map_err(|_| FieldError::SalaryTooLarge)?;
    let fraction = match captures.get(2) {
        Some(digits) if digits.as_str().len() == 1 => digits.as_str().parse::<i64>().map(|d| d * 10),
        Some(digits) => digits.as_str().parse::<i64>(),
        None => Ok(0),
    }
    .map_err(|_| FieldError::SalaryMalformed)?;

    let cents = units
        .checked_mul(100)
        .and_then(|value| value.checked_add(fraction))
        .filter(|cents| *cents <= Salary::MAX_CENTS)
        .ok_or(FieldError::SalaryTooLarge)?;
    if cents == 0 {
        return Err(FieldError::SalaryNotPositive);
    }

    Ok(Salary::from_cents(cents))
}

/// Validates an age; only whole numbers in `19..=100` pass.
pub fn validate_age(raw: &str) -> FieldResult<Age> {
    let years = parse_whole_number(raw)?.ok_or(FieldError::AgeOutOfRange)?;
    if years <= MIN_AGE_EXCLUSIVE || years > MAX_AGE_INCLUSIVE {
        return Err(FieldError::AgeOutOfRange);
    }
    let years = u8::try_from(years).map_err(|_| FieldError::AgeOutOfRange)?;
    Ok(Age::new(years))
}

/// Validates a department reference against the department cache.
///
/// A stale cache accepts or rejects accordingly; callers must install the
/// cache returned by the latest department mutation.
pub fn validate_department_ref(raw: &str, departments: &LookupCache) -> FieldResult<DepartmentId> {
    let id = validate_record_id(raw)?;
    if !departments.contains_id(id) {
        return Err(FieldError::UnknownDepartment(id));
    }
    Ok(id)
}

/// Validates a new department name; returns it trimmed.
pub fn validate_department_name(raw: &str) -> FieldResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Employee names are free text.
pub fn validate_employee_name(raw: &str) -> FieldResult<String> {
    Ok(raw.to_string())
}

/// Validates a record id typed at an id prompt.
pub fn validate_record_id(raw: &str) -> FieldResult<i64> {
    let value = parse_whole_number(raw)?.ok_or(FieldError::IdOutOfRange)?;
    i64::try_from(value).map_err(|_| FieldError::IdOutOfRange)
}

/// `Ok(None)` means the digits overflow `u64`.
fn parse_whole_number(raw: &str) -> FieldResult<Option<u64>> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(FieldError::NotANumber);
    }
    Ok(raw.parse::<u64>().ok())
}
