//! Exact two-digit salary amounts.
//!
//! # Invariants
//! - A `Salary` is always a whole number of cents.
//! - Storage uses `REAL`; conversion back rounds to the nearest cent.
//! - Amounts up to `Salary::MAX_CENTS` survive the `REAL` round trip exactly.

use std::fmt::{Display, Formatter};

/// Salary held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Salary(i64);

impl Salary {
    /// Largest accepted amount, `999999999999.99`.
    pub const MAX_CENTS: i64 = 99_999_999_999_999;

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Salary::from_units(50_000)`.
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Value bound into the `employees.salary` column.
    pub fn to_stored(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a stored `REAL` back to cents.
    ///
    /// Returns `None` for non-finite values or values outside the cent range.
    pub fn from_stored(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }
}

impl Display for Salary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
