//! Field rules for venue rows.
//!
//! Every check receives a trimmed, non-empty cell. Emptiness is the job of
//! the required-field pass, so a blank cell is never reported twice.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ErrorCode, ValidationError};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}\s*-\s*[0-9]{2}:[0-9]{2}$").expect("Invalid time range pattern")
});

/// Which coordinate a value is checked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn bound(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }
}

/// A failed field rule. One variant per format-level error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Email,
    Coordinate(Axis),
    Price,
    Boolean,
    TimeFormat,
}

impl Violation {
    pub fn code(&self) -> ErrorCode {
        match self {
            Violation::Email => ErrorCode::InvalidEmail,
            Violation::Coordinate(_) => ErrorCode::InvalidCoordinate,
            Violation::Price => ErrorCode::InvalidPrice,
            Violation::Boolean => ErrorCode::InvalidBoolean,
            Violation::TimeFormat => ErrorCode::InvalidTimeFormat,
        }
    }

    pub fn message(&self) -> String {
        let headline = self.code().headline();
        match self {
            Violation::Coordinate(axis) => format!(
                "{}: {} must be between -{} and {}",
                headline,
                axis.name(),
                axis.bound(),
                axis.bound()
            ),
            Violation::Price => format!("{}: expected a non-negative whole number", headline),
            Violation::TimeFormat => format!("{}: expected HH:MM - HH:MM", headline),
            _ => headline.to_string(),
        }
    }

    /// Pin the violation to a cell.
    pub fn into_error(self, line: usize, field: &str, value: &str) -> ValidationError {
        ValidationError::new(line, self.code(), self.message())
            .with_field(field)
            .with_value(value)
    }
}

/// `local@domain.tld`: one `@`, no whitespace, a dot after the `@`.
pub fn check_email(value: &str) -> Result<(), Violation> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(Violation::Email)
    }
}

/// A finite number within `[-bound, bound]` for the axis.
pub fn check_coordinate(value: &str, axis: Axis) -> Result<f64, Violation> {
    let bound = axis.bound();
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && (-bound..=bound).contains(&n) => Ok(n),
        _ => Err(Violation::Coordinate(axis)),
    }
}

/// A non-negative integer in minor currency units.
pub fn check_price(value: &str) -> Result<u64, Violation> {
    value.parse::<u64>().map_err(|_| Violation::Price)
}

/// `yes` or `no`, any case.
pub fn check_yes_no(value: &str) -> Result<bool, Violation> {
    if value.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(Violation::Boolean)
    }
}

/// `HH:MM - HH:MM`. Format only; `25:99 - 00:00` passes.
pub fn check_time_range(value: &str) -> Result<(), Violation> {
    if TIME_RANGE_RE.is_match(value) {
        Ok(())
    } else {
        Err(Violation::TimeFormat)
    }
}
