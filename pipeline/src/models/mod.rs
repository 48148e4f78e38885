//! Domain models for the happy hour pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`Venue`] - A fully validated bar/restaurant record
//! - [`VenueCollection`] - The `venues.json` document
//! - [`ErrorCode`] - Closed taxonomy of validation failures
//! - [`ValidationError`] - One failure, pinned to a source line
//! - [`ValidationResult`] - Aggregate outcome of one run
//!
//! Column names are the canonical spreadsheet headers, including the
//! misspelled coordinate headers the spreadsheet has always used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Spreadsheet Columns
// =============================================================================

pub const COL_NAME: &str = "Name of Bar/Restaurant";
pub const COL_EMAIL: &str = "Best Contact Email";
pub const COL_STREET: &str = "Street";
pub const COL_LATITUDE: &str = "Latitute";
pub const COL_LONGITUDE: &str = "Longitute";
pub const COL_DAYS: &str = "Happy Hour Days";
pub const COL_TIMES: &str = "Happy Hour Times";
pub const COL_BEER_PRICE: &str = "Price Of Cheapest Beer";
pub const COL_WINE_PRICE: &str = "Price Of Cheapest Wine";
pub const COL_TWO_FOR_ONE: &str = "2F1?";
pub const COL_NOTES: &str = "Notes";
pub const COL_DESCRIPTION: &str = "Description for Featured Happy Hour";

/// Columns that must exist in the header row and be non-empty in every row.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    COL_NAME,
    COL_EMAIL,
    COL_STREET,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_DAYS,
    COL_TIMES,
    COL_BEER_PRICE,
    COL_WINE_PRICE,
    COL_TWO_FOR_ONE,
    COL_NOTES,
];

/// The full canonical header, in spreadsheet order.
pub const CANONICAL_COLUMNS: [&str; 12] = [
    COL_NAME,
    COL_EMAIL,
    COL_STREET,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_DAYS,
    COL_TIMES,
    COL_BEER_PRICE,
    COL_WINE_PRICE,
    COL_TWO_FOR_ONE,
    COL_NOTES,
    COL_DESCRIPTION,
];

// =============================================================================
// Error Codes
// =============================================================================

/// Closed set of validation failure classes.
///
/// Each code maps to exactly one remediation hint in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A line could not be tokenized (unbalanced quotes, unreadable header).
    ParseError,
    /// A required column is absent from the header row.
    MissingHeader,
    /// A required cell is empty.
    MissingRequired,
    InvalidEmail,
    InvalidCoordinate,
    InvalidPrice,
    InvalidBoolean,
    InvalidTimeFormat,
    /// A row has more or fewer cells than the header.
    MalformedRow,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::ParseError,
        ErrorCode::MissingHeader,
        ErrorCode::MissingRequired,
        ErrorCode::InvalidEmail,
        ErrorCode::InvalidCoordinate,
        ErrorCode::InvalidPrice,
        ErrorCode::InvalidBoolean,
        ErrorCode::InvalidTimeFormat,
        ErrorCode::MalformedRow,
    ];

    /// Wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::MissingHeader => "MISSING_HEADER",
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidCoordinate => "INVALID_COORDINATE",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidBoolean => "INVALID_BOOLEAN",
            Self::InvalidTimeFormat => "INVALID_TIME_FORMAT",
            Self::MalformedRow => "MALFORMED_ROW",
        }
    }

    /// Short description used as the first part of every error message.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::ParseError => "CSV parsing error",
            Self::MissingHeader => "Required header column is missing",
            Self::MissingRequired => "Required field is empty",
            Self::InvalidEmail => "Invalid email format",
            Self::InvalidCoordinate => "Invalid coordinate value",
            Self::InvalidPrice => "Invalid price value",
            Self::InvalidBoolean => "Invalid yes/no value",
            Self::InvalidTimeFormat => "Invalid time format",
            Self::MalformedRow => "Row has incorrect number of columns",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single rule violation, traceable to one line of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based source line.
    pub line: usize,
    /// Column name, or `None` for row and document level problems.
    pub field: Option<String>,
    pub code: ErrorCode,
    pub message: String,
    /// The offending value (trimmed), when there is one.
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(line: usize, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            line,
            field: None,
            code,
            message: message.into(),
            value: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, &self.value) {
            (Some(field), Some(value)) => write!(
                f,
                "Line {} [{}] {} (value '{}'): {}",
                self.line, field, self.code, value, self.message
            ),
            (Some(field), None) => {
                write!(f, "Line {} [{}] {}: {}", self.line, field, self.code, self.message)
            }
            _ => write!(f, "Line {} {}: {}", self.line, self.code, self.message),
        }
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Aggregate outcome of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub generated_at: DateTime<Utc>,
    pub valid: bool,
    pub error_count: usize,
    pub valid_row_count: usize,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Build a result stamped with the current time.
    pub fn new(errors: Vec<ValidationError>, valid_row_count: usize) -> Self {
        Self::at(errors, valid_row_count, Utc::now())
    }

    /// Build a result with an explicit timestamp.
    pub fn at(errors: Vec<ValidationError>, valid_row_count: usize, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            valid: errors.is_empty(),
            error_count: errors.len(),
            valid_row_count,
            errors,
        }
    }
}

// =============================================================================
// Venue
// =============================================================================

/// A bar or restaurant whose row passed every check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Sequential id in validation order, starting at 1.
    pub id: u32,
    pub name: String,
    pub email: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
    pub happy_hour_days: String,
    pub happy_hour_times: String,
    /// Minor currency units.
    pub cheapest_beer_price: u64,
    /// Minor currency units.
    pub cheapest_wine_price: u64,
    pub two_for_one: bool,
    pub notes: String,
    pub description: Option<String>,
}

// =============================================================================
// Venue Collection
// =============================================================================

/// The `venues.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueCollection {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub items: Vec<Venue>,
}

impl VenueCollection {
    /// Build the collection, sorted by id for deterministic output.
    pub fn new(mut venues: Vec<Venue>) -> Self {
        venues.sort_by_key(|v| v.id);
        Self {
            generated_at: Utc::now(),
            count: venues.len(),
            items: venues,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(id: u32) -> Venue {
        Venue {
            id,
            name: format!("Bar {}", id),
            email: "bar@example.com".into(),
            street: "Laugavegur 1".into(),
            latitude: 64.14,
            longitude: -21.93,
            happy_hour_days: "Mon-Fri".into(),
            happy_hour_times: "16:00 - 18:00".into(),
            cheapest_beer_price: 900,
            cheapest_wine_price: 1000,
            two_for_one: false,
            notes: "-".into(),
            description: None,
        }
    }

    #[test]
    fn test_error_code_wire_names() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_result_counts() {
        let result = ValidationResult::new(vec![], 3);
        assert!(result.valid);
        assert_eq!(result.error_count, 0);
        assert_eq!(result.valid_row_count, 3);

        let err = ValidationError::new(5, ErrorCode::InvalidPrice, "Invalid price value")
            .with_field(COL_BEER_PRICE)
            .with_value("12.5");
        let result = ValidationResult::new(vec![err], 0);
        assert!(!result.valid);
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ValidationResult::new(vec![], 0);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json.get("errorCount").is_some());
        assert!(json.get("validRowCount").is_some());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(7, ErrorCode::InvalidBoolean, "Invalid yes/no value")
            .with_field(COL_TWO_FOR_ONE)
            .with_value("Maybe");
        let msg = err.to_string();
        assert!(msg.contains("Line 7"));
        assert!(msg.contains("[2F1?]"));
        assert!(msg.contains("value 'Maybe'"));
    }

    #[test]
    fn test_collection_sorted_by_id() {
        let collection = VenueCollection::new(vec![venue(3), venue(1), venue(2)]);
        let ids: Vec<u32> = collection.items.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(collection.count, 3);
    }

    #[test]
    fn test_venue_serialization() {
        let json = serde_json::to_value(venue(1)).unwrap();
        assert_eq!(json["happyHourTimes"], "16:00 - 18:00");
        assert_eq!(json["cheapestBeerPrice"], 900);
        assert_eq!(json["twoForOne"], false);
        assert!(json["description"].is_null());
    }
}
