//! Row validation and venue production.
//!
//! [`validate`] runs a fixed battery of checks over every extracted row:
//!
//! | Order | Column(s)                 | Code                  |
//! |-------|---------------------------|-----------------------|
//! | 1     | all 11 required columns   | `MISSING_REQUIRED`    |
//! | 2     | Best Contact Email        | `INVALID_EMAIL`       |
//! | 3     | Latitute                  | `INVALID_COORDINATE`  |
//! | 4     | Longitute                 | `INVALID_COORDINATE`  |
//! | 5     | Price Of Cheapest Beer    | `INVALID_PRICE`       |
//! | 6     | Price Of Cheapest Wine    | `INVALID_PRICE`       |
//! | 7     | 2F1?                      | `INVALID_BOOLEAN`     |
//! | 8     | Happy Hour Times          | `INVALID_TIME_FORMAT` |
//!
//! Checks never short-circuit each other, so a row reports everything wrong
//! with it at once. A row with any error yields no [`Venue`].
//!
//! # Example
//!
//! ```rust,ignore
//! use happyhour::{extract, validate, ValidateOptions};
//!
//! let extraction = extract(&text);
//! let validation = validate(&extraction.rows, &extraction.errors, &ValidateOptions::default());
//!
//! for err in &validation.result.errors {
//!     eprintln!("{}", err);
//! }
//! ```

pub mod rules;

use crate::models::{
    ErrorCode, ValidationError, ValidationResult, Venue, COL_BEER_PRICE, COL_DAYS, COL_DESCRIPTION, COL_EMAIL,
    COL_LATITUDE, COL_LONGITUDE, COL_NAME, COL_NOTES, COL_STREET, COL_TIMES, COL_TWO_FOR_ONE, COL_WINE_PRICE,
    REQUIRED_COLUMNS,
};
use crate::parser::{ExtractionError, RawRow};
use crate::transform::venue::CheckedRow;
use rules::{Axis, Violation};

/// Options for [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Report extraction errors ahead of the row errors.
    pub include_extraction_errors: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            include_extraction_errors: true,
        }
    }
}

/// Output of [`validate`].
#[derive(Debug, Clone)]
pub struct Validation {
    pub result: ValidationResult,
    /// Venues in id order.
    pub venues: Vec<Venue>,
}

/// Validate extracted rows and build venues from the clean ones.
///
/// Never fails for bad input: every problem ends up in `result.errors`,
/// extraction errors first, then row errors in row order.
pub fn validate(rows: &[RawRow], extraction_errors: &[ExtractionError], options: &ValidateOptions) -> Validation {
    let mut errors: Vec<ValidationError> = if options.include_extraction_errors {
        extraction_errors.iter().map(seed_error).collect()
    } else {
        Vec::new()
    };
    let mut venues: Vec<Venue> = Vec::new();

    for row in rows {
        match check_row(row) {
            Ok(checked) => {
                let id = venues.len() as u32 + 1;
                venues.push(checked.into_venue(id));
            }
            Err(row_errors) => errors.extend(row_errors),
        }
    }

    Validation {
        result: ValidationResult::new(errors, venues.len()),
        venues,
    }
}

/// Turn an extraction error into a row-less `PARSE_ERROR`.
///
/// Every extraction class shares the code; the message says which it was.
fn seed_error(err: &ExtractionError) -> ValidationError {
    let code = ErrorCode::ParseError;
    ValidationError::new(err.line, code, format!("{}: {}", code.headline(), err.message))
}

/// Run every check on one row.
///
/// Returns the typed values when the row is clean, or every error found.
pub fn check_row(row: &RawRow) -> Result<CheckedRow, Vec<ValidationError>> {
    let line = row.line_number;
    let mut errors = Vec::new();

    for column in REQUIRED_COLUMNS {
        match row.get(column).map(str::trim) {
            Some(value) if !value.is_empty() => {}
            value => {
                let err = ValidationError::new(
                    line,
                    ErrorCode::MissingRequired,
                    format!("{}: {}", ErrorCode::MissingRequired.headline(), column),
                )
                .with_field(column);
                errors.push(match value {
                    Some(v) => err.with_value(v),
                    None => err,
                });
            }
        }
    }

    let email = apply(row, COL_EMAIL, &mut errors, rules::check_email);
    let latitude = apply(row, COL_LATITUDE, &mut errors, |v| rules::check_coordinate(v, Axis::Latitude));
    let longitude = apply(row, COL_LONGITUDE, &mut errors, |v| rules::check_coordinate(v, Axis::Longitude));
    let beer = apply(row, COL_BEER_PRICE, &mut errors, rules::check_price);
    let wine = apply(row, COL_WINE_PRICE, &mut errors, rules::check_price);
    let two_for_one = apply(row, COL_TWO_FOR_ONE, &mut errors, rules::check_yes_no);
    let times = apply(row, COL_TIMES, &mut errors, rules::check_time_range);

    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(()), Some(latitude), Some(longitude), Some(beer), Some(wine), Some(two_for_one), Some(())) =
        (email, latitude, longitude, beer, wine, two_for_one, times)
    else {
        unreachable!("row without errors has every required cell parsed");
    };

    Ok(CheckedRow {
        name: cell(row, COL_NAME),
        email: cell(row, COL_EMAIL),
        street: cell(row, COL_STREET),
        latitude,
        longitude,
        happy_hour_days: cell(row, COL_DAYS),
        happy_hour_times: cell(row, COL_TIMES),
        cheapest_beer_price: beer,
        cheapest_wine_price: wine,
        two_for_one,
        notes: cell(row, COL_NOTES),
        description: cell(row, COL_DESCRIPTION),
    })
}

/// Run `check` on a non-empty cell, recording a violation against the row.
fn apply<T>(
    row: &RawRow,
    column: &str,
    errors: &mut Vec<ValidationError>,
    check: impl FnOnce(&str) -> Result<T, Violation>,
) -> Option<T> {
    let value = row.get(column).map(str::trim).filter(|v| !v.is_empty())?;
    match check(value) {
        Ok(parsed) => Some(parsed),
        Err(violation) => {
            errors.push(violation.into_error(row.line_number, column, value));
            None
        }
    }
}

fn cell(row: &RawRow, column: &str) -> String {
    row.get(column).map(str::trim).unwrap_or_default().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract;
    use crate::parser::tests::{document, VALID_ROW};

    fn run(text: &str) -> Validation {
        let extraction = extract(text);
        validate(&extraction.rows, &extraction.errors, &ValidateOptions::default())
    }

    /// VALID_ROW with one cell replaced.
    fn row_with(column: usize, value: &str) -> String {
        let mut cells: Vec<&str> = VALID_ROW.split(',').collect();
        cells[column] = value;
        cells.join(",")
    }

    #[test]
    fn test_well_formed_document() {
        let text = document(&[VALID_ROW, VALID_ROW, VALID_ROW]);
        let validation = run(&text);

        assert!(validation.result.valid);
        assert_eq!(validation.result.error_count, 0);
        assert_eq!(validation.result.valid_row_count, 3);
        let ids: Vec<u32> = validation.venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_venue_values() {
        let row = row_with(9, " yes ");
        let validation = run(&document(&[&row]));
        let venue = &validation.venues[0];

        assert_eq!(venue.name, "Kaldi Bar");
        assert_eq!(venue.latitude, 64.1456);
        assert_eq!(venue.longitude, -21.929);
        assert_eq!(venue.cheapest_beer_price, 900);
        assert_eq!(venue.cheapest_wine_price, 1000);
        assert!(venue.two_for_one);
        assert_eq!(venue.description, None);
    }

    #[test]
    fn test_missing_email_cell() {
        let row = row_with(1, "");
        let validation = run(&document(&[&row]));

        assert!(!validation.result.valid);
        assert!(validation.venues.is_empty());
        assert_eq!(validation.result.errors.len(), 1);

        let err = &validation.result.errors[0];
        assert_eq!(err.code, ErrorCode::MissingRequired);
        assert_eq!(err.field.as_deref(), Some("Best Contact Email"));
        assert_eq!(err.value.as_deref(), Some(""));
        assert_eq!(err.line, 4);
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let row = row_with(2, "   ");
        let validation = run(&document(&[&row]));

        let missing: Vec<_> = validation
            .result
            .errors
            .iter()
            .filter(|e| e.code == ErrorCode::MissingRequired)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].field.as_deref(), Some("Street"));
    }

    #[test]
    fn test_missing_coordinate_reported_once() {
        let row = row_with(3, "");
        let validation = run(&document(&[&row]));

        assert_eq!(validation.result.errors.len(), 1);
        assert_eq!(validation.result.errors[0].code, ErrorCode::MissingRequired);
    }

    #[test]
    fn test_maybe_is_invalid_boolean() {
        let row = row_with(9, "Maybe");
        let validation = run(&document(&[&row]));

        assert_eq!(validation.result.errors.len(), 1);
        let err = &validation.result.errors[0];
        assert_eq!(err.code, ErrorCode::InvalidBoolean);
        assert_eq!(err.value.as_deref(), Some("Maybe"));
        assert!(validation.venues.is_empty());
    }

    #[test]
    fn test_coordinate_boundaries() {
        let ok = row_with(3, "90");
        let also_ok = row_with(3, "-90");
        let bad = row_with(3, "90.0001");
        let validation = run(&document(&[&ok, &also_ok, &bad]));

        assert_eq!(validation.venues.len(), 2);
        assert_eq!(validation.result.errors.len(), 1);
        let err = &validation.result.errors[0];
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
        assert_eq!(err.field.as_deref(), Some("Latitute"));
        assert_eq!(err.line, 6);
    }

    #[test]
    fn test_price_boundaries() {
        let free = row_with(7, "0");
        let negative = row_with(7, "-1");
        let fractional = row_with(8, "12.5");
        let validation = run(&document(&[&free, &negative, &fractional]));

        assert_eq!(validation.venues.len(), 1);
        assert_eq!(validation.venues[0].cheapest_beer_price, 0);

        let codes: Vec<_> = validation.result.errors.iter().map(|e| (e.line, e.code)).collect();
        assert_eq!(codes, vec![(5, ErrorCode::InvalidPrice), (6, ErrorCode::InvalidPrice)]);
        assert_eq!(validation.result.errors[1].field.as_deref(), Some("Price Of Cheapest Wine"));
    }

    #[test]
    fn test_errors_in_check_order() {
        let row = "Kaldi Bar,not-an-email,Laugavegur 20b,91,-181,Every day,4pm,-5,x,Maybe,Cash only,";
        let validation = run(&document(&[row]));

        let codes: Vec<ErrorCode> = validation.result.errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::InvalidEmail,
                ErrorCode::InvalidCoordinate,
                ErrorCode::InvalidCoordinate,
                ErrorCode::InvalidPrice,
                ErrorCode::InvalidPrice,
                ErrorCode::InvalidBoolean,
                ErrorCode::InvalidTimeFormat,
            ]
        );
        assert!(validation.result.errors.iter().all(|e| e.line == 4));
    }

    #[test]
    fn test_ids_skip_invalid_rows() {
        let bad = row_with(9, "Maybe");
        let validation = run(&document(&[VALID_ROW, &bad, VALID_ROW]));

        let ids: Vec<u32> = validation.venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(validation.result.valid_row_count, 2);
    }

    #[test]
    fn test_malformed_row_still_validated() {
        // 10 cells: Notes and Description are missing
        let row = "Kaldi Bar,kaldi@example.com,Laugavegur 20b,64.1456,-21.9290,Every day,16:00 - 19:00,900,1000,No";
        let validation = run(&document(&[row]));

        let errors = &validation.result.errors;
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, ErrorCode::ParseError);
        assert_eq!(errors[0].line, 4);
        assert_eq!(errors[0].field, None);
        assert_eq!(errors[0].value, None);
        assert_eq!(errors[0].message, "CSV parsing error: Row has 10 columns, expected 12");
        assert_eq!(errors[1].code, ErrorCode::MissingRequired);
        assert_eq!(errors[1].field.as_deref(), Some("Notes"));
        assert!(validation.venues.is_empty());
    }

    #[test]
    fn test_malformed_row_passing_checks_yields_venue() {
        // Only the optional description is missing
        let row = VALID_ROW.trim_end_matches(',');
        let validation = run(&document(&[row]));

        assert_eq!(validation.result.errors.len(), 1);
        assert_eq!(validation.result.errors[0].code, ErrorCode::ParseError);
        assert_eq!(validation.venues.len(), 1);
        assert!(!validation.result.valid);
    }

    #[test]
    fn test_extraction_errors_come_first() {
        let bad_quote = "\"Kaldi,x";
        let bad_bool = row_with(9, "Maybe");
        let validation = run(&document(&[&bad_bool, bad_quote]));

        let errors = &validation.result.errors;
        assert_eq!(errors[0].code, ErrorCode::ParseError);
        assert_eq!(errors[0].line, 5);
        assert!(errors[0].message.starts_with("CSV parsing error"));
        assert_eq!(errors[1].code, ErrorCode::InvalidBoolean);
        assert_eq!(errors[1].line, 4);
    }

    #[test]
    fn test_every_extraction_error_seeds_parse_error() {
        let short = "Kaldi Bar,kaldi@example.com,Laugavegur 20b,64.1456,-21.9290,Every day,16:00 - 19:00,900,1000,No";
        let unclosed = "\"Kaldi,x";
        let extraction = extract(&document(&[short, unclosed]));
        assert_eq!(extraction.errors.len(), 2);

        let validation = validate(&extraction.rows, &extraction.errors, &ValidateOptions::default());
        let seeded: Vec<(usize, ErrorCode)> = validation
            .result
            .errors
            .iter()
            .take(2)
            .map(|e| (e.line, e.code))
            .collect();

        assert_eq!(seeded, vec![(4, ErrorCode::ParseError), (5, ErrorCode::ParseError)]);
        assert!(validation.result.errors[..2].iter().all(|e| e.field.is_none() && e.value.is_none()));
        assert_eq!(validation.result.errors[2].code, ErrorCode::MissingRequired);
    }

    #[test]
    fn test_extraction_errors_can_be_excluded() {
        let extraction = extract(&document(&["\"broken", VALID_ROW]));
        let options = ValidateOptions {
            include_extraction_errors: false,
        };
        let validation = validate(&extraction.rows, &extraction.errors, &options);

        assert!(validation.result.valid);
        assert_eq!(validation.venues.len(), 1);
    }

    #[test]
    fn test_missing_header_column() {
        let text = "\nName of Bar/Restaurant,Street\n\nKaldi Bar,Laugavegur 20b\n";
        let validation = run(text);
        let errors = &validation.result.errors;

        let header_errors = errors
            .iter()
            .filter(|e| e.line == 2 && e.message.contains("Missing required header column"))
            .count();
        assert_eq!(header_errors, 9);
        assert!(errors.iter().take(header_errors).all(|e| e.code == ErrorCode::ParseError));

        let absent = errors
            .iter()
            .find(|e| e.code == ErrorCode::MissingRequired && e.field.as_deref() == Some("Latitute"))
            .unwrap();
        assert_eq!(absent.value, None);
        assert!(validation.venues.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let bad = row_with(4, "abc");
        let text = document(&[VALID_ROW, &bad, "\"oops", VALID_ROW]);
        let extraction = extract(&text);
        let options = ValidateOptions::default();

        let first = validate(&extraction.rows, &extraction.errors, &options);
        let second = validate(&extraction.rows, &extraction.errors, &options);

        assert_eq!(first.result.errors, second.result.errors);
        assert_eq!(first.result.valid_row_count, second.result.valid_row_count);
        assert_eq!(first.venues, second.venues);
    }

    #[test]
    fn test_non_ascii_passthrough() {
        let row = "Bjórgarðurinn - Íslensku Öl,bjor@example.is,Þórunnartún 1,64.1456,-21.9290,Alla daga,16:00 - 19:00,1100,1300,Yes,Engar athugasemdir,Ölstofa";
        let validation = run(&document(&[row]));

        assert!(validation.result.valid);
        let venue = &validation.venues[0];
        assert_eq!(venue.name, "Bjórgarðurinn - Íslensku Öl");
        assert_eq!(venue.street, "Þórunnartún 1");
        assert_eq!(venue.description.as_deref(), Some("Ölstofa"));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let validation = run(&document(&[]));
        assert!(validation.result.valid);
        assert!(validation.venues.is_empty());
        assert_eq!(validation.result.valid_row_count, 0);
    }
}
