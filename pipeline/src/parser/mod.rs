//! Row extraction for the fixed-layout venue spreadsheet.
//!
//! The spreadsheet export always has the same shape:
//!
//! ```text
//! line 1   (blank, reserved)
//! line 2   Name of Bar/Restaurant,Best Contact Email,...
//! line 3   (blank)
//! line 4+  data rows
//! ```
//!
//! Extraction is tolerant: a broken line produces an [`ExtractionError`] and
//! the next line is processed as usual, so one pass reports every problem in
//! the document. Nothing here knows about field rules; see
//! [`crate::validation`] for those.

use serde::{Serialize, Serializer};
use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::models::REQUIRED_COLUMNS;

/// 1-based line holding the column headers.
pub const HEADER_LINE: usize = 2;

// =============================================================================
// Types
// =============================================================================

/// One data row, keyed by header name in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    pub line_number: usize,
    #[serde(serialize_with = "serialize_fields")]
    pub fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(line_number: usize, fields: Vec<(String, String)>) -> Self {
        Self { line_number, fields }
    }

    /// Raw value of a column, or `None` if the header has no such column.
    ///
    /// With duplicated header names the rightmost column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// One key per column name, holding the value [`RawRow::get`] returns.
#[allow(clippy::ptr_arg)]
fn serialize_fields<S: Serializer>(fields: &Vec<(String, String)>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut entries: Vec<(&str, &str)> = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let (name, value) = (name.as_str(), value.as_str());
        match entries.iter().position(|(n, _)| *n == name) {
            Some(i) => entries[i].1 = value,
            None => entries.push((name, value)),
        }
    }
    serializer.collect_map(entries)
}

/// Class of an extraction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    /// Header row absent, empty, or lacking a required column.
    MissingHeader,
    /// Cell count differs from the header. The row is still extracted.
    MalformedRow,
    /// The line could not be tokenized. The row is dropped.
    Parse,
}

/// A line that could not be cleanly turned into a [`RawRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionError {
    pub line: usize,
    pub kind: ExtractionErrorKind,
    pub message: String,
}

impl ExtractionError {
    pub fn new(line: usize, kind: ExtractionErrorKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Output of [`extract`].
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Header cells exactly as written.
    pub columns: Vec<String>,
    /// Data rows in document order.
    pub rows: Vec<RawRow>,
    /// Extraction problems in document order.
    pub errors: Vec<ExtractionError>,
}

impl Extraction {
    fn rejected(error: ExtractionError) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            errors: vec![error],
        }
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Extract header and data rows from the spreadsheet text.
///
/// Never fails: document-level problems (empty text, no header) come back as
/// a single error with no rows.
///
/// # Example
/// ```ignore
/// use happyhour::extract;
///
/// let text = "\nName of Bar/Restaurant,Street\n\nKaldi,Laugavegur 20b\n";
/// let extraction = extract(text);
///
/// assert_eq!(extraction.rows[0].line_number, 4);
/// assert_eq!(extraction.rows[0].get("Street"), Some("Laugavegur 20b"));
/// ```
pub fn extract(text: &str) -> Extraction {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() == 1 && lines[0].trim().is_empty() {
        return Extraction::rejected(ExtractionError::new(
            1,
            ExtractionErrorKind::MissingHeader,
            "Empty CSV file",
        ));
    }
    if lines.len() < HEADER_LINE {
        return Extraction::rejected(ExtractionError::new(
            1,
            ExtractionErrorKind::MissingHeader,
            "CSV file must have at least a header row",
        ));
    }

    let columns = match split_cells(lines[HEADER_LINE - 1]) {
        Ok(cells) => cells,
        Err(msg) => {
            return Extraction::rejected(ExtractionError::new(
                HEADER_LINE,
                ExtractionErrorKind::Parse,
                format!("Failed to parse header row: {}", msg),
            ))
        }
    };
    if columns.is_empty() {
        return Extraction::rejected(ExtractionError::new(
            HEADER_LINE,
            ExtractionErrorKind::MissingHeader,
            "Header row is empty",
        ));
    }

    let mut errors: Vec<ExtractionError> = missing_headers(&columns)
        .into_iter()
        .map(|col| {
            ExtractionError::new(
                HEADER_LINE,
                ExtractionErrorKind::MissingHeader,
                format!("Missing required header column: \"{}\"", col),
            )
        })
        .collect();

    let mut rows = Vec::new();

    // Line 3 is reserved and normally blank; a non-blank line 3 is still
    // treated as data so it cannot vanish silently.
    for (idx, line) in lines.iter().enumerate().skip(HEADER_LINE) {
        let line_number = idx + 1;

        if is_blank(line) {
            continue;
        }

        let cells = match split_cells(line) {
            Ok(cells) => cells,
            Err(msg) => {
                errors.push(ExtractionError::new(
                    line_number,
                    ExtractionErrorKind::Parse,
                    format!("Could not read row: {}", msg),
                ));
                continue;
            }
        };

        if cells.len() != columns.len() {
            errors.push(ExtractionError::new(
                line_number,
                ExtractionErrorKind::MalformedRow,
                format!("Row has {} columns, expected {}", cells.len(), columns.len()),
            ));
        }

        let fields = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.clone(), cells.get(i).cloned().unwrap_or_default()))
            .collect();

        rows.push(RawRow::new(line_number, fields));
    }

    Extraction {
        columns,
        rows,
        errors,
    }
}

/// Required columns absent from `columns`, in canonical order.
pub fn missing_headers(columns: &[String]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|c| c == required))
        .collect()
}

/// A line is blank when every comma-separated cell is whitespace.
fn is_blank(line: &str) -> bool {
    line.split(',').all(|cell| cell.trim().is_empty())
}

/// Tokenize one line into cells (quoted fields, embedded commas, `""` escapes).
fn split_cells(line: &str) -> Result<Vec<String>, String> {
    // Escaped quotes come in pairs, so an odd count means an unclosed quote.
    if line.matches('"').count() % 2 != 0 {
        return Err("Quote not closed".to_string());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut records = reader.records();

    let cells = match records.next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(e)) => return Err(e.to_string()),
        None => Vec::new(),
    };

    if records.next().is_some() {
        return Err("Unexpected line break inside row".to_string());
    }

    Ok(cells)
}

// =============================================================================
// File Input
// =============================================================================

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading BOM is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // WHATWG treats latin-1 labels as windows-1252, a superset.
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Decode bytes, trusting valid UTF-8 and sniffing everything else.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return decode_content(bytes, "utf-8");
    }
    let encoding = detect_encoding(bytes);
    decode_content(bytes, &encoding)
}

/// Read the spreadsheet from disk as text.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> InputResult<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}
