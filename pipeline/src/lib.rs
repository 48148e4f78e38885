//! # Happy Hour - venue spreadsheet validation and site data generation
//!
//! Turns the maintainers' spreadsheet export into validated venue records,
//! a per-error report with fix hints, and static JSON for the site.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│ Validation  │────▶│ venues.json │
//! │  (ISO/UTF8) │     │ (line-tagged│     │ (rules +    │     │ errors/     │
//! │             │     │  raw rows)  │     │  venues)    │     │ index.html  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use happyhour::{extract, validate, ValidateOptions};
//!
//! let text = std::fs::read_to_string("bars.csv")?;
//! let extraction = extract(&text);
//! let validation = validate(&extraction.rows, &extraction.errors, &ValidateOptions::default());
//! println!("{} venues, {} errors", validation.venues.len(), validation.result.error_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Venues, error codes, validation results
//! - [`parser`] - Encoding detection and row extraction
//! - [`validation`] - Field rules and row validation
//! - [`transform`] - Venue building, CSV export, and pipeline
//! - [`report`] - JSON and HTML error reports
//! - [`output`] - Data files and static assets
//! - [`config`] - Environment configuration
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod output;
pub mod report;

// Runtime
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, InputError, OutputError, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ErrorCode, ValidationError, ValidationResult, Venue, VenueCollection};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    extract,
    read_csv_file,
    Extraction,
    ExtractionError,
    ExtractionErrorKind,
    RawRow,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{check_row, validate, ValidateOptions, Validation};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{generate, run_file, run_text, write_csv, GenerateSummary, PipelineOutcome};

// =============================================================================
// Re-exports - Reports and output
// =============================================================================

pub use config::Config;
pub use output::{copy_static, write_venues};
pub use report::{console_lines, fix_hint, render_html, render_json, write_error_report};
