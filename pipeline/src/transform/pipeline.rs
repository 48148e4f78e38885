//! High-level pipeline API.
//!
//! Combines every stage into two calls: [`run_file`] reads, extracts and
//! validates; [`generate`] writes the report, data files and static assets.
//!
//! # Example
//!
//! ```rust,ignore
//! use happyhour::config::Config;
//! use happyhour::transform::{generate, run_file};
//! use happyhour::validation::ValidateOptions;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let outcome = run_file(&config.csv_path, &ValidateOptions::default())?;
//!     generate(&outcome, &config)?;
//!     println!("{} venues", outcome.venues.len());
//!     Ok(())
//! }
//! ```

use std::path::Path;

use crate::config::Config;
use crate::error::{OutputResult, PipelineResult};
use crate::logs::{log_error, log_info, log_success, log_warning, log_warning_indent};
use crate::models::{ValidationResult, Venue};
use crate::output::{copy_static, write_venues};
use crate::parser::{extract, read_csv_file};
use crate::report::write_error_report;
use crate::validation::{validate, ValidateOptions};

/// Result of extracting and validating one CSV document.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Header names as found on the header line.
    pub columns: Vec<String>,
    /// Data rows the extractor produced.
    pub row_count: usize,
    pub result: ValidationResult,
    /// Venues in id order.
    pub venues: Vec<Venue>,
}

impl PipelineOutcome {
    pub fn is_valid(&self) -> bool {
        self.result.valid
    }
}

/// What [`generate`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub venues_written: usize,
    pub static_files: usize,
}

/// Read a CSV file from disk and validate it.
pub fn run_file(path: &Path, options: &ValidateOptions) -> PipelineResult<PipelineOutcome> {
    log_info(format!("📖 Reading {}...", path.display()));
    let text = read_csv_file(path)?;
    Ok(run_text(&text, options))
}

/// Extract and validate already-decoded CSV text.
pub fn run_text(text: &str, options: &ValidateOptions) -> PipelineOutcome {
    let extraction = extract(text);
    log_success(format!(
        "Read {} rows across {} columns",
        extraction.rows.len(),
        extraction.columns.len()
    ));
    if !extraction.errors.is_empty() {
        log_warning(format!("{} line(s) could not be extracted", extraction.errors.len()));
        for err in extraction.errors.iter().take(3) {
            log_warning_indent(err.to_string(), 1);
        }
    }

    log_info("✔️  Validating rows...");
    let validation = validate(&extraction.rows, &extraction.errors, options);
    let result = validation.result;
    if result.valid {
        log_success(format!("All {} venues valid", result.valid_row_count));
    } else {
        log_warning(format!(
            "{} error(s), {} valid venue(s)",
            result.error_count, result.valid_row_count
        ));
    }

    PipelineOutcome {
        columns: extraction.columns,
        row_count: extraction.rows.len(),
        result,
        venues: validation.venues,
    }
}

/// Write the error report, the venue data and the static assets.
///
/// The report is always written. Venue data is only written when at least
/// one venue passed validation, so a broken sheet never empties the site.
pub fn generate(outcome: &PipelineOutcome, config: &Config) -> PipelineResult<GenerateSummary> {
    let errors_dir = config.errors_dir();
    log_info("📝 Writing error report...");
    logged(write_error_report(&outcome.result, &errors_dir), "write error report")?;
    log_success(format!("Report written to {}", errors_dir.display()));

    let venues_written = if outcome.venues.is_empty() {
        log_warning("No valid venues, skipping data files");
        0
    } else {
        let data_dir = config.data_dir();
        let count = logged(write_venues(&outcome.venues, &data_dir), "write venue data")?;
        log_success(format!("Wrote {} venues to {}", count, data_dir.display()));
        count
    };

    let static_files = logged(copy_static(&config.static_dir, &config.output_dir), "copy static files")?;
    if static_files > 0 {
        log_success(format!("Copied {} static file(s)", static_files));
    }

    Ok(GenerateSummary {
        venues_written,
        static_files,
    })
}

/// Log a failed output step before handing the error back.
fn logged<T>(result: OutputResult<T>, step: &str) -> OutputResult<T> {
    if let Err(e) = &result {
        log_error(format!("Could not {}: {}", step, e));
    }
    result
}
