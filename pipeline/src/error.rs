//! Error types for the happy hour pipeline.
//!
//! Row-level problems in the spreadsheet are never errors in the Rust sense:
//! they are collected as [`crate::models::ValidationError`] records. The
//! enums here only cover the infrastructure around the core:
//!
//! - [`InputError`] - Reading and decoding the CSV file
//! - [`OutputError`] - Writing data files and reports
//! - [`ConfigError`] - Invalid configuration
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while loading the CSV file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The CSV file does not exist.
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing generated files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create an output directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy a static asset.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors in the environment-driven configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable is set but empty.
    #[error("Environment variable {0} is set but empty")]
    Empty(String),

    /// Variable is not valid unicode.
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level orchestration errors.
///
/// This is the error type returned by the functions in [`crate::transform::pipeline`]
/// and printed by the CLI before exiting with status 1.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Output error.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
