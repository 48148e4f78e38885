//! Transformation module.
//!
//! This module handles everything after validation:
//! - Venue: Checked rows to venues
//! - Export: Venues back to the spreadsheet layout
//! - Pipeline: Read, extract, validate, and write in one call

pub mod export;
pub mod pipeline;
pub mod venue;

pub use export::write_csv;
pub use pipeline::*;
pub use venue::CheckedRow;
