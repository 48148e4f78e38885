//! Render venues back into the spreadsheet layout.
//!
//! The output has the same four-part shape the extractor reads (blank line,
//! header, blank line, rows), so an exported file can be fed straight back
//! through the pipeline.

use crate::error::{OutputError, OutputResult};
use crate::models::{Venue, CANONICAL_COLUMNS};

/// Serialize venues in id order under the canonical header.
pub fn write_csv(venues: &[Venue]) -> OutputResult<String> {
    let mut sorted: Vec<&Venue> = venues.iter().collect();
    sorted.sort_by_key(|v| v.id);

    let mut out = String::from("\n");
    out.push_str(&record_line(&CANONICAL_COLUMNS)?);
    out.push('\n');
    for venue in sorted {
        out.push_str(&record_line(&venue_cells(venue))?);
    }
    Ok(out)
}

/// Cells of one venue, in canonical column order.
pub fn venue_cells(venue: &Venue) -> Vec<String> {
    vec![
        venue.name.clone(),
        venue.email.clone(),
        venue.street.clone(),
        venue.latitude.to_string(),
        venue.longitude.to_string(),
        venue.happy_hour_days.clone(),
        venue.happy_hour_times.clone(),
        venue.cheapest_beer_price.to_string(),
        venue.cheapest_wine_price.to_string(),
        if venue.two_for_one { "Yes" } else { "No" }.to_string(),
        venue.notes.clone(),
        venue.description.clone().unwrap_or_default(),
    ]
}

/// One quoted-as-needed CSV line, newline terminated.
fn record_line<I, T>(cells: I) -> OutputResult<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(cells)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::CsvError(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
