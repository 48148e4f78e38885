//! Static data generation.
//!
//! Writes the files the site reads at runtime:
//!
//! ```text
//! <data_dir>/venues.json          all venues, sorted by id
//! <data_dir>/venues/<id>.json     one venue per file
//! ```
//!
//! and copies the static site assets next to them.

use std::fs;
use std::path::Path;

use crate::error::{OutputError, OutputResult};
use crate::models::{Venue, VenueCollection};

/// Create a directory and its parents.
pub fn ensure_dir(path: &Path) -> OutputResult<()> {
    fs::create_dir_all(path).map_err(|source| OutputError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a whole file, replacing any previous content.
pub fn write_file(path: &Path, content: &str) -> OutputResult<()> {
    fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the collection and per-venue JSON files. Returns the number written.
pub fn write_venues(venues: &[Venue], data_dir: &Path) -> OutputResult<usize> {
    let venues_dir = data_dir.join("venues");
    ensure_dir(&venues_dir)?;

    let collection = VenueCollection::new(venues.to_vec());
    write_file(
        &data_dir.join("venues.json"),
        &serde_json::to_string_pretty(&collection)?,
    )?;

    for venue in &collection.items {
        let path = venues_dir.join(format!("{}.json", venue.id));
        write_file(&path, &serde_json::to_string_pretty(venue)?)?;
    }

    Ok(collection.count)
}

/// Recursively copy `src` into `dest`. A missing `src` copies nothing.
///
/// Returns the number of files copied.
pub fn copy_static(src: &Path, dest: &Path) -> OutputResult<usize> {
    if !src.is_dir() {
        return Ok(0);
    }
    ensure_dir(dest)?;

    let copy_err = |source| OutputError::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(copy_err)? {
        let entry = entry.map_err(copy_err)?;
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if from.is_dir() {
            copied += copy_static(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|source| OutputError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(id: u32, name: &str) -> Venue {
        Venue {
            id,
            name: name.into(),
            email: "bar@example.com".into(),
            street: "Laugavegur 1".into(),
            latitude: 64.14,
            longitude: -21.93,
            happy_hour_days: "Mon-Fri".into(),
            happy_hour_times: "16:00 - 18:00".into(),
            cheapest_beer_price: 900,
            cheapest_wine_price: 1000,
            two_for_one: true,
            notes: String::new(),
            description: None,
        }
    }

    #[test]
    fn test_write_venues() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let count = write_venues(&[venue(2, "Second"), venue(1, "First")], &data_dir).unwrap();
        assert_eq!(count, 2);

        let content = fs::read_to_string(data_dir.join("venues.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["twoForOne"], true);
        assert!(json["generatedAt"].is_string());

        let single = fs::read_to_string(data_dir.join("venues").join("2.json")).unwrap();
        let parsed: Venue = serde_json::from_str(&single).unwrap();
        assert_eq!(parsed.name, "Second");
    }

    #[test]
    fn test_copy_static_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("static");
        fs::create_dir_all(src.join("css")).unwrap();
        fs::write(src.join("index.html"), "<html></html>").unwrap();
        fs::write(src.join("css").join("site.css"), "body {}").unwrap();

        let dest = dir.path().join("public");
        let copied = copy_static(&src, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("css").join("site.css")).unwrap(), "body {}");
    }

    #[test]
    fn test_copy_static_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let copied = copy_static(&dir.path().join("nope"), &dir.path().join("public")).unwrap();
        assert_eq!(copied, 0);
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn test_write_file_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_file(&dir.path().join("missing").join("a.json"), "{}").unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
    }
}
