//! Row to [`Venue`] conversion.
//!
//! Only rows that passed every check reach this point, so the conversion
//! itself cannot fail.

use crate::models::Venue;

/// Typed cell values of a row that passed every check.
///
/// Strings are already trimmed and numbers already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedRow {
    pub name: String,
    pub email: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
    pub happy_hour_days: String,
    pub happy_hour_times: String,
    pub cheapest_beer_price: u64,
    pub cheapest_wine_price: u64,
    pub two_for_one: bool,
    pub notes: String,
    /// Trimmed description; empty when the cell was blank or absent.
    pub description: String,
}

impl CheckedRow {
    /// Assign the venue id. Ids follow validation order, not line numbers.
    pub fn into_venue(self, id: u32) -> Venue {
        Venue {
            id,
            name: self.name,
            email: self.email,
            street: self.street,
            latitude: self.latitude,
            longitude: self.longitude,
            happy_hour_days: self.happy_hour_days,
            happy_hour_times: self.happy_hour_times,
            cheapest_beer_price: self.cheapest_beer_price,
            cheapest_wine_price: self.cheapest_wine_price,
            two_for_one: self.two_for_one,
            notes: self.notes,
            description: Some(self.description).filter(|d| !d.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked(description: &str) -> CheckedRow {
        CheckedRow {
            name: "Kaldi Bar".into(),
            email: "kaldi@example.com".into(),
            street: "Laugavegur 20b".into(),
            latitude: 64.1456,
            longitude: -21.929,
            happy_hour_days: "Every day".into(),
            happy_hour_times: "16:00 - 19:00".into(),
            cheapest_beer_price: 900,
            cheapest_wine_price: 1000,
            two_for_one: true,
            notes: "Cash only".into(),
            description: description.into(),
        }
    }

    #[test]
    fn test_id_is_not_line_number() {
        let venue = checked("").into_venue(1);
        assert_eq!(venue.id, 1);
        assert_eq!(venue.name, "Kaldi Bar");
        assert!(venue.two_for_one);
    }

    #[test]
    fn test_empty_description_is_none() {
        assert_eq!(checked("").into_venue(1).description, None);
        assert_eq!(
            checked("Half price pints").into_venue(1).description.as_deref(),
            Some("Half price pints")
        );
    }
}
