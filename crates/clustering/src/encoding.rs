//! One-hot encoding of listing locations.
//!
//! Each distinct location string becomes its own binary feature. Columns are
//! ordered by first appearance in the catalog, so encoding the same catalog
//! twice gives the same matrix.

use data_loader::Listing;
use ndarray::Array2;
use std::collections::HashMap;

/// Maps each distinct location to a feature column.
#[derive(Debug, Clone, Default)]
pub struct LocationEncoder {
    columns: HashMap<String, usize>,
    locations: Vec<String>,
}

impl LocationEncoder {
    /// Learn the location vocabulary of a catalog.
    pub fn fit(listings: &[Listing]) -> Self {
        let mut encoder = Self::default();
        for listing in listings {
            if !encoder.columns.contains_key(&listing.location) {
                encoder
                    .columns
                    .insert(listing.location.clone(), encoder.locations.len());
                encoder.locations.push(listing.location.clone());
            }
        }
        encoder
    }

    /// Number of feature columns (distinct locations).
    pub fn dimension(&self) -> usize {
        self.locations.len()
    }

    /// Distinct locations in column order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Column of a location, if it was seen during `fit`.
    pub fn column(&self, location: &str) -> Option<usize> {
        self.columns.get(location).copied()
    }

    /// One row per listing; unseen locations encode as all zeros.
    pub fn transform(&self, listings: &[Listing]) -> Array2<f64> {
        let mut features = Array2::zeros((listings.len(), self.dimension()));
        for (row, listing) in listings.iter().enumerate() {
            if let Some(col) = self.column(&listing.location) {
                features[[row, col]] = 1.0;
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RecordId;
    use ndarray::array;

    fn listing(id: &str, location: &str) -> Listing {
        Listing {
            id: RecordId::new(id),
            location: location.to_string(),
            title: String::new(),
            price: 0.0,
            image_url: String::new(),
        }
    }

    #[test]
    fn test_columns_follow_first_appearance() {
        let listings = vec![
            listing("a", "Malibu"),
            listing("b", "Aspen"),
            listing("c", "Malibu"),
            listing("d", ""),
        ];
        let encoder = LocationEncoder::fit(&listings);

        assert_eq!(encoder.dimension(), 3);
        assert_eq!(encoder.locations(), &["Malibu", "Aspen", ""]);
        assert_eq!(encoder.column("Aspen"), Some(1));
    }

    #[test]
    fn test_transform_is_one_hot() {
        let listings = vec![listing("a", "Malibu"), listing("b", "Aspen"), listing("c", "Malibu")];
        let encoder = LocationEncoder::fit(&listings);
        let rows = encoder.transform(&listings);

        assert_eq!(rows, array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        for row in rows.rows() {
            assert_eq!(row.sum(), 1.0);
        }
    }

    #[test]
    fn test_unseen_location_is_zero_row() {
        let encoder = LocationEncoder::fit(&[listing("a", "Malibu")]);
        let rows = encoder.transform(&[listing("z", "Tokyo")]);
        assert_eq!(rows, array![[0.0]]);
    }
}
