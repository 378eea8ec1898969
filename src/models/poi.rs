//! The reconciled Point of Interest entity.
//!
//! A `PointOfInterest` is only ever created by a successful import of a
//! previously unseen external id, and only ever mutated by a later import
//! run with the update policy enabled. `internal_id`, `created_at` and
//! `updated_at` are store-managed and never supplied by a source.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A named, located, categorized entity with zero or more numeric ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    /// Store-assigned surrogate key, immutable and unique
    pub internal_id: Uuid,
    /// Natural key supplied by the source file/feed, unique across all records
    pub external_id: String,
    /// Name of the Point of Interest
    pub name: String,
    /// Latitude coordinate (fixed-point, no float drift across re-imports)
    pub latitude: Decimal,
    /// Longitude coordinate
    pub longitude: Decimal,
    /// Category of the Point of Interest
    pub category: String,
    /// Ratings for this PoI, in source order
    #[serde(default)]
    pub ratings: Vec<f64>,
    /// Description, empty unless the source format supplies one
    #[serde(default)]
    pub description: String,
    /// Creation timestamp, set by the store
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp, refreshed by the store on every update
    pub updated_at: DateTime<Utc>,
}

impl PointOfInterest {
    /// Arithmetic mean of the ratings list.
    ///
    /// Returns `0.0` for an empty list or a non-finite result; never panics.
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let mean = self.ratings.iter().sum::<f64>() / self.ratings.len() as f64;
        if mean.is_finite() { mean } else { 0.0 }
    }
}

impl fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.external_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn poi_with_ratings(ratings: Vec<f64>) -> PointOfInterest {
        let now = Utc::now();
        PointOfInterest {
            internal_id: Uuid::new_v4(),
            external_id: "ext-1".to_string(),
            name: "Test Place".to_string(),
            latitude: Decimal::from_str("51.50722").unwrap(),
            longitude: Decimal::from_str("-0.12750").unwrap(),
            category: "landmark".to_string(),
            ratings,
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(poi_with_ratings(vec![1.0, 2.0, 3.0]).average_rating(), 2.0);
        assert_eq!(poi_with_ratings(vec![4.5]).average_rating(), 4.5);
    }

    #[test]
    fn test_average_rating_empty_is_zero() {
        assert_eq!(poi_with_ratings(Vec::new()).average_rating(), 0.0);
    }

    #[test]
    fn test_average_rating_non_finite_is_zero() {
        assert_eq!(poi_with_ratings(vec![f64::NAN, 2.0]).average_rating(), 0.0);
        assert_eq!(poi_with_ratings(vec![f64::INFINITY]).average_rating(), 0.0);
    }

    #[test]
    fn test_display_names_the_external_id() {
        let poi = poi_with_ratings(Vec::new());
        assert_eq!(poi.to_string(), "Test Place (ext-1)");
    }
}
