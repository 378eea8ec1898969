//! Import functionality
//!
//! Provides importers for ingesting Point of Interest records from various
//! source formats:
//! - CSV (header-driven, `poi_*` column contract)
//! - JSON (single object or array of objects, nested coordinates)
//! - XML (record containers `poi`/`point`/`item`/`DATA_RECORD`, root fallback)
//!
//! Each importer turns one source's full content into a sequence of
//! per-record results, so a malformed record degrades to a skip instead of
//! aborting the batch. Source resolution, remote fetch, reconciliation and
//! the orchestrating pipeline live in the submodules below.

pub mod csv;
pub mod fetch;
pub mod json;
pub mod pipeline;
pub mod ratings;
pub mod reconcile;
pub mod source;
pub mod xml;

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A normalized input record, the common output of every importer.
///
/// Carries exactly the fields a source may supply; store-managed fields
/// (surrogate key, timestamps) are absent by design.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiRecord {
    /// Natural key used for reconciliation across all formats and sources
    pub external_id: String,
    /// Name of the Point of Interest
    pub name: String,
    /// Latitude coordinate
    pub latitude: Decimal,
    /// Longitude coordinate
    pub longitude: Decimal,
    /// Category of the Point of Interest
    pub category: String,
    /// Normalized ratings, possibly empty
    #[serde(default)]
    pub ratings: Vec<f64>,
    /// Description; only the JSON format supplies one
    #[serde(default)]
    pub description: String,
}

impl PoiRecord {
    /// Overwrite every supplied field on a stored record.
    ///
    /// Store-managed fields are left untouched; the caller refreshes
    /// `updated_at`.
    pub fn apply_to(&self, poi: &mut crate::models::PointOfInterest) {
        poi.external_id = self.external_id.clone();
        poi.name = self.name.clone();
        poi.latitude = self.latitude;
        poi.longitude = self.longitude;
        poi.category = self.category.clone();
        poi.ratings = self.ratings.clone();
        poi.description = self.description.clone();
    }
}

/// Error that is fatal to one source.
///
/// The pipeline reports these and continues with the next source; they never
/// abort a run.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not determine file type for URL: {0}")]
    UnknownContentType(String),

    #[error("Failed to download from URL {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV content: {0}")]
    Csv(String),

    #[error("Invalid JSON content: {0}")]
    Json(String),
}

/// Error that is fatal to one record.
///
/// Counted as `skipped` by the pipeline; processing continues with the next
/// record in the same source.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Missing required field `{0}`")]
    MissingField(String),

    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Record is not an object")]
    NotAnObject,

    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

/// Outcome counters for one source, folded into a run total by the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceStats {
    /// Records created in the store
    pub imported: usize,
    /// Records skipped (existing id, record error, store failure)
    pub skipped: usize,
    /// Records updated in place
    pub updated: usize,
}

impl std::ops::AddAssign for SourceStats {
    fn add_assign(&mut self, other: Self) {
        self.imported += other.imported;
        self.skipped += other.skipped;
        self.updated += other.updated;
    }
}

impl fmt::Display for SourceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} imported, {} skipped, {} updated",
            self.imported, self.skipped, self.updated
        )
    }
}

/// Parse a textual numeral as a fixed-point decimal, reporting the offending
/// field and value on failure.
pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<Decimal, RecordError> {
    Decimal::from_str(value.trim()).map_err(|_| RecordError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// Re-export for convenience
pub use self::csv::CsvImporter;
pub use json::JsonImporter;
pub use pipeline::{ImportPipeline, ImportReport, SourceReport};
pub use xml::XmlImporter;

/// Per-record parse results for one source: an outer `Err` is fatal to the
/// source, an inner `Err` skips that record only.
pub type ParseOutput = Result<Vec<Result<PoiRecord, RecordError>>, ImportError>;
