//! CSV importer
//!
//! Header-driven: rows are matched to the `poi_id`, `poi_name`,
//! `poi_latitude`, `poi_longitude`, `poi_category`, `poi_ratings` column
//! contract by name, so column order does not matter. One row yields one
//! record; a missing column or malformed numeral skips that row only.

use super::{ImportError, ParseOutput, PoiRecord, RecordError, parse_decimal, ratings};
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

/// Importer for CSV content.
#[derive(Debug, Default)]
pub struct CsvImporter;

impl CsvImporter {
    /// Create a new CSV importer instance.
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV content into per-row record results.
    ///
    /// Content with no rows at all yields zero records with a logged
    /// warning. A failure to read the header row is fatal to the source;
    /// everything after that degrades per row.
    pub fn parse(&self, content: &str) -> ParseOutput {
        if content.trim().is_empty() {
            warn!("Empty CSV content");
            return Ok(Vec::new());
        }

        // Rows shorter than the header are a per-row problem, not a
        // structural one
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ImportError::Csv(e.to_string()))?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            match row {
                Ok(row) => records.push(record_from_row(&headers, &row)),
                Err(e) => records.push(Err(RecordError::MalformedRow(e.to_string()))),
            }
        }

        Ok(records)
    }
}

fn record_from_row(headers: &StringRecord, row: &StringRecord) -> Result<PoiRecord, RecordError> {
    let field = |name: &str| -> Result<&str, RecordError> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| row.get(idx))
            .ok_or_else(|| RecordError::MissingField(name.to_string()))
    };

    Ok(PoiRecord {
        external_id: field("poi_id")?.to_string(),
        name: field("poi_name")?.to_string(),
        latitude: parse_decimal("poi_latitude", field("poi_latitude")?)?,
        longitude: parse_decimal("poi_longitude", field("poi_longitude")?)?,
        category: field("poi_category")?.to_string(),
        ratings: ratings::normalize_str(field("poi_ratings")?),
        // CSV sources carry no description column
        description: String::new(),
    })
}
