//! JSON importer
//!
//! Accepts either a single object or an array of objects. Coordinates are
//! nested under a `coordinates` object; the id may be a JSON string or
//! number; `description` is optional and defaults to empty. A missing
//! required key skips that item only.

use super::{ImportError, ParseOutput, PoiRecord, RecordError, ratings};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Importer for JSON content.
#[derive(Debug, Default)]
pub struct JsonImporter;

impl JsonImporter {
    /// Create a new JSON importer instance.
    pub fn new() -> Self {
        Self
    }

    /// Parse JSON content into per-item record results.
    ///
    /// Syntactically invalid JSON, or a top-level value that is neither an
    /// object nor an array, is fatal to the source.
    pub fn parse(&self, content: &str) -> ParseOutput {
        let data: Value =
            serde_json::from_str(content).map_err(|e| ImportError::Json(e.to_string()))?;

        let items = match data {
            Value::Object(_) => vec![data],
            Value::Array(items) => items,
            other => {
                return Err(ImportError::Json(format!(
                    "expected an object or an array of objects, got {}",
                    value_kind(&other)
                )));
            }
        };

        Ok(items.iter().map(record_from_item).collect())
    }
}

fn record_from_item(item: &Value) -> Result<PoiRecord, RecordError> {
    let obj = item.as_object().ok_or(RecordError::NotAnObject)?;

    let coordinates_value = required(obj, "coordinates")?;
    let coordinates = coordinates_value
        .as_object()
        .ok_or_else(|| RecordError::InvalidValue {
            field: "coordinates".to_string(),
            value: value_kind(coordinates_value).to_string(),
        })?;

    Ok(PoiRecord {
        external_id: text_field(obj, "id")?,
        name: text_field(obj, "name")?,
        latitude: decimal_field(coordinates, "coordinates.latitude", "latitude")?,
        longitude: decimal_field(coordinates, "coordinates.longitude", "longitude")?,
        category: text_field(obj, "category")?,
        ratings: ratings::normalize(required(obj, "ratings")?),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, RecordError> {
    obj.get(key)
        .ok_or_else(|| RecordError::MissingField(key.to_string()))
}

/// A required key whose value is a string, or a number stringified (feeds
/// disagree about whether ids are quoted).
fn text_field(obj: &Map<String, Value>, key: &str) -> Result<String, RecordError> {
    match required(obj, key)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(RecordError::InvalidValue {
            field: key.to_string(),
            value: value_kind(other).to_string(),
        }),
    }
}

/// A required coordinate, accepted as a JSON number or a numeric string.
fn decimal_field(
    obj: &Map<String, Value>,
    field: &str,
    key: &str,
) -> Result<Decimal, RecordError> {
    let value = obj
        .get(key)
        .ok_or_else(|| RecordError::MissingField(field.to_string()))?;

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => value_kind(other).to_string(),
    };

    Decimal::from_str(text.trim()).map_err(|_| RecordError::InvalidValue {
        field: field.to_string(),
        value: text,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
