//! Ratings normalization
//!
//! Sources disagree about what a ratings value looks like: JSON feeds carry
//! real arrays or bare numbers, CSV and XML carry text in JSON-array syntax
//! (`[1,2,3]`), brace-wrapped lists (`{1,2,3}`), or a single numeral. The
//! cascade below coerces all of them into an ordered `Vec<f64>`, with
//! graceful degradation to an empty list. It is total - it never fails.

use serde_json::Value;

/// Normalize a ratings value of any supported shape.
///
/// First match wins:
/// 1. already an array - numeric elements, in order;
/// 2. a string - see [`normalize_str`];
/// 3. a bare number - a single-element list;
/// 4. anything else - empty.
pub fn normalize(value: &Value) -> Vec<f64> {
    match value {
        Value::Array(items) => items.iter().filter_map(Value::as_f64).collect(),
        Value::String(s) => normalize_str(s),
        Value::Number(n) => n.as_f64().map(|v| vec![v]).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Normalize a textual ratings value.
///
/// Tries, in order: JSON-array syntax, a comma-separated list with one
/// optional surrounding brace pair stripped, a single bare numeral. Empty
/// pieces in the comma form are skipped; total failure yields an empty list.
pub fn normalize_str(raw: &str) -> Vec<f64> {
    if let Ok(values) = serde_json::from_str::<Vec<f64>>(raw) {
        return values;
    }

    let stripped = raw.trim().trim_start_matches('{').trim_end_matches('}');
    let pieces: Vec<&str> = stripped
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if !pieces.is_empty() {
        if let Ok(values) = pieces
            .iter()
            .map(|p| p.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
        {
            return values;
        }
    }

    if let Ok(single) = raw.trim().parse::<f64>() {
        return vec![single];
    }

    Vec::new()
}
