//! XML importer
//!
//! Streams the document once with `quick_xml`, collecting the text content
//! of the six `p*` child elements for every record container. Containers are
//! searched in preference order (`poi`, `point`, `item`, `DATA_RECORD`); the
//! first tag with any matches wins, and when none match the document root
//! itself is treated as a single record. A document that fails to parse as
//! XML at all degrades to zero records with a logged warning instead of
//! failing the source.

use super::{ParseOutput, PoiRecord, RecordError, parse_decimal, ratings};
use anyhow::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use tracing::warn;

/// Record container tags, in preference order.
const CONTAINER_TAGS: [&str; 4] = ["poi", "point", "item", "DATA_RECORD"];

/// Child elements holding record fields.
const FIELD_TAGS: [&str; 6] = [
    "pid",
    "pname",
    "platitude",
    "plongitude",
    "pcategory",
    "pratings",
];

/// Importer for XML content.
#[derive(Debug, Default)]
pub struct XmlImporter;

impl XmlImporter {
    /// Create a new XML importer instance.
    pub fn new() -> Self {
        Self
    }

    /// Parse XML content into per-element record results.
    ///
    /// Never fails at the source level: an unparsable document yields an
    /// empty result with a warning.
    pub fn parse(&self, content: &str) -> ParseOutput {
        match scan(content) {
            Ok(Some(records)) => Ok(records),
            Ok(None) => {
                warn!("XML parsing failed, no records recovered: no root element");
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("XML parsing failed, no records recovered: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

/// One streaming pass over the document.
///
/// Collects field text per container element, plus the fields found directly
/// under the root for the no-container fallback. `Ok(None)` means the
/// content held no element at all.
fn scan(content: &str) -> Result<Option<Vec<Result<PoiRecord, RecordError>>>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut saw_element = false;
    // (container tag, collected fields) while inside a record element
    let mut container: Option<(String, HashMap<String, String>)> = None;
    // (field tag, accumulated text) while inside a field element
    let mut field: Option<(String, String)> = None;
    // fields that are direct children of the document root
    let mut root_fields: HashMap<String, String> = HashMap::new();
    // every closed container, in document order
    let mut elements: Vec<(String, HashMap<String, String>)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                saw_element = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                // The root itself is never a container; it is only used as
                // the single-record fallback below
                if depth > 0 && container.is_none() && CONTAINER_TAGS.contains(&name.as_str()) {
                    container = Some((name, HashMap::new()));
                } else if FIELD_TAGS.contains(&name.as_str())
                    && (container.is_some() || depth == 1)
                {
                    field = Some((name, String::new()));
                }
                depth += 1;
            }
            Event::Empty(e) => {
                saw_element = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if depth > 0 && container.is_none() && CONTAINER_TAGS.contains(&name.as_str()) {
                    elements.push((name, HashMap::new()));
                } else if FIELD_TAGS.contains(&name.as_str()) {
                    if let Some((_, fields)) = container.as_mut() {
                        fields.insert(name, String::new());
                    } else if depth == 1 {
                        root_fields.insert(name, String::new());
                    }
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if let Ok(unescaped) = e.unescape() {
                        text.push_str(&unescaped);
                    }
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if let Ok(cdata) = String::from_utf8(e.to_vec()) {
                        text.push_str(&cdata);
                    }
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if field.as_ref().is_some_and(|(tag, _)| *tag == name) {
                    let (tag, text) = field.take().unwrap();
                    if let Some((_, fields)) = container.as_mut() {
                        fields.insert(tag, text);
                    } else if depth == 1 {
                        root_fields.insert(tag, text);
                    }
                } else if container.as_ref().is_some_and(|(tag, _)| *tag == name) {
                    elements.push(container.take().unwrap());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_element {
        return Ok(None);
    }

    // First candidate tag with any matches wins; otherwise fall back to the
    // root as a single record
    let selected = CONTAINER_TAGS
        .iter()
        .find_map(|cand| {
            let matched: Vec<_> = elements
                .iter()
                .filter(|(tag, _)| tag == cand)
                .map(|(_, fields)| fields.clone())
                .collect();
            if matched.is_empty() { None } else { Some(matched) }
        })
        .unwrap_or_else(|| vec![root_fields]);

    Ok(Some(selected.iter().map(record_from_element).collect()))
}

fn record_from_element(fields: &HashMap<String, String>) -> Result<PoiRecord, RecordError> {
    // An element that is present but empty reads the same as a missing one
    let text = |name: &str| -> Result<&String, RecordError> {
        fields
            .get(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RecordError::MissingField(name.to_string()))
    };

    // Ratings only need the element to exist; empty text is an empty list
    let ratings_raw = fields
        .get("pratings")
        .ok_or_else(|| RecordError::MissingField("pratings".to_string()))?;

    Ok(PoiRecord {
        external_id: text("pid")?.clone(),
        name: text("pname")?.clone(),
        latitude: parse_decimal("platitude", text("platitude")?)?,
        longitude: parse_decimal("plongitude", text("plongitude")?)?,
        category: text("pcategory")?.clone(),
        ratings: ratings::normalize_str(ratings_raw),
        // XML sources carry no description element
        description: String::new(),
    })
}
