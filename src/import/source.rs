//! Source type resolution
//!
//! Decides which importer applies to a source identifier. Local paths
//! dispatch purely on file extension; remote URLs prefer the declared
//! content type and fall back to the URL's trailing extension.

use super::ImportError;
use std::path::Path;

/// The closed set of supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
    Xml,
}

impl SourceFormat {
    /// Whether a source identifier names a remote source.
    pub fn is_remote(source: &str) -> bool {
        source.starts_with("http://") || source.starts_with("https://")
    }

    /// Resolve the format of a local file from its extension.
    pub fn for_path(source: &str) -> Result<Self, ImportError> {
        let extension = Path::new(source)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            "xml" => Ok(SourceFormat::Xml),
            _ => Err(ImportError::UnsupportedFormat(source.to_string())),
        }
    }

    /// Resolve the format of a remote source from the response content type,
    /// falling back to the URL's trailing extension.
    pub fn for_remote(url: &str, content_type: Option<&str>) -> Result<Self, ImportError> {
        let content_type = content_type.unwrap_or("").to_lowercase();
        let url_lower = url.to_lowercase();

        if content_type.contains("csv") || url_lower.ends_with(".csv") {
            Ok(SourceFormat::Csv)
        } else if content_type.contains("json") || url_lower.ends_with(".json") {
            Ok(SourceFormat::Json)
        } else if content_type.contains("xml") || url_lower.ends_with(".xml") {
            Ok(SourceFormat::Xml)
        } else {
            Err(ImportError::UnknownContentType(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_extension_dispatch() {
        assert_eq!(SourceFormat::for_path("data/pois.csv").unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::for_path("pois.JSON").unwrap(), SourceFormat::Json);
        assert_eq!(SourceFormat::for_path("/tmp/feed.xml").unwrap(), SourceFormat::Xml);
    }

    #[test]
    fn test_unrecognized_extension_is_an_error() {
        assert!(matches!(
            SourceFormat::for_path("pois.txt"),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SourceFormat::for_path("pois"),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_remote_prefers_content_type() {
        let format =
            SourceFormat::for_remote("https://example.com/feed", Some("text/csv; charset=utf-8"))
                .unwrap();
        assert_eq!(format, SourceFormat::Csv);

        // Content type wins over a conflicting extension
        let format =
            SourceFormat::for_remote("https://example.com/feed.csv", Some("application/json"))
                .unwrap();
        assert_eq!(format, SourceFormat::Json);
    }

    #[test]
    fn test_remote_falls_back_to_url_extension() {
        let format = SourceFormat::for_remote("https://example.com/pois.xml", None).unwrap();
        assert_eq!(format, SourceFormat::Xml);

        let format =
            SourceFormat::for_remote("https://example.com/pois.json", Some("application/octet-stream"))
                .unwrap();
        assert_eq!(format, SourceFormat::Json);
    }

    #[test]
    fn test_undeterminable_remote_type_is_an_error() {
        assert!(matches!(
            SourceFormat::for_remote("https://example.com/feed", Some("text/plain")),
            Err(ImportError::UnknownContentType(_))
        ));
    }

    #[test]
    fn test_remote_detection() {
        assert!(SourceFormat::is_remote("http://example.com/pois.csv"));
        assert!(SourceFormat::is_remote("https://example.com/pois.csv"));
        assert!(!SourceFormat::is_remote("pois.csv"));
        assert!(!SourceFormat::is_remote("/data/httpdump/pois.csv"));
    }
}
