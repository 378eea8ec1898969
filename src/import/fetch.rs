//! Remote source retrieval
//!
//! A bounded blocking GET. Timeout, transport failure, or a non-2xx status
//! is fatal to the source being fetched, never to the run.

use super::ImportError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::info;

/// Upper bound on the wait for one remote source.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Body and declared content type of a fetched source.
#[derive(Debug)]
pub struct FetchedContent {
    /// Response body as text
    pub body: String,
    /// Lowercased `Content-Type` header value, if the server sent one
    pub content_type: Option<String>,
}

/// Fetch a remote source with a bounded timeout.
///
/// A non-2xx response counts as a fetch failure.
pub fn fetch_url(url: &str) -> Result<FetchedContent, ImportError> {
    let download_error = |reason: String| ImportError::Download {
        url: url.to_string(),
        reason,
    };

    info!("Downloading data from: {}", url);

    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| download_error(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| download_error(e.to_string()))?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_ascii_lowercase());

    let body = response.text().map_err(|e| download_error(e.to_string()))?;

    Ok(FetchedContent { body, content_type })
}
