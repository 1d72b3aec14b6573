//! Retrieval of raw feed bytes for the command-line surface.
//!
//! A source identifier is either an http(s) URL or a local file path. URLs
//! are fetched with a request timeout and a response size cap; everything
//! else is read from disk. No retries — a failing source aborts the run.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while loading a feed source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the timeout
    #[error("request timed out")]
    Timeout,
    /// Response body exceeded the size limit
    #[error("response too large")]
    ResponseTooLarge,
    /// Local file could not be read
    #[error("failed to read feed file: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads the raw bytes of a feed source.
///
/// A source that parses as an http(s) URL is fetched over the network; any
/// other source is treated as a local file path.
///
/// # Errors
///
/// Network, HTTP status, timeout, and size-cap failures for URLs;
/// [`FetchError::Io`] for unreadable files.
pub async fn load_source(client: &reqwest::Client, source: &str) -> Result<Vec<u8>, FetchError> {
    match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            tracing::debug!(url = %url, "Fetching feed over HTTP");
            fetch_url(client, url).await
        }
        _ => {
            tracing::debug!(path = source, "Reading feed from disk");
            Ok(tokio::fs::read(Path::new(source)).await?)
        }
    }
}

async fn fetch_url(client: &reqwest::Client, url: Url) -> Result<Vec<u8>, FetchError> {
    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(url).send())
        .await
        .map_err(|_| FetchError::Timeout)?
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, MAX_FEED_SIZE).await
}

/// Reads a response body, failing once it grows past `limit`.
async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <item><guid>1</guid><title>Test</title></item>
</channel></rss>"#;

    #[tokio::test]
    async fn test_fetch_url_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(VALID_RSS)
                    .insert_header("Content-Type", "application/xml"),
            )
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let bytes = load_source(&client, &format!("{}/feed", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, VALID_RSS.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_url_404() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let err = load_source(&client, &format!("{}/feed", mock_server.uri()))
            .await
            .unwrap_err();
        match err {
            FetchError::HttpStatus(404) => {}
            e => panic!("Expected HttpStatus(404), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/feed", mock_server.uri()))
            .send()
            .await
            .unwrap();
        let err = read_limited_bytes(response, 16).await.unwrap_err();
        match err {
            FetchError::ResponseTooLarge => {}
            e => panic!("Expected ResponseTooLarge, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_local_file_is_read() {
        let path = std::env::temp_dir().join("atomwriter_fetch_test.xml");
        tokio::fs::write(&path, VALID_RSS).await.unwrap();

        let client = reqwest::Client::new();
        let bytes = load_source(&client, path.to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, VALID_RSS.as_bytes());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let client = reqwest::Client::new();
        let err = load_source(&client, "/no/such/feed.xml").await.unwrap_err();
        match err {
            FetchError::Io(_) => {}
            e => panic!("Expected Io, got {:?}", e),
        }
    }
}
