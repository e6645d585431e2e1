//! Content fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving chapter HTML from various
//! sources: HTTP/HTTPS URLs, local files, and standard input. Chapter pages
//! sometimes sit behind an interstitial until fully rendered, so
//! [`fetch_story_page`] retries with a fixed delay until the page carries the
//! ready marker.

use std::fs;
use std::path::PathBuf;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{FictexError, Result};

/// HTTP client configuration for fetching chapter pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Text that must appear in a rendered chapter page.
    pub ready_marker: String,
    /// Maximum number of fetch attempts before giving up on a page.
    pub max_attempts: u32,
    /// Fixed delay between attempts, in seconds.
    pub retry_delay: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; fictex/0.1)".to_string(),
            ready_marker: "FanFiction".to_string(),
            max_attempts: 5,
            retry_delay: 5,
        }
    }
}

/// Fetches HTML content from a URL.
///
/// Performs an HTTP GET request and returns the response body as text. It
/// follows redirects, respects the configured timeout, and uses a
/// browser-like User-Agent for better compatibility.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| FictexError::InvalidUrl(e.to_string()))?;

    if parsed_url.scheme().is_empty() {
        return Err(FictexError::InvalidUrl(
            "URL must include a scheme (http:// or https://)".to_string(),
        ));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(FictexError::Http)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                FictexError::Timeout { timeout: config.timeout }
            } else {
                FictexError::Http(e)
            }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Fetches a chapter page, retrying until it looks fully rendered.
///
/// A bounded number of attempts with a fixed delay between them; a body that
/// does not contain the ready marker is treated as not yet rendered.
#[cfg(feature = "fetch")]
pub async fn fetch_story_page(url: &str, config: &FetchConfig) -> Result<String> {
    for attempt in 1..=config.max_attempts {
        let html = fetch_url(url, config).await?;

        if html.contains(&config.ready_marker) {
            return Ok(html);
        }

        if attempt < config.max_attempts {
            tokio::time::sleep(Duration::from_secs(config.retry_delay)).await;
        }
    }

    Err(FictexError::PageNotReady { attempts: config.max_attempts })
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(FictexError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(FictexError::from)
    }
}

/// Reads HTML content from standard input.
///
/// Reads all available input until EOF. Useful for piping saved pages from
/// other commands.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(FictexError::from)?;

    Ok(buffer)
}
