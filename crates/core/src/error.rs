//! Error types for fictex operations.
//!
//! This module defines the main error type [`FictexError`] which represents
//! all possible errors that can occur while fetching, parsing, translating,
//! and mining a chapter page.
//!
//! Every translation or extraction failure carries the raw source text that
//! was being matched, so a change in the site's markup shows up in the error
//! message instead of in corrupted LaTeX output.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chapter conversion operations.
///
/// All variants are page-level failures: the converter never attempts a
/// best-effort fallback, because silently emitting wrong markup is strictly
/// worse than stopping. The calling loop decides whether to abort the batch
/// or skip to the next URL.
#[derive(Error, Debug)]
pub enum FictexError {
    /// An element kind the translator does not know how to typeset.
    ///
    /// Carries the tag name and the node's outer HTML so unexpected site
    /// markup is surfaced rather than mistranslated.
    #[error("unsupported node <{tag}> in story text: {content}")]
    UnsupportedNode { tag: String, content: String },

    /// A `span` carried an inline style the translator does not recognize.
    ///
    /// Only `text-decoration:underline;` is known; anything else would be
    /// dropped silently if we passed it through.
    #[error("unknown span style: {0:?}")]
    UnknownStyle(String),

    /// A structural anchor (profile block, chapter selector, story text)
    /// was missing from the page.
    #[error("page anchor not found: {0}")]
    MissingAnchor(&'static str),

    /// A metadata pattern failed to match.
    ///
    /// Identifies which field could not be recovered and includes the raw
    /// source string that was being matched.
    #[error("could not recover {field} from {input:?}")]
    MetadataMismatch { field: &'static str, input: String },

    /// HTML parsing errors, typically an invalid CSS selector.
    #[error("failed to parse HTML: {0}")]
    HtmlParse(String),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    #[error("request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The fetched page never contained the ready marker.
    ///
    /// Chapter pages sit behind an interstitial until fully rendered; the
    /// fetcher retries with a fixed delay before giving up.
    #[error("page not ready after {attempts} attempts")]
    PageNotReady { attempts: u32 },

    /// Invalid URL provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Serialization errors from the metadata dump path.
    #[error("failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FictexError.
pub type Result<T> = std::result::Result<T, FictexError>;
