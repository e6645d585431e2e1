//! Chapter output type combining metadata with translated content.
//!
//! This module defines the [`Chapter`] struct which represents the complete
//! result of converting one page: the metadata record, the normalized chapter
//! title, and the normalized LaTeX body.

use serde::Serialize;

use crate::metadata::ChapterMetadata;
use crate::parse::Document;
use crate::postprocess::{PostProcessConfig, postprocess};
use crate::translate::translate;
use crate::Result;

/// CSS selector for the story body block.
const STORY_TEXT_ANCHOR: &str = "div#storytext";

/// The complete result of converting one chapter page.
///
/// Title and body are fully translated and normalized; the caller can hand
/// them straight to the file-writing layer.
#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    /// Structured metadata recovered from the page.
    pub metadata: ChapterMetadata,

    /// Chapter title, escaped (and cleaned up when enabled).
    pub title: String,

    /// Translated LaTeX chapter body, escaped (and cleaned up when enabled).
    pub body: String,
}

impl Chapter {
    /// Converts a parsed chapter page.
    ///
    /// Runs the metadata extractor and the markup translator independently
    /// over the same tree, then post-processes both the chapter title and the
    /// body with the same configuration.
    pub fn from_document(doc: &Document, config: &PostProcessConfig) -> Result<Self> {
        let metadata = doc.extract_chapter_metadata()?;
        let story_text = doc.require(STORY_TEXT_ANCHOR)?;

        let body = postprocess(&translate(&story_text)?, config);
        let title = postprocess(&metadata.chapter_title, config);

        Ok(Self { metadata, title, body })
    }

    /// File stem shared by this chapter's output file:
    /// `<story_id>-<story_slug>-<chapter_number, two digits>`.
    pub fn file_stem(&self) -> String {
        format!(
            "{}-{}-{:02}",
            self.metadata.story_id, self.metadata.story_slug, self.metadata.chapter_number
        )
    }

    /// Gets the metadata record as structured JSON.
    pub fn metadata_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(&self.metadata).map_err(crate::FictexError::from)
    }
}

/// Converts a chapter page from raw HTML in one call.
///
/// Convenience wrapper over [`Document::parse`] and
/// [`Chapter::from_document`].
pub fn convert(html: &str, config: &PostProcessConfig) -> Result<Chapter> {
    let doc = Document::parse(html)?;
    Chapter::from_document(&doc, config)
}
