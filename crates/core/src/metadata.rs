use regex::Regex;
use serde::Serialize;

use crate::parse::{Document, Element};
use crate::translate::plain_text;
use crate::{FictexError, Result};

/// CSS selectors for the structural anchors the extractor depends on.
const PROFILE_ANCHOR: &str = "div#profile_top";
const CHAPTER_SELECT_ANCHOR: &str = "select#chap_select";
const SELECTED_OPTION_ANCHOR: &str = "option[selected]";

/// Structured metadata recovered from a chapter page.
///
/// Derived fresh per page and never mutated after construction. The story
/// description is matched during extraction (to catch profile-layout drift
/// early) but not persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterMetadata {
    /// Numeric story id from the chapter selector's `onchange` URL.
    pub story_id: u64,
    /// URL slug following the story id.
    pub story_slug: String,
    /// Story title from the first profile line.
    pub story_title: String,
    /// Author name from the `By:` profile line.
    pub story_author: String,
    /// One-based chapter number from the selected option.
    pub chapter_number: u32,
    /// Chapter title from the selected option, still unescaped.
    pub chapter_title: String,
}

impl Document {
    /// Extracts [`ChapterMetadata`] from the page's profile block, chapter
    /// selector, and currently-selected option.
    ///
    /// Each step reports its own failure: a missing anchor names the
    /// selector, and a pattern that fails to match names the field and
    /// carries the raw source string, to aid diagnosis against future
    /// site-markup changes.
    pub fn extract_chapter_metadata(&self) -> Result<ChapterMetadata> {
        let profile = self.require(PROFILE_ANCHOR)?;
        let chapters = self.require(CHAPTER_SELECT_ANCHOR)?;
        let current_chapter = require_child(&chapters, SELECTED_OPTION_ANCHOR)?;

        let profile_text = plain_text(&profile)?;
        let story_title = profile_line(&profile_text, 0, r"^\s*(\S.*\S)\s*$", "story title")?;
        let story_author = profile_line(&profile_text, 1, r"^\s*By:\s+(\S.*\S)\s*$", "story author")?;
        // The description is not part of the output record, but its absence
        // means the profile layout changed under us.
        profile_line(&profile_text, 2, r"^\s*(\S.*\S)\s*$", "story description")?;

        let onchange = chapters.attr("onchange").ok_or_else(|| FictexError::MetadataMismatch {
            field: "onchange attribute",
            input: chapters.outer_html(),
        })?;
        let story_id = parse_story_id(onchange)?;
        let story_slug = capture(r"'/(\S+)';", onchange, "story slug")?;

        let option_text = current_chapter.text();
        let (chapter_number, chapter_title) = parse_current_chapter(&option_text)?;

        Ok(ChapterMetadata {
            story_id,
            story_slug,
            story_title,
            story_author,
            chapter_number,
            chapter_title,
        })
    }
}

/// Matches one display line of the profile text against a pattern, returning
/// the first capture.
fn profile_line(profile_text: &str, index: usize, pattern: &str, field: &'static str) -> Result<String> {
    let line = profile_text
        .lines()
        .nth(index)
        .ok_or_else(|| FictexError::MetadataMismatch { field, input: profile_text.to_string() })?;

    capture(pattern, line, field)
}

/// Extracts the numeric story id from a `/s/<digits>/` path segment.
fn parse_story_id(onchange: &str) -> Result<u64> {
    let raw = capture(r"'/s/(\d+)/'", onchange, "story id")?;
    let id: u64 = raw
        .parse()
        .map_err(|_| FictexError::MetadataMismatch { field: "story id", input: onchange.to_string() })?;

    if id == 0 {
        return Err(FictexError::MetadataMismatch { field: "story id", input: onchange.to_string() });
    }

    Ok(id)
}

/// Splits the selected option's literal text into chapter number and title.
fn parse_current_chapter(option_text: &str) -> Result<(u32, String)> {
    let mismatch = || FictexError::MetadataMismatch {
        field: "chapter number and title",
        input: option_text.to_string(),
    };

    let captures = Regex::new(r"^(\d+)\. (.+)")
        .unwrap()
        .captures(option_text)
        .ok_or_else(mismatch)?;

    let number: u32 = captures[1].parse().map_err(|_| mismatch())?;
    if number == 0 {
        return Err(mismatch());
    }

    Ok((number, captures[2].to_string()))
}

/// Runs a single-capture pattern against a source string, attributing the
/// failure to `field` when it does not match.
fn capture(pattern: &str, source: &str, field: &'static str) -> Result<String> {
    Regex::new(pattern)
        .unwrap()
        .captures(source)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| FictexError::MetadataMismatch { field, input: source.to_string() })
}

fn require_child<'a>(parent: &Element<'a>, selector: &'static str) -> Result<Element<'a>> {
    parent
        .select(selector)?
        .into_iter()
        .next()
        .ok_or(FictexError::MissingAnchor(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTER_PAGE: &str = concat!(
        r#"<!DOCTYPE html><html><head><title>My Story Chapter 3, a fanfic | FanFiction</title></head><body>"#,
        r#"<div id="profile_top"><button>Follow/Fav</button><b>My Story</b>"#,
        "\n",
        r#"<span>By: <a href="/u/99/jane-doe">Jane Doe</a></span>"#,
        "\n",
        r#"<div>A description.</div>"#,
        "\n",
        r#"<span>Rated: Fiction K - English - Chapters: 3</span></div>"#,
        r#"<select id="chap_select" onchange="self.location = '/s/12345/' + this.value + '/story-slug';">"#,
        r#"<option value="1">1. Beginnings</option>"#,
        r#"<option value="3" selected>3. The Reckoning</option>"#,
        r#"</select>"#,
        r#"<div id="storytext"><p>Words.</p></div>"#,
        r#"</body></html>"#,
    );

    #[test]
    fn test_extract_metadata_end_to_end() {
        let doc = Document::parse(CHAPTER_PAGE).unwrap();
        let metadata = doc.extract_chapter_metadata().unwrap();

        assert_eq!(
            metadata,
            ChapterMetadata {
                story_id: 12345,
                story_slug: "story-slug".to_string(),
                story_title: "My Story".to_string(),
                story_author: "Jane Doe".to_string(),
                chapter_number: 3,
                chapter_title: "The Reckoning".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_profile_anchor() {
        let doc = Document::parse("<html><body><p>nothing here</p></body></html>").unwrap();
        let result = doc.extract_chapter_metadata();
        assert!(matches!(result, Err(FictexError::MissingAnchor(PROFILE_ANCHOR))));
    }

    #[test]
    fn test_missing_selected_option() {
        let html = CHAPTER_PAGE.replace(" selected", "");
        let doc = Document::parse(&html).unwrap();
        let result = doc.extract_chapter_metadata();
        assert!(matches!(result, Err(FictexError::MissingAnchor(SELECTED_OPTION_ANCHOR))));
    }

    #[test]
    fn test_malformed_author_line() {
        let html = CHAPTER_PAGE.replace("By: ", "Written by ");
        let doc = Document::parse(&html).unwrap();
        let err = doc.extract_chapter_metadata().unwrap_err();

        match err {
            FictexError::MetadataMismatch { field, input } => {
                assert_eq!(field, "story author");
                assert!(input.contains("Written by"));
            }
            other => panic!("expected MetadataMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_onchange_without_story_id() {
        let html = CHAPTER_PAGE.replace("'/s/12345/'", "'/story/12345/'");
        let doc = Document::parse(&html).unwrap();
        let err = doc.extract_chapter_metadata().unwrap_err();

        assert!(matches!(err, FictexError::MetadataMismatch { field: "story id", .. }));
    }

    #[test]
    fn test_option_text_without_number() {
        let html = CHAPTER_PAGE.replace("3. The Reckoning", "The Reckoning");
        let doc = Document::parse(&html).unwrap();
        let err = doc.extract_chapter_metadata().unwrap_err();

        match err {
            FictexError::MetadataMismatch { field, input } => {
                assert_eq!(field, "chapter number and title");
                assert_eq!(input, "The Reckoning");
            }
            other => panic!("expected MetadataMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_story_id_is_rejected() {
        let html = CHAPTER_PAGE.replace("'/s/12345/'", "'/s/0/'");
        let doc = Document::parse(&html).unwrap();
        let err = doc.extract_chapter_metadata().unwrap_err();
        assert!(matches!(err, FictexError::MetadataMismatch { field: "story id", .. }));
    }

    #[test]
    fn test_profile_with_too_few_lines() {
        let html = CHAPTER_PAGE.replace("\n<div>A description.</div>\n", "");
        let doc = Document::parse(&html).unwrap();
        let err = doc.extract_chapter_metadata().unwrap_err();
        assert!(matches!(err, FictexError::MetadataMismatch { .. }));
    }

    #[test]
    fn test_chapter_title_keeps_raw_characters() {
        // Escaping is the normalizer's job, not the extractor's.
        let html = CHAPTER_PAGE.replace("3. The Reckoning", "3. Smoke &amp; Mirrors");
        let doc = Document::parse(&html).unwrap();
        let metadata = doc.extract_chapter_metadata().unwrap();
        assert_eq!(metadata.chapter_title, "Smoke & Mirrors");
    }
}
