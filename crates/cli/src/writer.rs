//! Output file placement for converted chapters.
//!
//! A story's files share the `<story_id>-<story_slug>` prefix: the chapter
//! file is overwritten on every run, while the preamble (`-00.tex`) and
//! closing (`-end.tex`) wrapper files are written only if absent, so a
//! partially-converted story can be resumed without clobbering anything.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fictex_core::{
    Chapter, ChapterMetadata, chapter_file_name, closing_file_name, preamble_file_name, render_chapter,
    render_closing, render_preamble,
};

/// Writes the chapter file, returning its path.
pub fn write_chapter(dir: &Path, chapter: &Chapter) -> Result<PathBuf> {
    let path = dir.join(chapter_file_name(&chapter.metadata));

    fs::write(&path, render_chapter(chapter)).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// Writes the story's preamble and closing files, each only if not already
/// present. Returns the paths that were actually written.
pub fn write_story_wrapper(dir: &Path, metadata: &ChapterMetadata) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    let preamble_path = dir.join(preamble_file_name(metadata));
    if !preamble_path.exists() {
        fs::write(&preamble_path, render_preamble(metadata))
            .with_context(|| format!("Failed to write {}", preamble_path.display()))?;
        written.push(preamble_path);
    }

    let closing_path = dir.join(closing_file_name(metadata));
    if !closing_path.exists() {
        fs::write(&closing_path, render_closing())
            .with_context(|| format!("Failed to write {}", closing_path.display()))?;
        written.push(closing_path);
    }

    Ok(written)
}
