//! LaTeX document boilerplate and output file naming.
//!
//! A converted story becomes a series of standalone `.tex` files that
//! concatenate into one `report`-class document: a preamble file
//! (`<id>-<slug>-00.tex`), one file per chapter (`<id>-<slug>-NN.tex`), and a
//! closing file (`<id>-<slug>-end.tex`). This module builds the file names
//! and contents; placement and idempotent writing belong to the caller.

use crate::chapter::Chapter;
use crate::metadata::ChapterMetadata;
use crate::postprocess::escape_latex;

/// File name for a single chapter: `<story_id>-<story_slug>-<NN>.tex`.
pub fn chapter_file_name(metadata: &ChapterMetadata) -> String {
    format!(
        "{}-{}-{:02}.tex",
        metadata.story_id, metadata.story_slug, metadata.chapter_number
    )
}

/// File name for the story's one-time preamble: `<story_id>-<story_slug>-00.tex`.
pub fn preamble_file_name(metadata: &ChapterMetadata) -> String {
    format!("{}-{}-00.tex", metadata.story_id, metadata.story_slug)
}

/// File name for the story's one-time closing: `<story_id>-<story_slug>-end.tex`.
pub fn closing_file_name(metadata: &ChapterMetadata) -> String {
    format!("{}-{}-end.tex", metadata.story_id, metadata.story_slug)
}

/// Renders a chapter file: `\chapter{<title>}` followed by the body.
pub fn render_chapter(chapter: &Chapter) -> String {
    format!("\\chapter{{{}}}\n\n{}\n", chapter.title, chapter.body)
}

/// Renders the document preamble with title/author and the fixed
/// `report`-class boilerplate.
///
/// Title and author come from the profile block unescaped, so the escaping
/// pass is applied here.
pub fn render_preamble(metadata: &ChapterMetadata) -> String {
    format!(
        concat!(
            "\\documentclass{{report}}\n",
            "\n",
            "\\usepackage[margin=1.5in, footskip=0.25in]{{geometry}}\n",
            "\n",
            "\\title{{{title}}}\n",
            "\\author{{{author}}}\n",
            "\n",
            "\\setlength{{\\parindent}}{{0em}}\n",
            "\\setlength{{\\parskip}}{{1em}}\n",
            "\n",
            "\\begin{{document}}\n",
            "\n",
            "\\maketitle\n",
            "\n",
        ),
        title = escape_latex(&metadata.story_title),
        author = escape_latex(&metadata.story_author),
    )
}

/// Renders the document closing.
pub fn render_closing() -> String {
    "\\end{document}\n".to_string()
}
