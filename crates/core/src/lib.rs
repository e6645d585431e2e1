pub mod chapter;
pub mod error;
pub mod fetch;
pub mod join;
pub mod latex;
pub mod metadata;
pub mod parse;
pub mod postprocess;
pub mod translate;

pub use chapter::{Chapter, convert};
pub use error::{FictexError, Result};
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::{fetch_story_page, fetch_url};
pub use join::join_fragments;
pub use latex::{
    chapter_file_name, closing_file_name, preamble_file_name, render_chapter, render_closing, render_preamble,
};
pub use metadata::ChapterMetadata;
pub use parse::{Document, Element};
pub use postprocess::{PostProcessConfig, cleanup_spacing, escape_latex, postprocess};
pub use translate::{ElementKind, plain_text, translate};
