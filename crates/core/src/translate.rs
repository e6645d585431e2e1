//! Recursive translation of story-text nodes into LaTeX markup.
//!
//! The dispatch table is intentionally closed: every element kind the site is
//! known to emit inside a story body has an explicit mapping, and anything
//! outside that set fails with [`FictexError::UnsupportedNode`]. Silent
//! pass-through of unknown markup would corrupt the typeset output in ways a
//! reader would only notice after final rendering; an explicit error at
//! conversion time is far cheaper to diagnose.
//!
//! Two walks share the same node model: [`translate`] emits LaTeX, and
//! [`plain_text`] ignores formatting to produce literal reading-order text
//! (used for mining the profile block).

use scraper::ElementRef;

use crate::join::join_fragments;
use crate::parse::Element;
use crate::{FictexError, Result};

/// The closed set of element kinds a chapter page is expected to contain.
///
/// Unrecognized tags map to [`ElementKind::Other`], which is a translation
/// error rather than a silent drop. Images and buttons are visually present
/// but textually void and translate to empty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Div,
    Paragraph,
    Span,
    Emphasis,
    Strong,
    Anchor,
    HorizontalRule,
    LineBreak,
    Image,
    Button,
    Select,
    OptionItem,
    Other,
}

impl ElementKind {
    /// Classifies a tag name.
    pub fn of(tag: &str) -> Self {
        match tag {
            "div" => Self::Div,
            "p" => Self::Paragraph,
            "span" => Self::Span,
            "em" | "i" => Self::Emphasis,
            "b" | "strong" => Self::Strong,
            "a" => Self::Anchor,
            "hr" => Self::HorizontalRule,
            "br" => Self::LineBreak,
            "img" => Self::Image,
            "button" => Self::Button,
            "select" => Self::Select,
            "option" => Self::OptionItem,
            _ => Self::Other,
        }
    }
}

/// The inline style declaration the translator renders as `\underline{}`.
const UNDERLINE_DECLARATION: &str = "text-decoration:underline;";

/// Translates a story-text element into LaTeX markup.
///
/// Output is a pure function of the node tree: no state carries across calls.
/// The result still contains raw LaTeX-significant characters; callers run it
/// through [`crate::postprocess::postprocess`] before writing.
///
/// # Errors
///
/// [`FictexError::UnsupportedNode`] for any element kind outside the dispatch
/// table, and [`FictexError::UnknownStyle`] for a `span` whose `style` is not
/// an underline declaration.
pub fn translate(element: &Element<'_>) -> Result<String> {
    translate_element(element.element)
}

fn translate_element(element: ElementRef<'_>) -> Result<String> {
    match ElementKind::of(element.value().name()) {
        ElementKind::Div => translate_children(element),
        ElementKind::Paragraph => Ok(format!("\n{}\n", translate_children(element)?)),
        ElementKind::Emphasis => Ok(format!("\\emph{{{}}}", translate_children(element)?)),
        ElementKind::Strong => Ok(format!("\\textbf{{{}}}", translate_children(element)?)),
        ElementKind::Span => match element.value().attr("style") {
            None => translate_children(element),
            Some(style) if style.contains(UNDERLINE_DECLARATION) => {
                Ok(format!("\\underline{{{}}}", translate_children(element)?))
            }
            Some(style) => Err(FictexError::UnknownStyle(style.to_string())),
        },
        ElementKind::HorizontalRule => Ok(String::new()),
        ElementKind::LineBreak => Ok("\\newline".to_string()),
        ElementKind::Image | ElementKind::Button => Ok(String::new()),
        ElementKind::Anchor
        | ElementKind::Select
        | ElementKind::OptionItem
        | ElementKind::Other => Err(unsupported(element)),
    }
}

fn translate_children(element: ElementRef<'_>) -> Result<String> {
    let mut fragments = Vec::new();

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            fragments.push(text.to_string());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            fragments.push(translate_element(child_element)?);
        }
        // Comments and other non-element nodes are invisible in rendered text.
    }

    Ok(join_fragments(fragments))
}

/// Extracts the literal reading-order text of an element, ignoring all
/// formatting.
///
/// Only invoked on profile-header subtrees with a known, narrow shape: text
/// nodes pass through unmodified, images and buttons vanish, and the
/// container kinds (`div`, `span`, `b`, `a`) recurse. Anything else is an
/// error rather than a guess.
pub fn plain_text(element: &Element<'_>) -> Result<String> {
    plain_text_element(element.element)
}

fn plain_text_element(element: ElementRef<'_>) -> Result<String> {
    match ElementKind::of(element.value().name()) {
        ElementKind::Image | ElementKind::Button => Ok(String::new()),
        ElementKind::Div | ElementKind::Span | ElementKind::Strong | ElementKind::Anchor => {
            plain_text_children(element)
        }
        _ => Err(unsupported(element)),
    }
}

fn plain_text_children(element: ElementRef<'_>) -> Result<String> {
    let mut fragments = Vec::new();

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            fragments.push(text.to_string());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            fragments.push(plain_text_element(child_element)?);
        }
    }

    Ok(join_fragments(fragments))
}

fn unsupported(element: ElementRef<'_>) -> FictexError {
    FictexError::UnsupportedNode {
        tag: element.value().name().to_string(),
        content: element.html(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    fn first<'a>(doc: &'a Document, selector: &str) -> Element<'a> {
        doc.select(selector).unwrap().into_iter().next().unwrap()
    }

    fn translate_html(html: &str, selector: &str) -> Result<String> {
        let doc = Document::parse(html).unwrap();
        let root = first(&doc, selector);
        translate(&root)
    }

    #[test]
    fn test_plain_paragraph() {
        let out = translate_html("<p>hello there</p>", "p").unwrap();
        assert_eq!(out, "\nhello there\n");
    }

    #[test]
    fn test_translation_is_stable_for_safe_text() {
        // A paragraph of plain text is wrapped in newlines and otherwise
        // unchanged; running the same document through again yields the
        // same output.
        let html = "<p>no special characters here</p>";
        let once = translate_html(html, "p").unwrap();
        let twice = translate_html(html, "p").unwrap();
        assert_eq!(once, "\nno special characters here\n");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_emphasis_variants() {
        assert_eq!(translate_html("<p><em>x</em></p>", "em").unwrap(), "\\emph{x}");
        assert_eq!(translate_html("<p><i>x</i></p>", "i").unwrap(), "\\emph{x}");
    }

    #[test]
    fn test_strong_variants() {
        assert_eq!(translate_html("<p><b>x</b></p>", "b").unwrap(), "\\textbf{x}");
        assert_eq!(
            translate_html("<p><strong>x</strong></p>", "strong").unwrap(),
            "\\textbf{x}"
        );
    }

    #[test]
    fn test_span_without_style_passes_through() {
        assert_eq!(translate_html("<p><span>x</span></p>", "span").unwrap(), "x");
    }

    #[test]
    fn test_span_with_underline_style() {
        let html = r#"<p><span style="text-decoration:underline;">x</span></p>"#;
        assert_eq!(translate_html(html, "span").unwrap(), "\\underline{x}");
    }

    #[test]
    fn test_span_with_unknown_style_fails() {
        let html = r#"<p><span style="color:red;">x</span></p>"#;
        let err = translate_html(html, "span").unwrap_err();
        assert!(matches!(err, FictexError::UnknownStyle(ref s) if s.as_str() == "color:red;"));
    }

    #[test]
    fn test_horizontal_rule_is_empty() {
        let out = translate_html("<div><p>a</p><hr><p>b</p></div>", "div").unwrap();
        assert_eq!(out, "\na\n\nb\n");
    }

    #[test]
    fn test_line_break() {
        let out = translate_html("<p>over <br> and out</p>", "p").unwrap();
        assert_eq!(out, "\nover \\newline and out\n");
    }

    #[test]
    fn test_image_and_button_are_suppressed() {
        let out = translate_html(r#"<p>a <img src="x.png"> b</p>"#, "p").unwrap();
        assert_eq!(out, "\na  b\n");

        let out = translate_html("<div><button>Fav</button><p>a</p></div>", "div").unwrap();
        assert_eq!(out, "\na\n");
    }

    #[test]
    fn test_unsupported_table_fails_with_tag_name() {
        let err = translate_html("<div><table><tr><td>x</td></tr></table></div>", "div").unwrap_err();
        match err {
            FictexError::UnsupportedNode { tag, content } => {
                assert_eq!(tag, "table");
                assert!(content.contains("<table"));
            }
            other => panic!("expected UnsupportedNode, got {:?}", other),
        }
    }

    #[test]
    fn test_anchor_in_story_text_fails() {
        let err = translate_html(r#"<p>see <a href="/x">this</a></p>"#, "p").unwrap_err();
        assert!(matches!(err, FictexError::UnsupportedNode { ref tag, .. } if tag.as_str() == "a"));
    }

    #[test]
    fn test_inline_siblings_do_not_fuse() {
        let out = translate_html("<p><em>hello</em><b>world</b></p>", "p").unwrap();
        assert_eq!(out, "\n\\emph{hello} \\textbf{world}\n");
    }

    #[test]
    fn test_plain_text_profile_block() {
        let html = concat!(
            r#"<div id="profile_top"><button>Follow/Fav</button><b>My Story</b>"#,
            "\n",
            r#"<span>By: <a href="/u/1/jane">Jane Doe</a></span>"#,
            "\n",
            r#"<div>A description.</div></div>"#,
        );
        let doc = Document::parse(html).unwrap();
        let profile = first(&doc, "div#profile_top");
        let text = plain_text(&profile).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["My Story", "By: Jane Doe", "A description."]);
    }

    #[test]
    fn test_plain_text_ignores_images() {
        let html = r#"<div><img src="cover.jpg">caption</div>"#;
        let doc = Document::parse(html).unwrap();
        let div = first(&doc, "div");
        assert_eq!(plain_text(&div).unwrap(), "caption");
    }

    #[test]
    fn test_plain_text_rejects_unexpected_kinds() {
        let html = "<div><p>paragraphs do not belong here</p></div>";
        let doc = Document::parse(html).unwrap();
        let div = first(&doc, "div");
        let err = plain_text(&div).unwrap_err();
        assert!(matches!(err, FictexError::UnsupportedNode { ref tag, .. } if tag.as_str() == "p"));
    }

    #[test]
    fn test_nested_inline_markup() {
        let out = translate_html("<p><b>bold <i>and italic</i></b></p>", "p").unwrap();
        assert_eq!(out, "\n\\textbf{bold \\emph{and italic}}\n");
    }

    #[test]
    fn test_element_kind_classification() {
        assert_eq!(ElementKind::of("em"), ElementKind::Emphasis);
        assert_eq!(ElementKind::of("i"), ElementKind::Emphasis);
        assert_eq!(ElementKind::of("strong"), ElementKind::Strong);
        assert_eq!(ElementKind::of("table"), ElementKind::Other);
        assert_eq!(ElementKind::of("select"), ElementKind::Select);
    }
}
