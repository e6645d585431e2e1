//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing a
//! rendered chapter page and locating its structural anchors using CSS
//! selectors. The node tree is immutable once parsed; the translator and the
//! metadata extractor only ever read from it.
//!
//! # Example
//!
//! ```rust
//! use fictex_core::parse::Document;
//!
//! let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! ```

use scraper::{Html, Selector};

use crate::{FictexError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps a rendered chapter page and provides methods for querying
/// elements using CSS selectors. Each document is parsed fresh and discarded
/// after its extraction passes complete; no state carries across documents.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fictex_core::parse::Document;
    ///
    /// let html = "<html><body><div id=\"storytext\"><p>Once...</p></div></body></html>";
    /// let doc = Document::parse(html).unwrap();
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FictexError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FictexError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a structural anchor selector.
    ///
    /// # Errors
    ///
    /// Returns [`FictexError::MissingAnchor`] naming the selector when the
    /// page does not contain the anchor.
    pub fn require(&'_ self, selector: &'static str) -> Result<Element<'_>> {
        self.select(selector)?
            .into_iter()
            .next()
            .ok_or(FictexError::MissingAnchor(selector))
    }

    /// Gets the title of the document.
    ///
    /// Returns the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// Element represents a single node in the parsed tree and provides methods
/// for accessing its attributes, text content, and children.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    pub(crate) element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the outer HTML of this element.
    ///
    /// Returns the HTML content including this element's own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects child elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FictexError::HtmlParse`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel =
            Selector::parse(selector).map_err(|e| FictexError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}
