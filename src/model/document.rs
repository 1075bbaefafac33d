//! Document, page, and element types.

use super::Rect;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference canvas width of a spread in logical pixels.
pub const CANVAS_WIDTH: f32 = 1400.0;

/// Reference canvas height of a spread in logical pixels.
pub const CANVAS_HEIGHT: f32 = 900.0;

/// Kind of a positioned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A picture, sticker, or drawing
    Image,
    /// A text box
    Text,
    /// Anything else the editor can place (shapes, lines); ignored by analysis
    #[serde(other)]
    Other,
}

/// A positioned element on a page.
///
/// Missing coordinates deserialize as 0 so that partially saved documents
/// still analyze.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Editor-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Element kind
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,

    /// Page-local bounds
    #[serde(flatten)]
    pub bounds: Rect,

    /// Text content (text elements)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Image source reference (URL, blob key, data URI)
    #[serde(default, alias = "src", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Explicit caption set by the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Element {
    /// Create a text element.
    pub fn text(
        id: impl Into<String>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            kind: Some(ElementKind::Text),
            bounds: Rect::new(x, y, width, height),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Create an image element.
    pub fn image(id: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: Some(id.into()),
            kind: Some(ElementKind::Image),
            bounds: Rect::new(x, y, width, height),
            ..Default::default()
        }
    }

    /// Set the image source reference.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the alternative text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Sanitized bounds used by all geometric computations.
    pub fn rect(&self) -> Rect {
        self.bounds.sanitized()
    }

    /// Check if this element is an image.
    pub fn is_image(&self) -> bool {
        self.kind == Some(ElementKind::Image)
    }

    /// Check if this element is a text box.
    pub fn is_text(&self) -> bool {
        self.kind == Some(ElementKind::Text)
    }

    /// Text content, empty when absent.
    pub fn text_content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Explicit caption or alt text, whichever is set and non-blank first.
    pub fn label(&self) -> Option<&str> {
        [self.caption.as_deref(), self.alt.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// A single page of a zine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(default = "default_page_number")]
    pub number: u32,

    /// Page width in logical pixels
    #[serde(default = "default_width")]
    pub width: f32,

    /// Page height in logical pixels
    #[serde(default = "default_height")]
    pub height: f32,

    /// Elements in document (z) order
    #[serde(default)]
    pub elements: Vec<Element>,
}

fn default_page_number() -> u32 {
    1
}

fn default_width() -> f32 {
    CANVAS_WIDTH
}

fn default_height() -> f32 {
    CANVAS_HEIGHT
}

impl Page {
    /// Create an empty page on the reference canvas.
    pub fn new(number: u32) -> Self {
        Self::with_size(number, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Create an empty page with explicit dimensions.
    pub fn with_size(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Add an element to the page.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Builder-style variant of [`Page::add_element`].
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over image elements.
    pub fn images(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_image())
    }

    /// Iterate over text elements.
    pub fn text_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_text())
    }

    /// Page dimensions with non-positive or non-finite values replaced by the canvas size.
    pub fn dimensions(&self) -> (f32, f32) {
        let w = if self.width.is_finite() && self.width > 0.0 {
            self.width
        } else {
            CANVAS_WIDTH
        };
        let h = if self.height.is_finite() && self.height > 0.0 {
            self.height
        } else {
            CANVAS_HEIGHT
        };
        (w, h)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// BCP-47 language tag of the content, passed to the prose generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Last time the persistence layer saved the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A zine document: ordered pages of ordered elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages in reading order
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of elements across all pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(1);
        assert_eq!(page.number, 1);
        assert_eq!(page.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert!(page.is_empty());
    }

    #[test]
    fn test_element_kinds() {
        let img = Element::image("img1", 0.0, 0.0, 10.0, 10.0);
        assert!(img.is_image());
        assert!(!img.is_text());

        let txt = Element::text("t1", 0.0, 0.0, 10.0, 10.0, "hi");
        assert!(txt.is_text());
        assert_eq!(txt.text_content(), "hi");
    }

    #[test]
    fn test_element_label_prefers_caption() {
        let img = Element::image("img", 0.0, 0.0, 1.0, 1.0)
            .with_alt("alt text")
            .with_caption("  ");
        assert_eq!(img.label(), Some("alt text"));

        let img = img.with_caption("A cat");
        assert_eq!(img.label(), Some("A cat"));
    }

    #[test]
    fn test_missing_coordinates_default_to_zero() {
        let json = r#"{"pages":[{"elements":[{"id":"a","type":"text","content":"hi","width":30}]}]}"#;
        let doc = Document::from_json(json).unwrap();
        let el = &doc.pages[0].elements[0];
        assert_eq!(el.bounds, Rect::new(0.0, 0.0, 30.0, 0.0));
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[0].width, CANVAS_WIDTH);
    }

    #[test]
    fn test_unknown_kind_is_other() {
        let json = r#"{"pages":[{"elements":[{"kind":"shape","x":1,"y":2,"width":3,"height":4}]}]}"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.pages[0].elements[0].kind, Some(ElementKind::Other));
    }

    #[test]
    fn test_get_page() {
        let mut doc = Document::new();
        doc.add_page(Page::new(1));
        doc.add_page(Page::new(2));
        assert!(doc.get_page(0).is_none());
        assert_eq!(doc.get_page(2).map(|p| p.number), Some(2));
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_invalid_page_size_falls_back_to_canvas() {
        let page = Page::with_size(1, -5.0, f32::NAN);
        assert_eq!(page.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }
}
