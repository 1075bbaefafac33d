//! Narrative transcript assembly.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::reading_order::reading_order;
use super::TranscriptOptions;
use crate::layout::{trim_invisible, LayoutAnalyzer};
use crate::model::{Document, Element, ImageTextPair, Page, PageLayout};

/// Coarse position of an image center, by thirds of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionLabel {
    /// Upper third, left column
    TopLeft,
    /// Upper third, middle column
    TopCenter,
    /// Upper third, right column
    TopRight,
    /// Middle third, left column
    MiddleLeft,
    /// Middle of the page
    Center,
    /// Middle third, right column
    MiddleRight,
    /// Lower third, left column
    BottomLeft,
    /// Lower third, middle column
    BottomCenter,
    /// Lower third, right column
    BottomRight,
}

impl PositionLabel {
    /// Label for a point on a page of the given size.
    pub fn from_point(x: f32, y: f32, page_width: f32, page_height: f32) -> Self {
        let col = third(x, page_width);
        let row = third(y, page_height);
        match (row, col) {
            (0, 0) => PositionLabel::TopLeft,
            (0, 1) => PositionLabel::TopCenter,
            (0, _) => PositionLabel::TopRight,
            (1, 0) => PositionLabel::MiddleLeft,
            (1, 1) => PositionLabel::Center,
            (1, _) => PositionLabel::MiddleRight,
            (_, 0) => PositionLabel::BottomLeft,
            (_, 1) => PositionLabel::BottomCenter,
            _ => PositionLabel::BottomRight,
        }
    }

    /// Label for an element's center on a page.
    pub fn for_element(element: &Element, page: &Page) -> Self {
        let (cx, cy) = element.rect().center();
        let (w, h) = page.dimensions();
        Self::from_point(cx, cy, w, h)
    }

    /// Kebab-case name used in transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionLabel::TopLeft => "top-left",
            PositionLabel::TopCenter => "top-center",
            PositionLabel::TopRight => "top-right",
            PositionLabel::MiddleLeft => "middle-left",
            PositionLabel::Center => "center",
            PositionLabel::MiddleRight => "middle-right",
            PositionLabel::BottomLeft => "bottom-left",
            PositionLabel::BottomCenter => "bottom-center",
            PositionLabel::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn third(value: f32, extent: f32) -> u8 {
    let ratio = value / extent;
    if ratio < 1.0 / 3.0 {
        0
    } else if ratio < 2.0 / 3.0 {
        1
    } else {
        2
    }
}

/// One emitted unit of a page transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptBlock {
    /// Verbatim text content
    Text {
        /// Source element id
        id: Option<String>,
        /// Trimmed content
        content: String,
    },
    /// Synthesized image description
    Image {
        /// Source element id
        id: Option<String>,
        /// Coarse position on the page
        position: PositionLabel,
        /// Caption, alt text, or nearby-text summary
        description: String,
    },
}

impl fmt::Display for TranscriptBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptBlock::Text { content, .. } => f.write_str(content),
            TranscriptBlock::Image {
                position,
                description,
                ..
            } => write!(f, "[Image at {}] {}", position, description),
        }
    }
}

/// Transcript of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTranscript {
    /// Page number (1-indexed)
    pub number: u32,
    /// Blocks in reading order
    pub blocks: Vec<TranscriptBlock>,
}

/// Image handed to the generation collaborator alongside the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Page number (1-indexed)
    pub page: u32,
    /// Source element id
    pub id: Option<String>,
    /// Image source reference
    pub source: Option<String>,
    /// Explicit caption or alt text
    pub caption: Option<String>,
    /// Coarse position on the page
    pub position: PositionLabel,
    /// Same description emitted in the transcript
    pub description: String,
}

/// Flattened textual representation of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Non-empty pages in document order
    pub pages: Vec<PageTranscript>,
    /// Images in transcript order
    pub images: Vec<ImagePayload>,
    /// Emit `[Page N]` header lines when flattening
    #[serde(skip)]
    page_headers: bool,
}

impl Transcript {
    /// Check if no page contributed any content.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Flatten to a single string.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut lines: Vec<String> = Vec::with_capacity(page.blocks.len() + 1);
                if self.page_headers {
                    lines.push(format!("[Page {}]", page.number));
                }
                lines.extend(page.blocks.iter().map(|b| b.to_string()));
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Builds transcripts from documents.
#[derive(Debug, Clone, Default)]
pub struct TranscriptAssembler {
    options: TranscriptOptions,
    analyzer: LayoutAnalyzer,
}

impl TranscriptAssembler {
    /// Create a new assembler.
    pub fn new(options: TranscriptOptions) -> Self {
        let analyzer = LayoutAnalyzer::new(options.layout.clone());
        Self { options, analyzer }
    }

    /// Get the options in use.
    pub fn options(&self) -> &TranscriptOptions {
        &self.options
    }

    /// Build the transcript of a whole document.
    pub fn assemble(&self, doc: &Document) -> Transcript {
        let layouts = self.analyzer.analyze_document(doc);
        self.assemble_with_layouts(doc, &layouts)
    }

    /// Build the transcript from precomputed page layouts.
    ///
    /// `layouts` must be in page order, as returned by
    /// [`LayoutAnalyzer::analyze_document`].
    pub fn assemble_with_layouts(&self, doc: &Document, layouts: &[PageLayout]) -> Transcript {
        let mut transcript = Transcript {
            page_headers: self.options.page_headers,
            ..Default::default()
        };

        for (page, layout) in doc.pages.iter().zip(layouts) {
            let (blocks, images) = self.assemble_page(page, layout);
            if blocks.is_empty() {
                continue;
            }
            transcript.pages.push(PageTranscript {
                number: page.number,
                blocks,
            });
            transcript.images.extend(images);
        }

        log::debug!(
            "Assembled transcript: {} pages, {} images",
            transcript.pages.len(),
            transcript.images.len()
        );
        transcript
    }

    fn assemble_page(
        &self,
        page: &Page,
        layout: &PageLayout,
    ) -> (Vec<TranscriptBlock>, Vec<ImagePayload>) {
        // Pairs follow the input order of images on the page
        let mut pair_for_element: HashMap<usize, &ImageTextPair> = HashMap::new();
        let mut pairs = layout.image_text_pairs.iter();
        for (idx, element) in page.elements.iter().enumerate() {
            if element.is_image() {
                if let Some(pair) = pairs.next() {
                    pair_for_element.insert(idx, pair);
                }
            }
        }

        let filter = self.analyzer.resolver().filter();
        let mut blocks = Vec::new();
        let mut images = Vec::new();

        for idx in reading_order(&page.elements, self.options.row_tolerance) {
            let element = &page.elements[idx];
            if element.is_text() {
                if filter.is_valid(element.text_content()) {
                    blocks.push(TranscriptBlock::Text {
                        id: element.id.clone(),
                        content: trim_invisible(element.text_content()).to_string(),
                    });
                }
            } else if element.is_image() {
                let position = PositionLabel::for_element(element, page);
                let description = self.describe_image(element, pair_for_element.get(&idx).copied());
                images.push(ImagePayload {
                    page: page.number,
                    id: element.id.clone(),
                    source: element.source.clone(),
                    caption: element.label().map(str::to_string),
                    position,
                    description: description.clone(),
                });
                blocks.push(TranscriptBlock::Image {
                    id: element.id.clone(),
                    position,
                    description,
                });
            }
        }

        (blocks, images)
    }

    fn describe_image(&self, image: &Element, pair: Option<&ImageTextPair>) -> String {
        if let Some(label) = image.label() {
            return format!("Caption: {}", collapse_whitespace(label));
        }

        let related = pair.map(|p| p.related_text.as_slice()).unwrap_or(&[]);
        if related.is_empty() {
            return "No nearby text.".to_string();
        }

        let excerpts: Vec<String> = related
            .iter()
            .take(self.options.max_excerpts)
            .map(|rel| {
                format!(
                    "\"{}\" ({})",
                    excerpt(rel.element.text_content(), self.options.excerpt_chars),
                    rel.direction
                )
            })
            .collect();

        let noun = if related.len() == 1 {
            "element"
        } else {
            "elements"
        };
        if excerpts.is_empty() {
            format!("Near {} text {}.", related.len(), noun)
        } else {
            format!(
                "Near {} text {}: {}.",
                related.len(),
                noun,
                excerpts.join("; ")
            )
        }
    }
}

/// Build a transcript with the given options.
pub fn build_transcript(doc: &Document, options: &TranscriptOptions) -> Transcript {
    TranscriptAssembler::new(options.clone()).assemble(doc)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
