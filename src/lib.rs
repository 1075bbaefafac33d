//! # zineflow
//!
//! Layout analysis and pagination for freeform visual collages ("zines").
//!
//! This library infers which text fragments belong to which image from raw
//! page coordinates, flattens a document into a prose-ready transcript, and
//! re-flows a narrative into balanced two-page spreads.
//!
//! ## Quick Start
//!
//! ```no_run
//! use zineflow::{load_document, build_transcript, paginate_narrative};
//! use zineflow::{PaginationOptions, TranscriptOptions};
//!
//! fn main() -> zineflow::Result<()> {
//!     // Load a document exported as JSON
//!     let doc = load_document("zine.json")?;
//!
//!     // Flatten it for a prose generator
//!     let transcript = build_transcript(&doc, &TranscriptOptions::default());
//!     println!("{}", transcript);
//!
//!     // Paginate the prose that came back
//!     let chunks = paginate_narrative("Once upon a time.", &PaginationOptions::default());
//!     println!("{} pages", chunks.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Spatial matching**: Direction-weighted nearest-text search per image
//! - **Transcripts**: Reading-order text with positioned image descriptions
//! - **Pagination**: Height-aware splitting with a character-budget fallback
//! - **Balancing**: Evens out short pages followed by long ones
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod convert;
pub mod error;
pub mod layout;
pub mod model;
pub mod paginate;
pub mod transcript;

// Re-export commonly used types
pub use convert::{
    ConversionPipeline, ConvertOptions, ConvertResult, GenerationRequest, LogNotifier,
    NarrativeGenerator, NoticeLevel, Notifier, StaticNarrative, TranscriptEcho,
};
pub use error::{Error, Result};
pub use layout::{LayoutAnalyzer, LayoutOptions, NearbyTextResolver, TextFilter};
pub use model::{
    Direction, Document, Element, ElementKind, ImageTextPair, Metadata, Page, PageLayout, Rect,
    SpatialRelationship,
};
pub use paginate::{
    BalanceOptions, MonospaceMeasurer, Pagination, PaginationOptions, PaginationSession,
    Paginator, SpreadSet, Strategy, TextMeasurer, Typography, Viewport,
};
pub use transcript::{
    build_transcript, JsonFormat, PositionLabel, Transcript, TranscriptAssembler,
    TranscriptOptions,
};

use std::path::Path;
use std::sync::Arc;

/// Load a document from a JSON file.
///
/// # Example
///
/// ```no_run
/// use zineflow::load_document;
///
/// let doc = load_document("zine.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = std::fs::read_to_string(path)?;
    Document::from_json(&json)
}

/// Analyze the image-text layout of every page.
pub fn analyze_document(doc: &Document, options: &LayoutOptions) -> Vec<PageLayout> {
    LayoutAnalyzer::new(options.clone()).analyze_document(doc)
}

/// Split a narrative into page chunks with the character-budget strategy.
///
/// # Example
///
/// ```
/// use zineflow::{paginate_narrative, PaginationOptions};
///
/// let chunks = paginate_narrative("", &PaginationOptions::default());
/// assert!(chunks.is_empty());
/// ```
pub fn paginate_narrative(narrative: &str, options: &PaginationOptions) -> Vec<String> {
    paginate::paginate(narrative, options)
}

/// Builder for analyzing and paginating zine documents.
///
/// # Example
///
/// ```no_run
/// use zineflow::{Zineflow, Viewport};
///
/// let result = Zineflow::new()
///     .with_viewport(Viewport::new(1200.0, 800.0))
///     .with_char_budget(700)
///     .sequential()
///     .load("zine.json")?;
///
/// println!("{}", result.transcript_text());
/// # Ok::<(), zineflow::Error>(())
/// ```
pub struct Zineflow {
    options: ConvertOptions,
    measurer: Option<Arc<dyn TextMeasurer>>,
}

impl Zineflow {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            measurer: None,
        }
    }

    /// Use a full set of conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Set layout analysis options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.options.transcript.layout = options;
        self
    }

    /// Disable parallel page analysis.
    pub fn sequential(mut self) -> Self {
        self.options.transcript.layout = self.options.transcript.layout.sequential();
        self
    }

    /// Toggle `[Page N]` header lines in transcripts.
    pub fn with_page_headers(mut self, enabled: bool) -> Self {
        self.options.transcript.page_headers = enabled;
        self
    }

    /// Set the reading surface size.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.options.pagination.viewport = viewport;
        self
    }

    /// Set the fallback character budget.
    pub fn with_char_budget(mut self, chars: usize) -> Self {
        self.options.pagination.char_budget = chars;
        self
    }

    /// Measure page heights with `measurer`.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Some(Arc::new(measurer));
        self
    }

    /// Load a document from a JSON file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<ZineflowResult> {
        let document = load_document(path)?;
        self.document(document)
    }

    /// Parse a document from a JSON string.
    pub fn parse_json(self, json: &str) -> Result<ZineflowResult> {
        let document = Document::from_json(json)?;
        self.document(document)
    }

    /// Wrap an in-memory document.
    pub fn document(self, document: Document) -> Result<ZineflowResult> {
        self.options.validate()?;
        Ok(ZineflowResult {
            document,
            options: self.options,
            measurer: self.measurer,
        })
    }
}

impl Default for Zineflow {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document together with the options to process it.
pub struct ZineflowResult {
    /// The loaded document
    pub document: Document,
    options: ConvertOptions,
    measurer: Option<Arc<dyn TextMeasurer>>,
}

impl ZineflowResult {
    /// Analyze every page's image-text layout.
    pub fn layouts(&self) -> Vec<PageLayout> {
        analyze_document(&self.document, &self.options.transcript.layout)
    }

    /// Build the transcript.
    pub fn transcript(&self) -> Transcript {
        build_transcript(&self.document, &self.options.transcript)
    }

    /// Build the flattened transcript text.
    pub fn transcript_text(&self) -> String {
        self.transcript().text()
    }

    /// Paginate a narrative with this configuration.
    pub fn paginate(&self, narrative: &str) -> Pagination {
        self.pipeline(Arc::new(TranscriptEcho)).paginate(narrative)
    }

    /// Run the full conversion with a prose generator.
    pub fn convert(&self, generator: Arc<dyn NarrativeGenerator>) -> Result<ConvertResult> {
        self.pipeline(generator).convert(&self.document)
    }

    /// Serialize the page layouts to JSON.
    pub fn layouts_json(&self, format: JsonFormat) -> Result<String> {
        transcript::to_json(&self.layouts(), format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn pipeline(&self, generator: Arc<dyn NarrativeGenerator>) -> ConversionPipeline {
        let pipeline = ConversionPipeline::new(generator).with_options(self.options.clone());
        match &self.measurer {
            Some(measurer) => pipeline.with_measurer(measurer.clone()),
            None => pipeline,
        }
    }
}
