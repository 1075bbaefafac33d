//! Document-to-zine conversion pipeline.
//!
//! The pipeline flattens a document into a transcript, hands it to an
//! injected [`NarrativeGenerator`], and paginates the returned narrative into
//! spreads. Progress and failures are reported through an injected
//! [`Notifier`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use zineflow::convert::{ConversionPipeline, StaticNarrative};
//! use zineflow::model::{Document, Element, Page};
//!
//! fn main() -> zineflow::Result<()> {
//!     let mut doc = Document::new();
//!     doc.add_page(Page::new(1).with_element(Element::text("t1", 10.0, 10.0, 200.0, 40.0, "Hello")));
//!
//!     let pipeline = ConversionPipeline::new(Arc::new(StaticNarrative::new("Once upon a time.")));
//!     let result = pipeline.convert(&doc)?;
//!     assert_eq!(result.pages.chunks(), ["Once upon a time."]);
//!     Ok(())
//! }
//! ```

mod generate;
mod notify;

pub use generate::{GenerationRequest, NarrativeGenerator, StaticNarrative, TranscriptEcho};
pub use notify::{LogNotifier, NoticeLevel, Notifier};

use crate::error::{Error, Result};
use crate::model::Document;
use crate::paginate::{Pagination, PaginationOptions, Paginator, SpreadSet, Strategy, TextMeasurer};
use crate::transcript::{Transcript, TranscriptAssembler, TranscriptOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Transcript (and layout) options
    pub transcript: TranscriptOptions,

    /// Pagination options
    pub pagination: PaginationOptions,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set transcript options.
    pub fn with_transcript_options(mut self, options: TranscriptOptions) -> Self {
        self.transcript = options;
        self
    }

    /// Set pagination options.
    pub fn with_pagination_options(mut self, options: PaginationOptions) -> Self {
        self.pagination = options;
        self
    }

    /// Validate option consistency.
    pub fn validate(&self) -> Result<()> {
        self.transcript.validate()?;
        self.pagination.validate()
    }
}

/// Result of converting a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertResult {
    /// Transcript sent to the generator
    pub transcript: Transcript,

    /// Narrative returned by the generator
    pub narrative: String,

    /// Paginated narrative
    pub pages: SpreadSet,

    /// Pagination strategy used
    pub strategy: Strategy,

    /// Sentences moved by the balancer
    pub balanced_sentences: usize,
}

impl ConvertResult {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    /// Number of spreads.
    pub fn spread_count(&self) -> usize {
        self.pages.spread_count()
    }
}

/// Converts documents into paginated narratives.
pub struct ConversionPipeline {
    options: ConvertOptions,
    generator: Arc<dyn NarrativeGenerator>,
    notifier: Arc<dyn Notifier>,
    measurer: Option<Arc<dyn TextMeasurer>>,
}

impl ConversionPipeline {
    /// Create a pipeline with default options that reports to the log.
    pub fn new(generator: Arc<dyn NarrativeGenerator>) -> Self {
        Self {
            options: ConvertOptions::default(),
            generator,
            notifier: Arc::new(LogNotifier),
            measurer: None,
        }
    }

    /// Set conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Set the measurement surface used for pagination.
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    /// Get the options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Build the transcript of a document.
    pub fn transcribe(&self, doc: &Document) -> Transcript {
        TranscriptAssembler::new(self.options.transcript.clone()).assemble(doc)
    }

    /// Paginate a narrative with the pipeline's options and measurer.
    pub fn paginate(&self, narrative: &str) -> Pagination {
        self.paginator().paginate(narrative)
    }

    /// Run the full conversion.
    pub fn convert(&self, doc: &Document) -> Result<ConvertResult> {
        if let Err(e) = self.options.validate() {
            self.notifier.notify(NoticeLevel::Error, &e.to_string());
            return Err(e);
        }

        let transcript = self.transcribe(doc);
        if transcript.is_empty() {
            self.notifier
                .notify(NoticeLevel::Warning, "Document has no content to convert");
            return Ok(ConvertResult {
                transcript,
                narrative: String::new(),
                pages: SpreadSet::default(),
                strategy: Strategy::Fallback,
                balanced_sentences: 0,
            });
        }

        self.notifier.notify(
            NoticeLevel::Info,
            &format!(
                "Generating narrative with {} from {} page(s) and {} image(s)",
                self.generator.name(),
                transcript.pages.len(),
                transcript.images.len()
            ),
        );

        let request = GenerationRequest {
            transcript: transcript.text(),
            images: transcript.images.clone(),
            language: doc.metadata.language.clone(),
        };
        let narrative = self.generator.generate(&request).map_err(|e| {
            let e = match e {
                Error::Generation(_) => e,
                other => Error::Generation(other.to_string()),
            };
            self.notifier.notify(NoticeLevel::Error, &e.to_string());
            e
        })?;

        let pagination = self.paginate(&narrative);
        if pagination.chunks.is_empty() {
            self.notifier
                .notify(NoticeLevel::Warning, "Generated narrative is empty");
        } else {
            self.notifier.notify(
                NoticeLevel::Success,
                &format!(
                    "Converted into {} page(s) across {} spread(s)",
                    pagination.chunks.len(),
                    pagination.spread_count()
                ),
            );
        }

        Ok(ConvertResult {
            transcript,
            narrative,
            strategy: pagination.strategy,
            balanced_sentences: pagination.balanced_sentences,
            pages: pagination.into_spreads(),
        })
    }

    fn paginator(&self) -> Paginator {
        let paginator = Paginator::new(self.options.pagination.clone());
        match &self.measurer {
            Some(measurer) => paginator.with_shared_measurer(measurer.clone()),
            None => paginator,
        }
    }
}
