//! Transcript assembly options.

use crate::error::{Error, Result};
use crate::layout::LayoutOptions;
use serde::{Deserialize, Serialize};

/// Options for building a narrative transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptOptions {
    /// Vertical tolerance in pixels for grouping elements into one row
    pub row_tolerance: f32,

    /// Maximum nearby text excerpts quoted per image
    pub max_excerpts: usize,

    /// Maximum characters per quoted excerpt
    pub excerpt_chars: usize,

    /// Prefix every page with a `[Page N]` header line
    pub page_headers: bool,

    /// Layout analysis options used to resolve nearby text
    pub layout: LayoutOptions,
}

impl TranscriptOptions {
    /// Create new transcript options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row grouping tolerance.
    pub fn with_row_tolerance(mut self, tolerance: f32) -> Self {
        self.row_tolerance = tolerance;
        self
    }

    /// Set the excerpt limits.
    pub fn with_excerpts(mut self, max_excerpts: usize, excerpt_chars: usize) -> Self {
        self.max_excerpts = max_excerpts;
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Enable or disable page headers.
    pub fn with_page_headers(mut self, enabled: bool) -> Self {
        self.page_headers = enabled;
        self
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Validate option consistency.
    pub fn validate(&self) -> Result<()> {
        if !(self.row_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(
                "row_tolerance must be non-negative".to_string(),
            ));
        }
        if self.excerpt_chars == 0 {
            return Err(Error::InvalidConfig(
                "excerpt_chars must be positive".to_string(),
            ));
        }
        self.layout.validate()
    }
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self {
            row_tolerance: 50.0,
            max_excerpts: 3,
            excerpt_chars: 160,
            page_headers: true,
            layout: LayoutOptions::default(),
        }
    }
}
