//! Dynamic pagination of a narrative into spread-sized page chunks.
//!
//! Two strategies share one greedy paragraph-then-sentence splitter:
//!
//! - **Measured**: a [`TextMeasurer`] reports the rendered height of a
//!   candidate page; pages grow while they stay within the page height.
//! - **Fallback**: a fixed character budget, with a hard cut for runs that
//!   have no sentence boundary.
//!
//! A single balancing pass then evens out very short pages followed by
//! very long ones. Chunks are trimmed slices of the input in order, so no
//! non-whitespace character is ever invented, dropped, or reordered.
//!
//! # Example
//!
//! ```
//! use zineflow::paginate::{paginate, PaginationOptions};
//!
//! let options = PaginationOptions::new().with_char_budget(30);
//! let chunks = paginate("First page text.\n\nSecond page text here.", &options);
//! assert_eq!(chunks, vec!["First page text.", "Second page text here."]);
//! ```

mod balance;
mod measure;
mod options;
mod segment;
mod session;
mod splitter;
mod spread;

pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use options::{BalanceOptions, PaginationOptions, Typography, Viewport};
pub use segment::{paragraphs, sentences_in};
pub use session::{PaginationJob, PaginationOutcome, PaginationSession};
pub use spread::{Spread, SpreadSet};

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use balance::balance_pages;
use splitter::{split_pages, CharBudget, HeightBudget};

/// Which measurement strategy produced a pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Rendered-height measurement
    Measured,
    /// Character-count budget
    Fallback,
}

/// Result of paginating a narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page chunks in reading order
    pub chunks: Vec<String>,
    /// Strategy that produced the chunks
    pub strategy: Strategy,
    /// Sentences moved by the balancer
    pub balanced_sentences: usize,
}

impl Pagination {
    /// Number of two-page spreads.
    pub fn spread_count(&self) -> usize {
        self.chunks.len().div_ceil(2)
    }

    /// Convert into a spread set.
    pub fn into_spreads(self) -> SpreadSet {
        SpreadSet::new(self.chunks)
    }
}

/// Splits narratives into page chunks.
#[derive(Clone, Default)]
pub struct Paginator {
    options: PaginationOptions,
    measurer: Option<Arc<dyn TextMeasurer>>,
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("options", &self.options)
            .field("measurer", &self.measurer.is_some())
            .finish()
    }
}

impl Paginator {
    /// Create a paginator without a measurement surface.
    pub fn new(options: PaginationOptions) -> Self {
        Self {
            options,
            measurer: None,
        }
    }

    /// Attach a measurement surface.
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Some(Arc::new(measurer));
        self
    }

    /// Attach a shared measurement surface.
    pub fn with_shared_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }

    /// Get the options in use.
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Replace the viewport, keeping everything else.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.options.viewport = viewport;
    }

    /// Paginate a narrative.
    pub fn paginate(&self, text: &str) -> Pagination {
        if let Some(measurer) = self.measurer.as_deref().filter(|m| m.is_available()) {
            if let Some(result) = self.paginate_measured(text, measurer) {
                return result;
            }
            log::debug!("Measurement surface stopped answering; using character budget");
        }
        self.paginate_fallback(text)
    }

    fn paginate_measured(&self, text: &str, measurer: &dyn TextMeasurer) -> Option<Pagination> {
        let budget = HeightBudget {
            measurer,
            typography: &self.options.typography,
            width: self.options.page_width(),
            max_height: self.options.page_height(),
            failed: Cell::new(false),
        };

        let mut pages = split_pages(text, &budget);
        let moved = balance_pages(text, &mut pages, &budget, &self.options.balance);
        if budget.failed.get() {
            return None;
        }

        Some(Pagination {
            chunks: pages.into_iter().map(|r| text[r].to_string()).collect(),
            strategy: Strategy::Measured,
            balanced_sentences: moved,
        })
    }

    fn paginate_fallback(&self, text: &str) -> Pagination {
        let budget = CharBudget {
            max_chars: self.options.char_budget.max(1),
        };
        let mut pages = split_pages(text, &budget);
        let moved = balance_pages(text, &mut pages, &budget, &self.options.balance);

        Pagination {
            chunks: pages.into_iter().map(|r| text[r].to_string()).collect(),
            strategy: Strategy::Fallback,
            balanced_sentences: moved,
        }
    }
}

/// Paginate with the character-budget strategy.
pub fn paginate(text: &str, options: &PaginationOptions) -> Vec<String> {
    Paginator::new(options.clone()).paginate(text).chunks
}

/// Paginate, measuring with `measurer` when it is available.
pub fn paginate_with_measurer(
    text: &str,
    options: &PaginationOptions,
    measurer: Arc<dyn TextMeasurer>,
) -> Pagination {
    Paginator::new(options.clone())
        .with_shared_measurer(measurer)
        .paginate(text)
}

/// Join chunks back into one narrative.
///
/// With `"\n\n"` this reproduces the trimmed source exactly when every page
/// break fell between paragraphs. A break inside a paragraph (sentence or
/// hard cut) comes back as the separator in place of the original
/// whitespace; every other character is preserved in order.
pub fn rejoin(chunks: &[String], separator: &str) -> String {
    chunks.join(separator)
}
