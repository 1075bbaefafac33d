//! Two-page spreads over paginated chunks.

use serde::{Deserialize, Serialize};

/// A pair of facing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread<'a> {
    /// Spread index (0-based)
    pub index: usize,
    /// Left page, chunk `2 * index`
    pub left: &'a str,
    /// Right page, chunk `2 * index + 1`, absent on a trailing odd page
    pub right: Option<&'a str>,
}

/// Ordered page chunks read as consecutive spreads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadSet {
    chunks: Vec<String>,
}

impl SpreadSet {
    /// Wrap page chunks.
    pub fn new(chunks: Vec<String>) -> Self {
        Self { chunks }
    }

    /// Page chunks in order.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Unwrap into page chunks.
    pub fn into_chunks(self) -> Vec<String> {
        self.chunks
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of spreads, `ceil(pages / 2)`.
    pub fn spread_count(&self) -> usize {
        self.chunks.len().div_ceil(2)
    }

    /// Check if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Get a spread by index.
    pub fn spread(&self, index: usize) -> Option<Spread<'_>> {
        let left = self.chunks.get(index * 2)?;
        Some(Spread {
            index,
            left,
            right: self.chunks.get(index * 2 + 1).map(String::as_str),
        })
    }

    /// Iterate over spreads in order.
    pub fn spreads(&self) -> impl Iterator<Item = Spread<'_>> {
        (0..self.spread_count()).filter_map(move |i| self.spread(i))
    }
}

impl From<Vec<String>> for SpreadSet {
    fn from(chunks: Vec<String>) -> Self {
        Self::new(chunks)
    }
}
