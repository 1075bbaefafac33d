//! Re-pagination tracking for a live reading surface.
//!
//! The narrative or the viewport can change while a previous split is still
//! being computed elsewhere. Every request gets a generation number and only
//! the newest generation may be committed, so a late result never replaces a
//! fresher one.

use super::{Pagination, Paginator, Viewport};

/// Holds the latest pagination for a changing narrative and viewport.
#[derive(Debug, Clone, Default)]
pub struct PaginationSession {
    paginator: Paginator,
    generation: u64,
    input: Option<(String, Viewport)>,
    current: Option<PaginationOutcome>,
}

/// A self-contained pagination request that can run on another thread.
#[derive(Debug, Clone)]
pub struct PaginationJob {
    generation: u64,
    text: String,
    paginator: Paginator,
}

/// Finished output of a [`PaginationJob`].
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOutcome {
    /// Generation of the request that produced this result
    pub generation: u64,
    /// The pagination
    pub pagination: Pagination,
}

impl PaginationJob {
    /// Generation number of this request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run the split.
    pub fn run(self) -> PaginationOutcome {
        PaginationOutcome {
            generation: self.generation,
            pagination: self.paginator.paginate(&self.text),
        }
    }
}

impl PaginationSession {
    /// Create a session around a paginator.
    pub fn new(paginator: Paginator) -> Self {
        Self {
            paginator,
            generation: 0,
            input: None,
            current: None,
        }
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest committed pagination.
    pub fn current(&self) -> Option<&Pagination> {
        self.current.as_ref().map(|outcome| &outcome.pagination)
    }

    /// Re-paginate synchronously if the text or viewport changed.
    ///
    /// The cached result is reused only when it was computed for the latest
    /// request. A request that was never committed forces a fresh split.
    pub fn update(&mut self, text: &str, viewport: Viewport) -> &Pagination {
        let fresh = self.is_unchanged(text, viewport)
            && self
                .current
                .as_ref()
                .is_some_and(|outcome| outcome.generation == self.generation);
        let outcome = match self.current.take() {
            Some(outcome) if fresh => {
                log::trace!("Pagination input unchanged; reusing generation {}", self.generation);
                outcome
            }
            _ => self.request(text, viewport).run(),
        };
        &self.current.insert(outcome).pagination
    }

    /// Start a new generation for `text` at `viewport`.
    ///
    /// Any job requested earlier becomes stale.
    pub fn request(&mut self, text: &str, viewport: Viewport) -> PaginationJob {
        self.generation += 1;
        self.input = Some((text.to_string(), viewport));

        let mut paginator = self.paginator.clone();
        paginator.set_viewport(viewport);
        PaginationJob {
            generation: self.generation,
            text: text.to_string(),
            paginator,
        }
    }

    /// Install a finished result. Returns `false` if it is stale.
    pub fn commit(&mut self, outcome: PaginationOutcome) -> bool {
        if outcome.generation != self.generation {
            log::debug!(
                "Discarding stale pagination (generation {}, current {})",
                outcome.generation,
                self.generation
            );
            return false;
        }
        self.current = Some(outcome);
        true
    }

    fn is_unchanged(&self, text: &str, viewport: Viewport) -> bool {
        matches!(&self.input, Some((t, v)) if t == text && *v == viewport)
    }
}
