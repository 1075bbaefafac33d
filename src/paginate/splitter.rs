//! Greedy paragraph/sentence page splitting.

use std::cell::Cell;
use std::ops::Range;

use super::measure::TextMeasurer;
use super::segment::{char_len, hard_cut, paragraphs, sentences_in};
use super::Typography;

/// Capacity test for a candidate page.
pub(crate) trait PageBudget {
    /// Whether `text` fits on one page.
    fn fits(&self, text: &str) -> bool;

    /// Character limit for hard cuts; `None` keeps oversized sentences whole.
    fn hard_limit(&self) -> Option<usize>;
}

/// Character-count budget used when no measurement surface exists.
pub(crate) struct CharBudget {
    pub max_chars: usize,
}

impl PageBudget for CharBudget {
    fn fits(&self, text: &str) -> bool {
        text.chars().count() <= self.max_chars
    }

    fn hard_limit(&self) -> Option<usize> {
        Some(self.max_chars.max(1))
    }
}

/// Rendered-height budget backed by a measurement surface.
pub(crate) struct HeightBudget<'a> {
    pub measurer: &'a dyn TextMeasurer,
    pub typography: &'a Typography,
    pub width: f32,
    pub max_height: f32,
    /// Set when the surface failed to answer mid-run
    pub failed: Cell<bool>,
}

impl PageBudget for HeightBudget<'_> {
    fn fits(&self, text: &str) -> bool {
        match self
            .measurer
            .measure_height(text, self.typography, self.width)
        {
            Some(height) => height <= self.max_height,
            None => {
                self.failed.set(true);
                false
            }
        }
    }

    fn hard_limit(&self) -> Option<usize> {
        None
    }
}

/// Split `source` into trimmed page ranges.
pub(crate) fn split_pages(source: &str, budget: &dyn PageBudget) -> Vec<Range<usize>> {
    let mut builder = PageBuilder {
        source,
        budget,
        pages: Vec::new(),
        current: None,
    };

    for paragraph in paragraphs(source) {
        if builder.try_extend(&paragraph) {
            continue;
        }
        if builder.fits(&paragraph) {
            builder.flush();
            builder.current = Some(paragraph);
            continue;
        }

        log::debug!(
            "Paragraph of {} chars exceeds the page budget; splitting by sentence",
            char_len(source, &paragraph)
        );
        for sentence in sentences_in(source, paragraph) {
            builder.push_sentence(sentence);
        }
    }

    builder.flush();
    builder.pages
}

struct PageBuilder<'a> {
    source: &'a str,
    budget: &'a dyn PageBudget,
    pages: Vec<Range<usize>>,
    current: Option<Range<usize>>,
}

impl PageBuilder<'_> {
    fn fits(&self, range: &Range<usize>) -> bool {
        self.budget.fits(&self.source[range.clone()])
    }

    /// Grow the current page to the end of `segment` if the result still fits.
    fn try_extend(&mut self, segment: &Range<usize>) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        let candidate = current.start..segment.end;
        if self.fits(&candidate) {
            self.current = Some(candidate);
            true
        } else {
            false
        }
    }

    fn flush(&mut self) {
        if let Some(current) = self.current.take() {
            self.pages.push(current);
        }
    }

    fn push_sentence(&mut self, sentence: Range<usize>) {
        if self.try_extend(&sentence) {
            return;
        }
        self.flush();
        if self.fits(&sentence) {
            self.current = Some(sentence);
            return;
        }

        match self.budget.hard_limit() {
            Some(limit) => {
                let mut pieces = hard_cut(self.source, sentence, limit);
                let last = pieces.pop();
                self.pages.extend(pieces);
                self.current = last;
            }
            None => {
                log::debug!(
                    "Sentence of {} chars exceeds the page budget; keeping it whole",
                    char_len(self.source, &sentence)
                );
                self.pages.push(sentence);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(source: &str, max_chars: usize) -> Vec<&str> {
        split_pages(source, &CharBudget { max_chars })
            .into_iter()
            .map(|r| &source[r])
            .collect()
    }

    #[test]
    fn test_everything_fits() {
        assert_eq!(pages("One.\n\nTwo.", 100), vec!["One.\n\nTwo."]);
    }

    #[test]
    fn test_paragraph_boundaries() {
        let source = "aaaa aaaa.\n\nbbbb bbbb.\n\ncccc cccc.";
        assert_eq!(
            pages(source, 22),
            vec!["aaaa aaaa.\n\nbbbb bbbb.", "cccc cccc."]
        );
    }

    #[test]
    fn test_sentence_fallback_fills_current_page() {
        let source = "Short.\n\nFirst sentence here. Second sentence here. Third one.";
        assert_eq!(
            pages(source, 30),
            vec![
                "Short.\n\nFirst sentence here.",
                "Second sentence here.",
                "Third one."
            ]
        );
    }

    #[test]
    fn test_hard_cut_long_run() {
        let source = format!("A。B。{}", "C".repeat(500));
        let result = pages(&source, 100);
        assert!(result.len() >= 2);
        assert_eq!(result[0], "A。B。");
        assert!(result.iter().all(|p| !p.is_empty() && p.chars().count() <= 100));
        assert_eq!(result[1..].concat(), "C".repeat(500));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(pages("", 10).is_empty());
        assert!(pages(" \n\n\t ", 10).is_empty());
        assert_eq!(pages("x", 10), vec!["x"]);
    }

    struct LinesMeasurer;

    impl TextMeasurer for LinesMeasurer {
        fn measure_height(&self, text: &str, _: &Typography, _: f32) -> Option<f32> {
            // one 10 px line per sentence terminator or paragraph
            Some(10.0 * text.matches('.').count().max(1) as f32)
        }
    }

    #[test]
    fn test_height_budget_keeps_oversized_sentence_whole() {
        let typography = Typography::default();
        let budget = HeightBudget {
            measurer: &LinesMeasurer,
            typography: &typography,
            width: 100.0,
            max_height: 20.0,
            failed: Cell::new(false),
        };
        let source = "A. B. C.\n\nD.";
        let result: Vec<&str> = split_pages(source, &budget)
            .into_iter()
            .map(|r| &source[r])
            .collect();
        assert_eq!(result, vec!["A. B.", "C.\n\nD."]);
        assert!(!budget.failed.get());
    }
}
