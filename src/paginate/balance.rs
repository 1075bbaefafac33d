//! Post-pass page balancing.
//!
//! A greedy split can leave a nearly empty page in front of a full one. The
//! balancer walks consecutive page pairs once, left to right, and pulls a
//! few whole sentences from the start of a long right page onto a very short
//! left page. It never moves text the other way and never iterates.

use std::ops::Range;

use super::segment::{char_len, sentences_across};
use super::splitter::PageBudget;
use super::BalanceOptions;

/// Balance page ranges in place. Returns the number of sentences moved.
pub(crate) fn balance_pages(
    source: &str,
    pages: &mut [Range<usize>],
    budget: &dyn PageBudget,
    options: &BalanceOptions,
) -> usize {
    if !options.enabled || options.max_sentences == 0 {
        return 0;
    }

    let mut moved_total = 0;
    for i in 0..pages.len().saturating_sub(1) {
        let left = pages[i].clone();
        let right = pages[i + 1].clone();
        let left_len = char_len(source, &left);
        let right_len = char_len(source, &right);

        let is_short = left_len < options.short_page_chars;
        let is_long = right_len > options.long_page_chars
            && right_len as f32 >= left_len as f32 * options.long_to_short_ratio;
        if !(is_short && is_long) {
            continue;
        }

        let sentences = sentences_across(source, right.clone());
        let mut moved = 0;
        // keep at least one sentence on the right page
        while moved < options.max_sentences && moved + 1 < sentences.len() {
            let candidate = left.start..sentences[moved].end;
            if !budget.fits(&source[candidate]) {
                break;
            }
            moved += 1;
        }

        if moved > 0 {
            pages[i] = left.start..sentences[moved - 1].end;
            pages[i + 1] = sentences[moved].start..right.end;
            log::debug!(
                "Balanced pages {} and {}: moved {} sentence(s) ({} -> {} chars on the left)",
                i,
                i + 1,
                moved,
                left_len,
                char_len(source, &pages[i])
            );
            moved_total += moved;
        }
    }
    moved_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::splitter::CharBudget;

    fn sentence(n: usize) -> String {
        format!("This is sentence number {:04} of the long page.", n)
    }

    fn scenario() -> (String, Vec<Range<usize>>) {
        let left = "A very short opener.";
        assert_eq!(left.chars().count(), 20);
        let right: String = (0..43).map(sentence).collect::<Vec<_>>().join(" ");
        let right = right[..2000.min(right.len())].trim_end().to_string();
        let source = format!("{}\n\n{}", left, right);
        let pages = vec![0..left.len(), left.len() + 2..source.len()];
        (source, pages)
    }

    #[test]
    fn test_short_left_long_right_moves_sentences() {
        let (source, mut pages) = scenario();
        let right_before = char_len(&source, &pages[1]);
        assert!(right_before > 1900);

        let moved = balance_pages(
            &source,
            &mut pages,
            &CharBudget { max_chars: 900 },
            &BalanceOptions::default(),
        );

        assert!(moved >= 1);
        let left = &source[pages[0].clone()];
        assert!(left.starts_with("A very short opener.\n\nThis is sentence number 0000"));
        assert!(source[pages[1].clone()].starts_with("This is sentence number"));
        assert!(pages[0].end < pages[1].start);
    }

    #[test]
    fn test_order_and_coverage_preserved() {
        let (source, mut pages) = scenario();
        balance_pages(
            &source,
            &mut pages,
            &CharBudget { max_chars: 900 },
            &BalanceOptions::default(),
        );
        let rejoined: String = pages
            .iter()
            .map(|r| &source[r.clone()])
            .collect::<Vec<_>>()
            .join(" ");
        let strip = |s: &str| s.split_whitespace().collect::<String>();
        assert_eq!(strip(&rejoined), strip(&source));
    }

    #[test]
    fn test_respects_budget() {
        let (source, mut pages) = scenario();
        // Only room for the opener plus one sentence
        let moved = balance_pages(
            &source,
            &mut pages,
            &CharBudget { max_chars: 80 },
            &BalanceOptions::default(),
        );
        assert_eq!(moved, 1);
        assert!(char_len(&source, &pages[0]) <= 80);
    }

    #[test]
    fn test_balanced_pair_untouched() {
        let source = "Left page has plenty of text already. More here.\n\nRight page. Short.";
        let split = source.find("\n\n").unwrap();
        let mut pages = vec![0..split, split + 2..source.len()];
        let original = pages.clone();
        let moved = balance_pages(
            source,
            &mut pages,
            &CharBudget { max_chars: 900 },
            &BalanceOptions::default(),
        );
        assert_eq!(moved, 0);
        assert_eq!(pages, original);
    }

    #[test]
    fn test_right_keeps_one_sentence() {
        let long_sentence = "word ".repeat(150);
        let source = format!("Hi.\n\n{}", long_sentence.trim_end());
        let mut pages = vec![0..3, 5..source.len()];
        let moved = balance_pages(
            &source,
            &mut pages,
            &CharBudget { max_chars: 5000 },
            &BalanceOptions::default(),
        );
        assert_eq!(moved, 0);
    }

    #[test]
    fn test_disabled() {
        let (source, mut pages) = scenario();
        let options = BalanceOptions {
            enabled: false,
            ..Default::default()
        };
        let moved = balance_pages(&source, &mut pages, &CharBudget { max_chars: 900 }, &options);
        assert_eq!(moved, 0);
    }
}
