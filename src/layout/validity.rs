//! Text validity filter.
//!
//! Placeholder and filler text never takes part in spatial relationships.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn lorem_ipsum_regex() -> &'static Regex {
    static LOREM: OnceLock<Regex> = OnceLock::new();
    LOREM.get_or_init(|| Regex::new(r"(?i)^lorem\s+ipsum\b").expect("valid lorem ipsum pattern"))
}

/// Filter deciding which text candidates are eligible for analysis.
#[derive(Debug, Clone)]
pub struct TextFilter {
    boilerplate: HashSet<String>,
}

impl TextFilter {
    /// Create a filter from a list of case-insensitive placeholder strings.
    pub fn new<I, S>(boilerplate: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            boilerplate: boilerplate
                .into_iter()
                .map(|s| normalize(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Check whether text may participate in relationships.
    pub fn is_valid(&self, text: &str) -> bool {
        let trimmed = trim_invisible(text);
        if trimmed.is_empty() {
            return false;
        }
        if lorem_ipsum_regex().is_match(trimmed) {
            return false;
        }
        !self.boilerplate.contains(&normalize(trimmed))
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new(super::options::DEFAULT_BOILERPLATE)
    }
}

/// Trim whitespace plus zero-width characters editors leave behind.
pub(crate) fn trim_invisible(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '\u{200B}' | '\u{FEFF}'))
}

fn normalize(text: &str) -> String {
    trim_invisible(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
