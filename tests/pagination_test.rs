//! Integration tests for narrative pagination.

use std::sync::Arc;

use zineflow::paginate::{
    paginate, paginate_with_measurer, rejoin, BalanceOptions, MonospaceMeasurer, PaginationOptions,
    PaginationSession, Paginator, SpreadSet, Strategy, TextMeasurer, Typography, Viewport,
};

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn story(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|p| {
            (0..5)
                .map(|s| format!("In chapter {} the travellers reached landmark {}.", p, s))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[test]
fn test_empty_narrative_has_no_pages() {
    let options = PaginationOptions::default();
    assert!(paginate("", &options).is_empty());
    assert!(paginate(" \n\t\n\n ", &options).is_empty());
    assert_eq!(SpreadSet::new(paginate("", &options)).spread_count(), 0);
}

#[test]
fn test_round_trip_preserves_text() {
    let options = PaginationOptions::new().with_char_budget(120);
    let inputs = [
        "x".to_string(),
        "   ".to_string(),
        "春の海。ひねもすのたりのたりかな。".repeat(20),
        format!("A。B。{}", "C".repeat(500)),
        story(6),
        "no terminators here just a very long run of words ".repeat(12),
    ];

    for input in &inputs {
        let chunks = paginate(input, &options);
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
        assert!(chunks.iter().all(|c| c.chars().count() <= 120));
        assert_eq!(
            strip_whitespace(&rejoin(&chunks, &options.separator)),
            strip_whitespace(input)
        );
    }
}

#[test]
fn test_round_trip_exact_on_paragraph_boundaries() {
    let text = story(10);
    let options = PaginationOptions::new().with_char_budget(600);
    let chunks = paginate(&text, &options);
    assert!(chunks.len() > 1);
    assert_eq!(rejoin(&chunks, "\n\n"), text);
}

#[test]
fn test_long_run_is_hard_cut() {
    let text = format!("A。B。{}", "C".repeat(500));
    let chunks = paginate(&text, &PaginationOptions::new().with_char_budget(100));
    assert!(chunks.len() >= 2);
    assert_eq!(chunks[0], "A。B。");
    assert!(chunks.iter().all(|c| !c.is_empty() && c.chars().count() <= 100));
}

#[test]
fn test_idempotent() {
    let text = story(8);
    let options = PaginationOptions::new().with_char_budget(300);
    let first = paginate(&text, &options);
    let second = paginate(&text, &options);
    assert_eq!(first, second);
}

/// A paragraph of 22 sentences, 879 characters long.
fn long_paragraph() -> String {
    (0..22)
        .map(|i| format!("Sentence {:02} keeps the second page long.", i))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_balancer_fills_short_page() {
    let opener = "A very short opener.";
    let text = format!("{}\n\n{}", opener, long_paragraph());

    // The long paragraph fits a page alone but not after the opener
    let options = PaginationOptions::new().with_char_budget(890);
    let balanced = Paginator::new(options.clone()).paginate(&text);
    let unbalanced = Paginator::new(options.without_balance()).paginate(&text);

    assert_eq!(unbalanced.chunks.len(), 2);
    assert_eq!(unbalanced.chunks[0], opener);
    assert_eq!(unbalanced.balanced_sentences, 0);

    assert_eq!(balanced.chunks.len(), 2);
    assert_eq!(balanced.balanced_sentences, 3);
    assert!(balanced.chunks[0].starts_with("A very short opener.\n\nSentence 00"));
    assert!(balanced.chunks[0].ends_with("Sentence 02 keeps the second page long."));
    assert!(balanced.chunks[1].starts_with("Sentence 03"));
    assert_eq!(
        strip_whitespace(&balanced.chunks.concat()),
        strip_whitespace(&text)
    );
}

#[test]
fn test_balancer_respects_sentence_limit() {
    let text = format!("Hi.\n\n{}", long_paragraph());

    let options = PaginationOptions::new()
        .with_char_budget(880)
        .with_balance(BalanceOptions {
            max_sentences: 2,
            ..Default::default()
        });
    let result = Paginator::new(options).paginate(&text);

    assert_eq!(result.balanced_sentences, 2);
    assert!(result.chunks[0].ends_with("Sentence 01 keeps the second page long."));
    assert!(result.chunks[1].starts_with("Sentence 02"));
}

#[test]
fn test_measured_strategy() {
    let options = PaginationOptions::new().with_viewport(Viewport::new(900.0, 600.0));
    let measurer: Arc<dyn TextMeasurer> = Arc::new(MonospaceMeasurer::default());
    let result = paginate_with_measurer(&story(12), &options, measurer.clone());

    assert_eq!(result.strategy, Strategy::Measured);
    for chunk in &result.chunks {
        let height = measurer
            .measure_height(chunk, &options.typography, options.page_width())
            .unwrap();
        assert!(height <= options.page_height());
    }
}

#[test]
fn test_bigger_font_needs_more_pages() {
    let text = story(12);
    let small = Paginator::default()
        .with_measurer(MonospaceMeasurer::default())
        .paginate(&text);
    let large = Paginator::new(PaginationOptions::new().with_typography(Typography {
        font_size: 28.0,
        ..Default::default()
    }))
    .with_measurer(MonospaceMeasurer::default())
    .paginate(&text);

    assert!(large.chunks.len() > small.chunks.len());
}

struct Unavailable;

impl TextMeasurer for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn measure_height(&self, _text: &str, _typography: &Typography, _width: f32) -> Option<f32> {
        Some(0.0)
    }
}

#[test]
fn test_unavailable_measurer_uses_char_budget() {
    let options = PaginationOptions::new().with_char_budget(250);
    let result = paginate_with_measurer(&story(5), &options, Arc::new(Unavailable));
    assert_eq!(result.strategy, Strategy::Fallback);
    assert_eq!(result.chunks, paginate(&story(5), &options));
}

#[test]
fn test_spreads() {
    let chunks = paginate(&story(10), &PaginationOptions::new().with_char_budget(300));
    let pages = chunks.len();
    let spreads = SpreadSet::new(chunks.clone());

    assert_eq!(spreads.spread_count(), pages.div_ceil(2));
    let first = spreads.spread(0).unwrap();
    assert_eq!(first.left, chunks[0]);
    assert_eq!(first.right, chunks.get(1).map(String::as_str));
    assert_eq!(spreads.spreads().count(), spreads.spread_count());
}

#[test]
fn test_session_recomputes_on_change_only() {
    let mut session = PaginationSession::new(
        Paginator::default().with_measurer(MonospaceMeasurer::default()),
    );
    let text = story(6);

    let first = session.update(&text, Viewport::default()).clone();
    session.update(&text, Viewport::default());
    assert_eq!(session.generation(), 1);

    let resized = session.update(&text, Viewport::new(800.0, 500.0)).clone();
    assert_eq!(session.generation(), 2);
    assert_ne!(first, resized);

    let edited = format!("{}\n\nOne more line.", text);
    session.update(&edited, Viewport::new(800.0, 500.0));
    assert_eq!(session.generation(), 3);
}

#[test]
fn test_session_rejects_stale_results() {
    let mut session = PaginationSession::default();
    let stale = session.request("Old text.", Viewport::default());
    let fresh = session.request("New text.", Viewport::default());

    assert!(session.commit(fresh.run()));
    assert!(!session.commit(stale.run()));
    assert_eq!(
        session.current().map(|p| p.chunks.clone()),
        Some(vec!["New text.".to_string()])
    );
}
