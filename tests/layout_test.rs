//! Integration tests for image-text layout analysis.

use zineflow::layout::{
    analyze_page, find_best_text, find_nearby_text, LayoutAnalyzer, LayoutOptions,
};
use zineflow::model::{geometry, Direction, Document, Element, ElementKind, Page, Rect};

fn image() -> Element {
    Element::image("photo", 100.0, 100.0, 300.0, 200.0)
}

/// Text placed around `image()`: below, above, right, an overlapping
/// placeholder, and one far away.
fn surrounding_text() -> Vec<Element> {
    vec![
        Element::text("right", 420.0, 150.0, 150.0, 40.0, "Notes on the side"),
        Element::text("above", 100.0, 60.0, 300.0, 30.0, "A headline"),
        Element::text("placeholder", 150.0, 150.0, 100.0, 30.0, "Click to edit"),
        Element::text("below", 100.0, 310.0, 300.0, 30.0, "The harbor at dawn"),
        Element::text("far", 1000.0, 700.0, 100.0, 30.0, "Unrelated"),
    ]
}

#[test]
fn test_geometry_free_functions() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(13.0, 14.0, 5.0, 5.0);
    assert_eq!(geometry::distance(&a, &b), 5.0);
    assert!(!geometry::overlaps(&a, &b));

    let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
    assert!(!geometry::overlaps(&a, &touching));
    assert_eq!(geometry::distance(&a, &touching), 0.0);

    let half = Rect::new(5.0, 0.0, 10.0, 10.0);
    assert_eq!(geometry::intersection_area(&a, &half), 50.0);
    assert_eq!(geometry::area(&a), 100.0);
    assert!((geometry::iou(&a, &a) - 1.0).abs() < 1e-6);
}

#[test]
fn test_ranked_nearby_text() {
    let ranked = find_nearby_text(&image(), &surrounding_text(), &LayoutOptions::default());

    let ids: Vec<&str> = ranked
        .iter()
        .map(|r| r.element.id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["below", "above", "right"]);

    assert_eq!(ranked[0].direction, Direction::Below);
    assert_eq!(ranked[0].distance, 10.0);
    assert!((ranked[0].weighted_distance - 6.0).abs() < 1e-4);
    assert!((ranked[0].confidence - 1.0).abs() < 1e-6);

    assert_eq!(ranked[1].direction, Direction::Above);
    assert!((ranked[1].weighted_distance - 12.0).abs() < 1e-4);

    assert_eq!(ranked[2].direction, Direction::Right);
    assert!((ranked[2].weighted_distance - 20.0).abs() < 1e-4);

    for rel in &ranked {
        assert!((0.0..=1.0).contains(&rel.confidence));
        assert!(rel.weighted_distance >= 0.0);
    }
}

#[test]
fn test_best_text_is_first_ranked() {
    let candidates = surrounding_text();
    let options = LayoutOptions::default();
    let best = find_best_text(&image(), &candidates, &options).unwrap();
    let ranked = find_nearby_text(&image(), &candidates, &options);
    assert_eq!(Some(&best), ranked.first());
}

#[test]
fn test_no_candidates() {
    let options = LayoutOptions::default();
    assert!(find_nearby_text(&image(), &[], &options).is_empty());
    assert!(find_best_text(&image(), &[], &options).is_none());

    let only_filler = vec![
        Element::text("a", 100.0, 310.0, 300.0, 30.0, "Lorem ipsum dolor sit amet"),
        Element::text("b", 100.0, 310.0, 300.0, 30.0, "  \u{200B} "),
    ];
    assert!(find_nearby_text(&image(), &only_filler, &options).is_empty());
}

#[test]
fn test_custom_boilerplate() {
    let candidates = vec![Element::text("t", 100.0, 310.0, 300.0, 30.0, "Your Story Here")];
    let options = LayoutOptions::default();
    assert_eq!(find_nearby_text(&image(), &candidates, &options).len(), 1);

    let options = LayoutOptions::default().with_boilerplate("your story here");
    assert!(find_nearby_text(&image(), &candidates, &options).is_empty());
}

#[test]
fn test_analyze_page_partitions_elements() {
    let mut elements = surrounding_text();
    elements.insert(0, image());
    elements.push(Element {
        kind: Some(ElementKind::Other),
        ..Element::image("shape", 0.0, 0.0, 10.0, 10.0)
    });
    elements.push(Element::image("lonely", 1100.0, 50.0, 100.0, 100.0));

    let layout = analyze_page(&elements, &LayoutOptions::default());
    assert_eq!(layout.images.len(), 2);
    assert_eq!(layout.text_elements.len(), 5);
    assert_eq!(layout.image_text_pairs.len(), 2);
    assert_eq!(layout.captioned_count(), 1);

    let photo = layout.pair_for("photo").unwrap();
    assert_eq!(
        photo.primary_text.as_ref().and_then(|r| r.element.id.as_deref()),
        Some("below")
    );

    let lonely = layout.pair_for("lonely").unwrap();
    assert!(!lonely.has_text());
    assert!(lonely.primary_text.is_none());
}

#[test]
fn test_analyze_page_with_inverted_radius_bounds() {
    let elements = vec![
        image(),
        Element::text("below", 100.0, 310.0, 300.0, 30.0, "The harbor at dawn"),
    ];
    let options = LayoutOptions::new().with_radius(0.6, 300.0, 100.0);
    assert!(options.validate().is_err());

    let layout = analyze_page(&elements, &options);
    assert_eq!(layout.captioned_count(), 1);
}

#[test]
fn test_analyze_document_parallel_matches_sequential() {
    let mut doc = Document::new();
    for n in 1..=8 {
        let offset = n as f32 * 10.0;
        let page = Page::new(n)
            .with_element(Element::image(format!("img{}", n), offset, 100.0, 300.0, 200.0))
            .with_element(Element::text(
                format!("cap{}", n),
                offset,
                305.0,
                300.0,
                30.0,
                format!("Caption {}", n),
            ));
        doc.add_page(page);
    }

    let parallel = LayoutAnalyzer::new(LayoutOptions::default()).analyze_document(&doc);
    let sequential = LayoutAnalyzer::new(LayoutOptions::default().sequential()).analyze_document(&doc);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 8);
    for (i, layout) in parallel.iter().enumerate() {
        let pair = &layout.image_text_pairs[0];
        assert_eq!(
            pair.primary_text.as_ref().and_then(|r| r.element.content.clone()),
            Some(format!("Caption {}", i + 1))
        );
    }
}

#[test]
fn test_malformed_geometry_from_json() {
    let json = r#"{"pages": [{"elements": [
        {"id": "img", "type": "image", "x": 100, "y": 100, "width": -50, "height": 200},
        {"id": "txt", "type": "text", "content": "No coordinates at all"},
        {"id": "odd", "type": "sticker", "x": 5, "y": 5, "width": 5, "height": 5}
    ]}]}"#;
    let doc = Document::from_json(json).unwrap();
    let layouts = LayoutAnalyzer::default().analyze_document(&doc);

    assert_eq!(layouts[0].images.len(), 1);
    assert_eq!(layouts[0].text_elements.len(), 1);
    for rel in &layouts[0].image_text_pairs[0].related_text {
        assert!(rel.distance.is_finite() && rel.distance >= 0.0);
        assert!((0.0..=1.0).contains(&rel.confidence));
    }
}
