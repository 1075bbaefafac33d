//! Page-level layout analysis.

use rayon::prelude::*;

use super::resolver::NearbyTextResolver;
use super::LayoutOptions;
use crate::model::{Document, Element, ImageTextPair, Page, PageLayout};

/// Layout analyzer computing image-text relationships for pages.
///
/// Holds no mutable state; one analyzer can serve many pages concurrently.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    resolver: NearbyTextResolver,
}

impl LayoutAnalyzer {
    /// Create a new layout analyzer.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            resolver: NearbyTextResolver::new(options),
        }
    }

    /// Get the underlying resolver.
    pub fn resolver(&self) -> &NearbyTextResolver {
        &self.resolver
    }

    /// Analyze one page's elements.
    pub fn analyze_elements(&self, elements: &[Element]) -> PageLayout {
        let images: Vec<Element> = elements.iter().filter(|e| e.is_image()).cloned().collect();
        let text_elements: Vec<Element> =
            elements.iter().filter(|e| e.is_text()).cloned().collect();

        let image_text_pairs: Vec<ImageTextPair> = images
            .iter()
            .map(|image| {
                let related_text = self.resolver.ranked_matches(image, &text_elements);
                let primary_text = related_text.first().cloned();
                ImageTextPair {
                    image: image.clone(),
                    related_text,
                    primary_text,
                }
            })
            .collect();

        log::debug!(
            "Analyzed {} elements: {} images, {} text, {} with nearby text",
            elements.len(),
            images.len(),
            text_elements.len(),
            image_text_pairs.iter().filter(|p| p.has_text()).count()
        );

        PageLayout {
            images,
            text_elements,
            image_text_pairs,
        }
    }

    /// Analyze a page.
    pub fn analyze_page(&self, page: &Page) -> PageLayout {
        self.analyze_elements(&page.elements)
    }

    /// Analyze every page of a document, preserving page order.
    pub fn analyze_document(&self, doc: &Document) -> Vec<PageLayout> {
        if self.resolver.options().parallel && doc.pages.len() > 1 {
            doc.pages
                .par_iter()
                .map(|page| self.analyze_page(page))
                .collect()
        } else {
            doc.pages.iter().map(|page| self.analyze_page(page)).collect()
        }
    }
}

/// Analyze one page's elements with the given options.
pub fn analyze_page(elements: &[Element], options: &LayoutOptions) -> PageLayout {
    LayoutAnalyzer::new(options.clone()).analyze_elements(elements)
}
