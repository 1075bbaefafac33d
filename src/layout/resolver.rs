//! Nearby-text resolution for a single anchor image.

use std::cmp::Ordering;

use super::validity::TextFilter;
use super::weighting::directional_weight;
use super::LayoutOptions;
use crate::model::{Direction, Element, Rect, SpatialRelationship};

/// Resolves which text elements relate to an image.
#[derive(Debug, Clone)]
pub struct NearbyTextResolver {
    options: LayoutOptions,
    filter: TextFilter,
}

impl NearbyTextResolver {
    /// Create a resolver with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        let filter = TextFilter::new(&options.boilerplate);
        Self { options, filter }
    }

    /// Get the options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Get the text validity filter in use.
    pub fn filter(&self) -> &TextFilter {
        &self.filter
    }

    /// Search radius for an image, scaled by its shorter side and clamped.
    ///
    /// An inverted clamp resolves to `max_radius`. A non-finite result is 0.
    pub fn search_radius(&self, image: &Rect) -> f32 {
        let shorter = image.width.min(image.height);
        let radius = (shorter * self.options.radius_scale)
            .max(self.options.min_radius)
            .min(self.options.max_radius);
        if radius.is_finite() {
            radius.max(0.0)
        } else {
            0.0
        }
    }

    /// Score one candidate against an image.
    ///
    /// Returns `None` when the candidate is not valid text or lies outside
    /// the search radius.
    pub fn score(&self, image: &Element, candidate: &Element) -> Option<SpatialRelationship> {
        if !self.filter.is_valid(candidate.text_content()) {
            return None;
        }

        let anchor = image.rect();
        let rect = candidate.rect();
        let radius = self.search_radius(&anchor);
        let distance = anchor.distance(&rect);
        if distance > radius {
            return None;
        }

        let weighting = directional_weight(&anchor, &rect, &self.options);
        let weighted_distance = distance * weighting.weight;
        let mut confidence = if radius > 0.0 {
            (1.0 - weighted_distance / radius).clamp(0.0, 1.0)
        } else {
            1.0
        };
        match weighting.direction {
            Direction::Overlapping => confidence *= self.options.overlap_boost,
            Direction::Below => confidence *= self.options.below_boost,
            _ => {}
        }

        Some(SpatialRelationship {
            element: candidate.clone(),
            distance,
            weighted_distance,
            direction: weighting.direction,
            confidence: confidence.min(1.0),
        })
    }

    /// All related candidates, ascending by weighted distance.
    ///
    /// Ties keep input order. An empty result means no nearby text.
    pub fn ranked_matches<'a, I>(&self, image: &Element, candidates: I) -> Vec<SpatialRelationship>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let mut matches: Vec<SpatialRelationship> = candidates
            .into_iter()
            .filter(|c| !std::ptr::eq(*c, image))
            .filter_map(|c| self.score(image, c))
            .collect();

        // sort_by is stable, so equal weighted distances keep input order
        matches.sort_by(|a, b| {
            a.weighted_distance
                .partial_cmp(&b.weighted_distance)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }

    /// The single best related candidate.
    pub fn best_match<'a, I>(&self, image: &Element, candidates: I) -> Option<SpatialRelationship>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        self.ranked_matches(image, candidates).into_iter().next()
    }
}

impl Default for NearbyTextResolver {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

/// Ranked nearby text for an image using the given options.
pub fn find_nearby_text(
    image: &Element,
    candidates: &[Element],
    options: &LayoutOptions,
) -> Vec<SpatialRelationship> {
    NearbyTextResolver::new(options.clone()).ranked_matches(image, candidates)
}

/// Best nearby text for an image using the given options.
pub fn find_best_text(
    image: &Element,
    candidates: &[Element],
    options: &LayoutOptions,
) -> Option<SpatialRelationship> {
    NearbyTextResolver::new(options.clone()).best_match(image, candidates)
}
