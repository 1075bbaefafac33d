//! Derived image-text relationships.

use super::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a candidate text relative to an anchor image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Candidate sits above the anchor
    Above,
    /// Candidate sits below the anchor
    Below,
    /// Candidate sits to the left of the anchor
    Left,
    /// Candidate sits to the right of the anchor
    Right,
    /// Candidate overlaps the anchor
    Overlapping,
}

impl Direction {
    /// Lowercase name used in transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Overlapping => "overlapping",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate text element scored against an anchor image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialRelationship {
    /// The related text element
    pub element: Element,
    /// Edge-to-edge distance (0 when overlapping)
    pub distance: f32,
    /// Distance scaled by the directional weight
    pub weighted_distance: f32,
    /// Relative direction
    pub direction: Direction,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

/// An image together with its ranked nearby text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTextPair {
    /// The anchor image
    pub image: Element,
    /// Related text sorted ascending by weighted distance
    pub related_text: Vec<SpatialRelationship>,
    /// Best match, if any
    pub primary_text: Option<SpatialRelationship>,
}

impl ImageTextPair {
    /// Check if any text was found near the image.
    pub fn has_text(&self) -> bool {
        !self.related_text.is_empty()
    }
}

/// Result of analyzing one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Image elements in input order
    pub images: Vec<Element>,
    /// Text elements in input order
    pub text_elements: Vec<Element>,
    /// One entry per image, in input order
    pub image_text_pairs: Vec<ImageTextPair>,
}

impl PageLayout {
    /// Find the pair for an image id.
    pub fn pair_for(&self, image_id: &str) -> Option<&ImageTextPair> {
        self.image_text_pairs
            .iter()
            .find(|p| p.image.id.as_deref() == Some(image_id))
    }

    /// Number of images with at least one related text.
    pub fn captioned_count(&self) -> usize {
        self.image_text_pairs.iter().filter(|p| p.has_text()).count()
    }
}
