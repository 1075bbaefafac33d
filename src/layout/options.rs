//! Tunable constants for spatial analysis.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Multiplicative distance weights per relative position.
///
/// Lower weight means a stronger caption signal. Only the ordering
/// `overlap < below < side < above < diagonal` is contractual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionWeights {
    /// Candidate overlaps the image
    pub overlap: f32,
    /// Candidate below the image (classic caption position)
    pub below: f32,
    /// Candidate beside the image, roughly vertically co-centered
    pub side: f32,
    /// Candidate above the image
    pub above: f32,
    /// Candidate diagonal or otherwise far off-axis
    pub diagonal: f32,
}

impl Default for DirectionWeights {
    fn default() -> Self {
        Self {
            overlap: 0.1,
            below: 0.6,
            side: 1.0,
            above: 1.2,
            diagonal: 1.5,
        }
    }
}

impl DirectionWeights {
    /// Check that the weight classes keep their contractual ordering.
    pub fn is_ordered(&self) -> bool {
        0.0 <= self.overlap
            && self.overlap < self.below
            && self.below < self.side
            && self.side < self.above
            && self.above < self.diagonal
    }
}

/// Placeholder strings editors insert into fresh text boxes.
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    "double-click to edit",
    "double click to edit",
    "click to edit",
    "click to add text",
    "add text",
    "add a heading",
    "add a subheading",
    "type something...",
    "type something",
    "enter text here",
    "new text",
    "text",
];

/// Options for image-text layout analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Search radius as a fraction of the image's shorter side
    pub radius_scale: f32,

    /// Lower clamp for the search radius in pixels
    pub min_radius: f32,

    /// Upper clamp for the search radius in pixels
    pub max_radius: f32,

    /// Directional distance weights
    pub weights: DirectionWeights,

    /// Vertical band, as a fraction of image height, counted as side-by-side
    pub side_band_ratio: f32,

    /// Confidence multiplier for overlapping text
    pub overlap_boost: f32,

    /// Confidence multiplier for text below the image
    pub below_boost: f32,

    /// Case-insensitive placeholder strings excluded from analysis
    pub boilerplate: Vec<String>,

    /// Analyze pages in parallel
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the radius scale and clamps.
    pub fn with_radius(mut self, scale: f32, min: f32, max: f32) -> Self {
        self.radius_scale = scale;
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    /// Set direction weights.
    pub fn with_weights(mut self, weights: DirectionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set confidence boosts for overlapping and below candidates.
    pub fn with_boosts(mut self, overlap: f32, below: f32) -> Self {
        self.overlap_boost = overlap;
        self.below_boost = below;
        self
    }

    /// Add a boilerplate string.
    pub fn with_boilerplate(mut self, text: impl Into<String>) -> Self {
        self.boilerplate.push(text.into());
        self
    }

    /// Enable or disable parallel page analysis.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validate option consistency.
    pub fn validate(&self) -> Result<()> {
        if !self.weights.is_ordered() {
            return Err(Error::InvalidConfig(format!(
                "direction weights must satisfy overlap < below < side < above < diagonal, got {:?}",
                self.weights
            )));
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(Error::InvalidConfig(format!(
                "radius clamp must satisfy 0 < min ({}) <= max ({})",
                self.min_radius, self.max_radius
            )));
        }
        if self.radius_scale <= 0.0 || self.side_band_ratio < 0.0 {
            return Err(Error::InvalidConfig(
                "radius_scale must be positive and side_band_ratio non-negative".to_string(),
            ));
        }
        if self.overlap_boost < 1.0 || self.below_boost < 1.0 {
            return Err(Error::InvalidConfig(
                "confidence boosts must be at least 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            radius_scale: 0.6,
            min_radius: 120.0,
            max_radius: 220.0,
            weights: DirectionWeights::default(),
            side_band_ratio: 0.3,
            overlap_boost: 1.5,
            below_boost: 1.3,
            boilerplate: DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect(),
            parallel: true,
        }
    }
}
