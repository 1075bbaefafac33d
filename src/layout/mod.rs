//! Spatial layout analysis.
//!
//! Infers which text fragments belong to which image from page coordinates
//! alone. There is no linguistic analysis; relationships come from edge
//! distance, relative direction, and a filter for placeholder text.

mod analyzer;
mod options;
mod resolver;
mod validity;
mod weighting;

pub use analyzer::{analyze_page, LayoutAnalyzer};
pub use options::{DirectionWeights, LayoutOptions, DEFAULT_BOILERPLATE};
pub use resolver::{find_best_text, find_nearby_text, NearbyTextResolver};
pub use validity::TextFilter;
pub use weighting::{directional_weight, weighted_distance, Weighting};

pub(crate) use validity::trim_invisible;
