//! Directional weighting of candidate text positions.

use super::LayoutOptions;
use crate::model::{Direction, Rect};

/// Direction and distance multiplier for one anchor/candidate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighting {
    /// Relative direction of the candidate
    pub direction: Direction,
    /// Multiplier applied to the raw distance
    pub weight: f32,
}

/// Classify a candidate's position relative to an anchor image.
///
/// Checks run in priority order: overlap, below on the dominant vertical
/// axis, side-by-side within the vertical band, above, then diagonal.
pub fn directional_weight(anchor: &Rect, candidate: &Rect, options: &LayoutOptions) -> Weighting {
    let weights = &options.weights;

    if anchor.overlaps(candidate) {
        return Weighting {
            direction: Direction::Overlapping,
            weight: weights.overlap,
        };
    }

    let (ax, ay) = anchor.center();
    let (cx, cy) = candidate.center();
    let dx = cx - ax;
    let dy = cy - ay;
    let vertical_dominant = dy.abs() >= dx.abs();
    let horizontal = if dx < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    };

    if dy > 0.0 && vertical_dominant {
        Weighting {
            direction: Direction::Below,
            weight: weights.below,
        }
    } else if dy.abs() <= anchor.height * options.side_band_ratio {
        Weighting {
            direction: horizontal,
            weight: weights.side,
        }
    } else if dy < 0.0 && vertical_dominant {
        Weighting {
            direction: Direction::Above,
            weight: weights.above,
        }
    } else {
        Weighting {
            direction: horizontal,
            weight: weights.diagonal,
        }
    }
}

/// Raw edge distance scaled by the directional weight.
pub fn weighted_distance(anchor: &Rect, candidate: &Rect, options: &LayoutOptions) -> f32 {
    anchor.distance(candidate) * directional_weight(anchor, candidate, options).weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 150.0)
    }

    fn classify(candidate: Rect) -> Weighting {
        directional_weight(&anchor(), &candidate, &LayoutOptions::default())
    }

    #[test]
    fn test_caption_below() {
        let w = classify(Rect::new(120.0, 260.0, 160.0, 30.0));
        assert_eq!(w.direction, Direction::Below);
        assert!((w.weight - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_overlapping() {
        let w = classify(Rect::new(150.0, 200.0, 100.0, 20.0));
        assert_eq!(w.direction, Direction::Overlapping);
        assert!((w.weight - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_side_by_side() {
        let right = classify(Rect::new(320.0, 160.0, 100.0, 30.0));
        assert_eq!(right.direction, Direction::Right);
        assert_eq!(right.weight, 1.0);

        let left = classify(Rect::new(0.0, 170.0, 80.0, 20.0));
        assert_eq!(left.direction, Direction::Left);
        assert_eq!(left.weight, 1.0);
    }

    #[test]
    fn test_above() {
        let w = classify(Rect::new(150.0, 40.0, 100.0, 30.0));
        assert_eq!(w.direction, Direction::Above);
        assert!((w.weight - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal() {
        // Up and far to the right: horizontal axis dominates, outside the side band
        let w = classify(Rect::new(420.0, 20.0, 60.0, 20.0));
        assert_eq!(w.direction, Direction::Right);
        assert!((w.weight - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_weight_ordering_with_defaults() {
        let overlap = classify(Rect::new(150.0, 200.0, 100.0, 20.0)).weight;
        let below = classify(Rect::new(120.0, 260.0, 160.0, 30.0)).weight;
        let side = classify(Rect::new(320.0, 160.0, 100.0, 30.0)).weight;
        let above = classify(Rect::new(150.0, 40.0, 100.0, 30.0)).weight;
        let diagonal = classify(Rect::new(420.0, 20.0, 60.0, 20.0)).weight;
        assert!(overlap < below && below < side && side < above && above < diagonal);
    }

    #[test]
    fn test_weighted_distance() {
        let d = weighted_distance(
            &anchor(),
            &Rect::new(120.0, 260.0, 160.0, 30.0),
            &LayoutOptions::default(),
        );
        assert!((d - 6.0).abs() < 1e-4);
    }
}
