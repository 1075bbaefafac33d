//! Axis-aligned rectangle primitives.
//!
//! Coordinates are page-local with the origin at the top-left corner and y
//! growing downward. They are never scaled by editor zoom or pan.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on a page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (never negative once sanitized)
    pub width: f32,
    /// Height (never negative once sanitized)
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return a copy with non-finite values zeroed and negative sizes clamped to 0.
    pub fn sanitized(&self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            width: finite_or_zero(self.width).max(0.0),
            height: finite_or_zero(self.height).max(0.0),
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check whether both axis projections intersect.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Edge-to-edge Euclidean distance, 0 when the rectangles overlap.
    pub fn distance(&self, other: &Rect) -> f32 {
        if self.overlaps(other) {
            return 0.0;
        }
        let dx = (other.x - self.right()).max(self.x - other.right()).max(0.0);
        let dy = (other.y - self.bottom()).max(self.y - other.bottom()).max(0.0);
        dx.hypot(dy)
    }

    /// Area of the intersection rectangle, 0 when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let x_overlap = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let y_overlap = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        x_overlap * y_overlap
    }

    /// Intersection over union, 0 when the union is empty.
    pub fn iou(&self, other: &Rect) -> f32 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Edge-to-edge distance between two rectangles.
pub fn distance(a: &Rect, b: &Rect) -> f32 {
    a.distance(b)
}

/// Check whether two rectangles overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Intersection area of two rectangles.
pub fn intersection_area(a: &Rect, b: &Rect) -> f32 {
    a.intersection_area(b)
}

/// Area of a rectangle.
pub fn area(r: &Rect) -> f32 {
    r.area()
}

/// Intersection over union of two rectangles.
pub fn iou(a: &Rect, b: &Rect) -> f32 {
    a.iou(b)
}
