//! Document model types for zine content.
//!
//! Pages hold freely positioned elements; analysis derives relationships
//! between them on demand and never stores them back into the document.

mod document;
pub mod geometry;
mod relation;

pub use document::{Document, Element, ElementKind, Metadata, Page, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use geometry::Rect;
pub use relation::{Direction, ImageTextPair, PageLayout, SpatialRelationship};
