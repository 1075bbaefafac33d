//! Narrative content assembly.
//!
//! Flattens a document into ordered per-page text: text boxes verbatim in
//! reading order, images replaced by a synthesized description and a coarse
//! position label. The result is the input handed to prose generation.

mod assembler;
mod json;
mod options;
mod reading_order;

pub use assembler::{
    build_transcript, ImagePayload, PageTranscript, PositionLabel, Transcript, TranscriptAssembler,
    TranscriptBlock,
};
pub use json::{to_json, JsonFormat};
pub use options::TranscriptOptions;
pub use reading_order::reading_order;
