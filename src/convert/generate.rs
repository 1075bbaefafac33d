//! Seam to the prose-generation collaborator.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transcript::ImagePayload;

/// Everything a prose generator receives for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Flattened transcript
    pub transcript: String,
    /// Image payloads in transcript order
    pub images: Vec<ImagePayload>,
    /// Content language, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Turns a transcript into narrative prose.
///
/// Implementations wrap an external text-generation service. Failures should
/// be reported as [`Error::Generation`](crate::Error::Generation).
pub trait NarrativeGenerator: Send + Sync {
    /// Get the name of this generator.
    fn name(&self) -> &str;

    /// Produce the narrative for a request.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Returns the transcript unchanged as the narrative.
///
/// Useful offline and for previewing pagination of the raw transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptEcho;

impl NarrativeGenerator for TranscriptEcho {
    fn name(&self) -> &str {
        "echo"
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        Ok(request.transcript.clone())
    }
}

/// Returns a fixed, previously written narrative.
#[derive(Debug, Clone, Default)]
pub struct StaticNarrative {
    narrative: String,
}

impl StaticNarrative {
    /// Wrap a narrative.
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
        }
    }
}

impl NarrativeGenerator for StaticNarrative {
    fn name(&self) -> &str {
        "static"
    }

    fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        Ok(self.narrative.clone())
    }
}
