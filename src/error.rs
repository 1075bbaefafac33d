//! Error types for zineflow library.

use std::io;
use thiserror::Error;

/// Result type alias for zineflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the fallible edges of the library.
///
/// Layout analysis and pagination never fail; malformed geometry degrades to
/// zero-valued coordinates and a missing measurement surface selects the
/// character-budget fallback. Errors are reserved for I/O, serialization,
/// configuration, and external collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON input could not be parsed.
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An options value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The prose-generation collaborator failed.
    #[error("Narrative generation failed: {0}")]
    Generation(String),

    /// Error during rendering (JSON, transcript).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfig("min_radius > max_radius".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: min_radius > max_radius"
        );

        let err = Error::Generation("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Narrative generation failed: quota exceeded");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
