//! Failure taxonomy for the gaze pipeline.

use serde::Serialize;
use thiserror::Error;

/// A failure in capture, prediction or key mapping.
#[derive(Debug, Error)]
pub enum GazeError {
    /// The gaze model failed to load at startup.
    #[error("Eye-tracking model not loaded")]
    ModelUnavailable,

    /// The uploaded bytes are not a decodable image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A normalized point falls outside `[0, 1)` on some axis.
    #[error("gaze point ({x}, {y}) is outside the keyboard; both coordinates must be in [0, 1)")]
    MappingOutOfRange {
        /// Horizontal coordinate that was looked up.
        x: f64,
        /// Vertical coordinate that was looked up.
        y: f64,
    },

    /// The inference runtime rejected the frame.
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Machine-readable failure class, serialized in error responses.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Model missing; server-side fault.
    ModelUnavailable,
    /// Undecodable upload.
    InvalidImage,
    /// Coordinates outside the keyboard.
    MappingOutOfRange,
    /// Inference runtime failure.
    InferenceFailed,
    /// Malformed request payload.
    ValidationError,
    /// Unexpected server fault.
    InternalError,
}

impl ErrorKind {
    /// Returns the snake_case identifier used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelUnavailable => "model_unavailable",
            Self::InvalidImage => "invalid_image",
            Self::MappingOutOfRange => "mapping_out_of_range",
            Self::InferenceFailed => "inference_failed",
            Self::ValidationError => "validation_error",
            Self::InternalError => "internal_error",
        }
    }

    /// Returns true if the failure was caused by the request, not the server.
    #[must_use]
    pub const fn is_client_fault(self) -> bool {
        !matches!(self, Self::ModelUnavailable | Self::InternalError)
    }
}

impl GazeError {
    /// Returns the failure class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ModelUnavailable => ErrorKind::ModelUnavailable,
            Self::InvalidImage(_) => ErrorKind::InvalidImage,
            Self::MappingOutOfRange { .. } => ErrorKind::MappingOutOfRange,
            Self::Inference(_) => ErrorKind::InferenceFailed,
        }
    }

    /// Returns true if the request caused this failure.
    #[must_use]
    pub const fn is_client_fault(&self) -> bool {
        self.kind().is_client_fault()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_is_server_fault() {
        assert!(!GazeError::ModelUnavailable.is_client_fault());
    }

    #[test]
    fn test_input_failures_are_client_faults() {
        assert!(GazeError::InvalidImage("bad".into()).is_client_fault());
        assert!(GazeError::Inference("shape".into()).is_client_fault());
        assert!(GazeError::MappingOutOfRange { x: 1.0, y: 0.0 }.is_client_fault());
    }

    #[test]
    fn test_kind_wire_names_match_serde() {
        for kind in [
            ErrorKind::ModelUnavailable,
            ErrorKind::InvalidImage,
            ErrorKind::MappingOutOfRange,
            ErrorKind::InferenceFailed,
            ErrorKind::ValidationError,
            ErrorKind::InternalError,
        ] {
            let json = serde_json::to_string(&kind).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_model_unavailable_message_is_stable() {
        assert_eq!(
            GazeError::ModelUnavailable.to_string(),
            "Eye-tracking model not loaded"
        );
    }
}
