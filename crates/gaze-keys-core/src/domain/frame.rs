//! Camera frames before and after preprocessing.

use serde::{Deserialize, Serialize};

/// Side length of the square grayscale frame the gaze model consumes.
pub const FRAME_SIZE: usize = 64;

/// A preprocessed frame: `FRAME_SIZE x FRAME_SIZE` grayscale samples in `[0, 1]`.
///
/// Samples are stored row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct GazeFrame {
    data: Vec<f32>,
}

impl GazeFrame {
    /// Wraps row-major samples.
    ///
    /// Returns `None` unless exactly `FRAME_SIZE * FRAME_SIZE` samples are given.
    #[must_use]
    pub fn from_samples(data: Vec<f32>) -> Option<Self> {
        (data.len() == FRAME_SIZE * FRAME_SIZE).then_some(Self { data })
    }

    /// Wraps samples produced by a resize to `FRAME_SIZE x FRAME_SIZE`.
    pub(crate) fn from_resized(data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), FRAME_SIZE * FRAME_SIZE);
        Self { data }
    }

    /// Returns the samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }
}

/// Encoded image bytes together with where they came from.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Human-readable origin, e.g. a file path.
    pub source: String,
    /// Encoded image data (JPEG, PNG, ...).
    pub bytes: Vec<u8>,
}

impl CapturedFrame {
    /// Creates a new captured frame.
    #[must_use]
    pub fn new(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes,
        }
    }
}

/// Outcome of running one frame through the offline pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Origin of the frame.
    pub source: String,
    /// Normalized horizontal gaze position.
    pub x: f64,
    /// Normalized vertical gaze position.
    pub y: f64,
    /// Key under the gaze point, when translation was requested and in range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}
