//! Request and response bodies.

use gaze_keys_core::{CalibrationSample, ErrorKind, GazePoint};
use serde::{Deserialize, Serialize};

pub const TRACKER_INITIALIZED: &str = "Tracker initialized successfully";
pub const CALIBRATION_COMPLETED: &str = "Calibration completed successfully";
pub const MODEL_UPDATED: &str = "Model updated successfully";

/// Multipart field carrying the camera frame.
pub const IMAGE_FIELD: &str = "image";

/// Plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The key under a gaze point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResponse {
    pub key: String,
}

/// Liveness and model status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

/// Body of `/calibrate`: predicted points and the targets the user fixated.
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationRequest {
    pub gaze_data: Vec<GazePoint>,
    pub screen_points: Vec<GazePoint>,
}

impl CalibrationRequest {
    /// Pairs observed points with targets. Unmatched trailing entries are dropped.
    #[must_use]
    pub fn samples(&self) -> Vec<CalibrationSample> {
        self.gaze_data
            .iter()
            .zip(&self.screen_points)
            .map(|(observed, target)| CalibrationSample {
                observed: *observed,
                target: *target,
            })
            .collect()
    }
}

/// Error envelope returned with every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub detail: String,
}
