//! Gaze predictor: frame bytes to a normalized screen point.

use std::sync::Arc;

use tracing::debug;

use super::preprocess_bytes;
use crate::domain::{GazeError, GazeFrame, GazePoint};
use crate::ports::GazeEstimator;

/// Runs preprocessing and the gaze model, then rescales to screen space.
///
/// Holds no model when loading failed at startup; every prediction then
/// reports [`GazeError::ModelUnavailable`].
#[derive(Clone)]
pub struct GazePredictor {
    estimator: Option<Arc<dyn GazeEstimator>>,
}

impl GazePredictor {
    /// Creates a predictor backed by the given estimator.
    #[must_use]
    pub fn new(estimator: Arc<dyn GazeEstimator>) -> Self {
        Self {
            estimator: Some(estimator),
        }
    }

    /// Creates a predictor with no model.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { estimator: None }
    }

    /// Returns true if a model is loaded.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.estimator.is_some()
    }

    /// Predicts the normalized gaze point for an encoded image.
    ///
    /// Model availability is checked before the bytes are decoded.
    ///
    /// # Errors
    ///
    /// - [`GazeError::ModelUnavailable`] if no model is loaded
    /// - [`GazeError::InvalidImage`] if the bytes cannot be decoded
    /// - [`GazeError::Inference`] if the model fails on the frame or returns
    ///   a non-finite vector
    pub fn capture(&self, bytes: &[u8]) -> Result<GazePoint, GazeError> {
        let estimator = self.estimator()?;
        let frame = preprocess_bytes(bytes)?;
        Self::run(estimator, &frame)
    }

    fn estimator(&self) -> Result<&dyn GazeEstimator, GazeError> {
        self.estimator.as_deref().ok_or(GazeError::ModelUnavailable)
    }

    fn run(estimator: &dyn GazeEstimator, frame: &GazeFrame) -> Result<GazePoint, GazeError> {
        let vector = estimator
            .estimate(frame)
            .map_err(|e| GazeError::Inference(format!("{e:#}")))?;
        debug!(
            "{} raw gaze vector: ({}, {})",
            estimator.name(),
            vector.gx,
            vector.gy
        );
        if !vector.gx.is_finite() || !vector.gy.is_finite() {
            return Err(GazeError::Inference(
                "model produced a non-finite gaze vector".into(),
            ));
        }
        Ok(vector.to_screen())
    }
}

impl std::fmt::Debug for GazePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GazePredictor")
            .field("estimator", &self.estimator.as_ref().map(|e| e.name()))
            .finish()
    }
}
