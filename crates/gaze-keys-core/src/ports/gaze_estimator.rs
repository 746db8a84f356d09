//! Gaze estimator port: the opaque model behind the predictor.

use crate::domain::{GazeFrame, GazeVector};

/// A model mapping a preprocessed frame to a raw gaze vector.
///
/// Implementations are shared read-only across concurrent requests, so
/// `estimate` takes `&self` and must be safe to call from several threads.
pub trait GazeEstimator: Send + Sync {
    /// Returns a short identifier for logs.
    fn name(&self) -> &'static str;

    /// Estimates the gaze vector for one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    fn estimate(&self, frame: &GazeFrame) -> anyhow::Result<GazeVector>;
}
