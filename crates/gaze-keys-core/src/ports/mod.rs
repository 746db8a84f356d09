//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod frame_source;
mod gaze_estimator;
mod result_output;

pub use frame_source::FrameSource;
pub use gaze_estimator::GazeEstimator;
pub use result_output::ResultOutput;
