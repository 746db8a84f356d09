//! The capture pipeline: preprocessing and gaze prediction.

mod predictor;
mod preprocess;

pub use predictor::GazePredictor;
pub use preprocess::{decode_frame, preprocess, preprocess_bytes};
