//! Core domain types for gaze-driven keyboard input.

mod error;
mod frame;
mod gaze;
mod keyboard;

pub use error::{ErrorKind, GazeError};
pub use frame::{CapturedFrame, GazeFrame, PredictionRecord, FRAME_SIZE};
pub use gaze::{CalibrationSample, GazePoint, GazeVector};
pub use keyboard::KeyboardLayout;
