//! Gaze Keys Core - Domain logic for gaze-driven keyboard input
//!
//! This crate contains the domain types, the image preprocessor, the gaze
//! predictor, the gaze-to-key mapper, and the ports adapters plug into.
//!
//! ```
//! use gaze_keys_core::{GazePoint, KeyboardLayout};
//!
//! let key = KeyboardLayout::qwerty().key_at(GazePoint::new(0.5, 0.5));
//! assert_eq!(key.ok(), Some("G"));
//! ```

pub mod domain;
pub mod inference;
pub mod pipeline;
pub mod ports;

pub use domain::{
    CalibrationSample, CapturedFrame, ErrorKind, GazeError, GazeFrame, GazePoint, GazeVector,
    KeyboardLayout, PredictionRecord, FRAME_SIZE,
};
pub use pipeline::GazePredictor;
pub use ports::{FrameSource, GazeEstimator, ResultOutput};
