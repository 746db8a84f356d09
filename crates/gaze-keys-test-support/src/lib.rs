//! Test support utilities for gaze-keys.
//!
//! Provides mocks, synthetic frame builders, and model fixtures for testing
//! the gaze pipeline and its adapters.
//!
//! # Example
//!
//! ```
//! use gaze_keys_test_support::{MockGazeEstimator, SyntheticFrameBuilder};
//!
//! // Encode a synthetic webcam frame
//! let frame = SyntheticFrameBuilder::checkerboard(128, 96);
//! let png = SyntheticFrameBuilder::png(&frame);
//! assert!(!png.is_empty());
//!
//! // An estimator that always looks at the screen center
//! let estimator = MockGazeEstimator::centered();
//! assert_eq!(estimator.call_count(), 0);
//! ```

mod builders;
mod mocks;
mod model;

pub use builders::{multipart_body, SyntheticFrameBuilder, MULTIPART_BOUNDARY};
pub use mocks::{FailingGazeEstimator, MockFrameSource, MockGazeEstimator, MockResultOutput};
pub use model::write_constant_gaze_model;
