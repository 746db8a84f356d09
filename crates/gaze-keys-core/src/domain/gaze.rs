//! Gaze vectors, screen points and calibration samples.

use serde::{Deserialize, Serialize};

/// A point on screen as a fraction of screen width and height.
///
/// Each axis is conventionally in `[0, 1]`, but nothing here enforces it:
/// a prediction from an out-of-range gaze vector lands outside the unit square.
/// Range checks happen where a point is consumed, see
/// [`KeyboardLayout::key_at`](super::KeyboardLayout::key_at).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazePoint {
    /// Horizontal position (0.0 = left edge).
    pub x: f64,
    /// Vertical position (0.0 = top edge).
    pub y: f64,
}

impl GazePoint {
    /// Creates a new gaze point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Raw two-component regression output of the gaze model.
///
/// Nominally in `[-1, 1]` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeVector {
    /// Horizontal component.
    pub gx: f32,
    /// Vertical component.
    pub gy: f32,
}

impl GazeVector {
    /// Creates a new gaze vector.
    #[must_use]
    pub const fn new(gx: f32, gy: f32) -> Self {
        Self { gx, gy }
    }

    /// Rescales the vector from `[-1, 1]` to normalized screen coordinates.
    ///
    /// `(-1, -1)` maps to `(0, 0)` and `(1, 1)` maps to `(1, 1)`. Components
    /// outside `[-1, 1]` are not clamped.
    #[must_use]
    pub fn to_screen(self) -> GazePoint {
        GazePoint {
            x: (f64::from(self.gx) + 1.0) / 2.0,
            y: (f64::from(self.gy) + 1.0) / 2.0,
        }
    }
}

/// An observed gaze estimate paired with the screen target the user looked at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSample {
    /// What the model predicted.
    pub observed: GazePoint,
    /// Where the user was actually looking.
    pub target: GazePoint,
}
