//! Virtual keyboard layout and gaze-to-key mapping.

// Row/column indices come from floor() of values checked to be in [0, len).
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use super::{GazeError, GazePoint};

/// The fixed partial QWERTY layout: rows of 10, 9 and 7 keys.
static QWERTY: KeyboardLayout = KeyboardLayout {
    rows: &[
        &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
        &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
        &["Z", "X", "C", "V", "B", "N", "M"],
    ],
};

/// An immutable grid of key labels.
///
/// The screen is split into equal-height bands, one per row; each band is
/// split into equal-width cells, one per key in that row.
#[derive(Debug)]
pub struct KeyboardLayout {
    rows: &'static [&'static [&'static str]],
}

impl KeyboardLayout {
    /// Returns the process-wide QWERTY layout.
    #[must_use]
    pub fn qwerty() -> &'static Self {
        &QWERTY
    }

    /// Returns the rows of this layout.
    #[must_use]
    pub const fn rows(&self) -> &'static [&'static [&'static str]] {
        self.rows
    }

    /// Maps a normalized screen point to a key label.
    ///
    /// `row = floor(y * rows)`, `col = floor(x * keys_in_row)`.
    ///
    /// # Errors
    ///
    /// Returns [`GazeError::MappingOutOfRange`] unless both coordinates are
    /// finite and in `[0, 1)`.
    pub fn key_at(&self, point: GazePoint) -> Result<&'static str, GazeError> {
        if !in_unit_range(point.x) || !in_unit_range(point.y) {
            return Err(GazeError::MappingOutOfRange {
                x: point.x,
                y: point.y,
            });
        }

        let row = self.rows[cell_index(point.y, self.rows.len())];
        Ok(row[cell_index(point.x, row.len())])
    }
}

fn in_unit_range(v: f64) -> bool {
    v.is_finite() && (0.0..1.0).contains(&v)
}

/// Index of the cell containing `v` among `len` equal cells of `[0, 1)`.
fn cell_index(v: f64, len: usize) -> usize {
    // v < 1.0 but v * len can still round up to len
    ((v * len as f64).floor() as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: f64, y: f64) -> Result<&'static str, GazeError> {
        KeyboardLayout::qwerty().key_at(GazePoint::new(x, y))
    }

    #[test]
    fn test_layout_shape() {
        let lens: Vec<usize> = KeyboardLayout::qwerty().rows().iter().map(|r| r.len()).collect();
        assert_eq!(lens, vec![10, 9, 7]);
    }

    #[test]
    fn test_corners_and_center() {
        assert_eq!(key(0.0, 0.0).ok(), Some("Q"));
        assert_eq!(key(0.99, 0.0).ok(), Some("P"));
        assert_eq!(key(0.0, 0.99).ok(), Some("Z"));
        assert_eq!(key(0.5, 0.5).ok(), Some("G"));
        assert_eq!(key(0.99, 0.99).ok(), Some("M"));
    }

    #[test]
    fn test_row_boundaries() {
        // Rows split at 1/3 and 2/3
        assert_eq!(key(0.0, 0.33).ok(), Some("Q"));
        assert_eq!(key(0.0, 0.34).ok(), Some("A"));
        assert_eq!(key(0.0, 0.66).ok(), Some("A"));
        assert_eq!(key(0.0, 0.67).ok(), Some("Z"));
    }

    #[test]
    fn test_largest_value_below_one() {
        let almost_one = 1.0 - f64::EPSILON;
        assert_eq!(key(almost_one, almost_one).ok(), Some("M"));
    }

    #[test]
    fn test_one_is_out_of_range() {
        assert!(matches!(key(1.0, 0.0), Err(GazeError::MappingOutOfRange { .. })));
        assert!(matches!(key(0.0, 1.0), Err(GazeError::MappingOutOfRange { .. })));
    }

    #[test]
    fn test_negative_is_out_of_range() {
        assert!(matches!(key(-0.01, 0.5), Err(GazeError::MappingOutOfRange { .. })));
        assert!(matches!(key(0.5, -0.5), Err(GazeError::MappingOutOfRange { .. })));
    }

    #[test]
    fn test_non_finite_is_out_of_range() {
        assert!(key(f64::NAN, 0.5).is_err());
        assert!(key(0.5, f64::INFINITY).is_err());
        assert!(key(f64::NEG_INFINITY, 0.5).is_err());
    }

    #[test]
    fn test_out_of_range_error_carries_point() {
        match key(1.5, 0.25) {
            Err(GazeError::MappingOutOfRange { x, y }) => {
                assert!((x - 1.5).abs() < f64::EPSILON);
                assert!((y - 0.25).abs() < f64::EPSILON);
            }
            other => panic!("expected MappingOutOfRange, got {other:?}"),
        }
    }
}
