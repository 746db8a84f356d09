//! Image preprocessing: encoded bytes to the model's 64x64 grayscale input.

#![allow(clippy::cast_possible_truncation)]

use image::imageops::{self, FilterType};
use image::DynamicImage;

use crate::domain::{GazeError, GazeFrame, FRAME_SIZE};

/// Decodes an encoded image (JPEG, PNG, ...) from memory.
///
/// # Errors
///
/// Returns [`GazeError::InvalidImage`] if the bytes cannot be decoded or the
/// image has no pixels.
pub fn decode_frame(bytes: &[u8]) -> Result<DynamicImage, GazeError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| GazeError::InvalidImage(e.to_string()))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(GazeError::InvalidImage("image has no pixels".to_string()));
    }

    Ok(image)
}

/// Converts a decoded image into a model input frame.
///
/// Converts to luminance, resizes to `FRAME_SIZE x FRAME_SIZE` with bilinear
/// filtering, then rescales samples from `[0, 255]` to `[0.0, 1.0]`.
#[must_use]
pub fn preprocess(image: &DynamicImage) -> GazeFrame {
    let gray = image.to_luma8();
    let resized = imageops::resize(
        &gray,
        FRAME_SIZE as u32,
        FRAME_SIZE as u32,
        FilterType::Triangle,
    );

    let data: Vec<f32> = resized.pixels().map(|p| f32::from(p[0]) / 255.0).collect();

    GazeFrame::from_resized(data)
}

/// Decodes and preprocesses an encoded image in one step.
///
/// # Errors
///
/// Returns [`GazeError::InvalidImage`] if the bytes cannot be decoded.
pub fn preprocess_bytes(bytes: &[u8]) -> Result<GazeFrame, GazeError> {
    decode_frame(bytes).map(|image| preprocess(&image))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, format)
            .expect("encode frame");
        buf.into_inner()
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_output_shape_for_various_sizes() {
        for (w, h) in [(1, 1), (64, 64), (640, 480), (31, 257)] {
            let frame = preprocess(&gradient(w, h));
            assert_eq!(frame.samples().len(), FRAME_SIZE * FRAME_SIZE, "{w}x{h}");
        }
    }

    #[test]
    fn test_values_normalized() {
        let frame = preprocess(&gradient(300, 200));
        assert!(frame.samples().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_white_and_black_extremes() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([255, 255, 255])));
        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([0, 0, 0])));

        assert!(preprocess(&white).samples().iter().all(|v| (*v - 1.0).abs() < 1e-6));
        assert!(preprocess(&black).samples().iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn test_deterministic_for_same_bytes() {
        let bytes = encode(&gradient(120, 90), ImageFormat::Png);
        let a = preprocess_bytes(&bytes).expect("preprocess");
        let b = preprocess_bytes(&bytes).expect("preprocess");
        assert_eq!(a, b);
    }

    #[test]
    fn test_decodes_jpeg() {
        let bytes = encode(&gradient(80, 60), ImageFormat::Jpeg);
        assert!(preprocess_bytes(&bytes).is_ok());
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = preprocess_bytes(b"definitely not an image");
        assert!(matches!(result, Err(GazeError::InvalidImage(_))));
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert!(matches!(preprocess_bytes(&[]), Err(GazeError::InvalidImage(_))));
    }

    #[test]
    fn test_truncated_png_rejected() {
        let bytes = encode(&gradient(64, 64), ImageFormat::Png);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(preprocess_bytes(truncated), Err(GazeError::InvalidImage(_))));
    }
}
