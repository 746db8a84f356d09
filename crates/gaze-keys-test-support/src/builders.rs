//! Synthetic frame builders for testing.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};

/// Builder for creating synthetic camera frames.
pub struct SyntheticFrameBuilder;

impl SyntheticFrameBuilder {
    /// Creates a high-contrast checkerboard pattern.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> DynamicImage {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates a left-to-right gradient from black to white.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn horizontal_gradient(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let t = f64::from(x) / f64::from(width.saturating_sub(1).max(1));
            Luma([(t * 255.0).round() as u8])
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates a uniform gray frame.
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    /// Creates a uniform color frame, like a webcam pointed at a wall.
    #[must_use]
    pub fn uniform_rgb(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
    }

    /// Encodes a frame as PNG.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails, which only happens for unsupported pixel types.
    #[must_use]
    pub fn png(image: &DynamicImage) -> Vec<u8> {
        Self::encode(image, ImageFormat::Png)
    }

    /// Encodes a frame as JPEG.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails.
    #[must_use]
    pub fn jpeg(image: &DynamicImage) -> Vec<u8> {
        Self::encode(&DynamicImage::ImageRgb8(image.to_rgb8()), ImageFormat::Jpeg)
    }

    #[allow(clippy::expect_used)]
    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, format)
            .expect("in-memory image encoding should not fail");
        buf.into_inner()
    }
}

/// Boundary used by [`multipart_body`].
pub const MULTIPART_BOUNDARY: &str = "gaze-keys-test-boundary";

/// Builds a `multipart/form-data` body with a single file field.
///
/// Returns the `Content-Type` header value and the body.
#[must_use]
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body,
    )
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_dimensions() {
        let img = SyntheticFrameBuilder::checkerboard(64, 48);
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }

    #[test]
    fn test_gradient_endpoints() {
        let img = SyntheticFrameBuilder::horizontal_gradient(16, 4).to_luma8();
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(15, 0).0[0], 255);
    }

    #[test]
    fn test_encoded_frames_decode() {
        let img = SyntheticFrameBuilder::uniform_rgb(20, 10, [10, 200, 30]);
        for bytes in [SyntheticFrameBuilder::png(&img), SyntheticFrameBuilder::jpeg(&img)] {
            let decoded = image::load_from_memory(&bytes).expect("decode frame");
            assert_eq!((decoded.width(), decoded.height()), (20, 10));
        }
    }

    #[test]
    fn test_multipart_body_shape() {
        let (content_type, body) = multipart_body("image", "frame.png", b"abc");
        assert!(content_type.ends_with(MULTIPART_BOUNDARY));
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"image\""));
        assert!(text.contains("\r\n\r\nabc\r\n"));
        assert!(text.ends_with("--\r\n"));
    }
}
