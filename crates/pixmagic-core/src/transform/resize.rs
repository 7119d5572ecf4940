//! Resampling resize.
//!
//! Uses the `image` crate's separable filters. All filters average source
//! pixels, so downscales are anti-aliased and upscales interpolate; there is
//! deliberately no nearest-neighbour option.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::types::{ImageError, ImageResult};

/// Largest buffer, in pixels, a transform may allocate (1 GiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 28;

/// Whether a `width` x `height` RGBA buffer is within [`MAX_PIXELS`].
pub fn fits_buffer(width: u32, height: u32) -> bool {
    u64::from(width) * u64::from(height) <= MAX_PIXELS
}

/// Filter type for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Bilinear (triangle) filter.
    #[default]
    Bilinear,
    /// Catmull-Rom bicubic filter.
    CatmullRom,
    /// Lanczos3 windowed sinc, the sharpest option.
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resample `image` to exactly `width` x `height`.
///
/// The aspect ratio is not preserved; see [`scaled_dimension`] for the helper
/// used by the ratio-preserving variants.
///
/// # Errors
///
/// Returns `ImageError::InvalidParameter` if either dimension is zero or the
/// target exceeds [`MAX_PIXELS`].
pub fn resample(
    image: &RgbaImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> ImageResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidParameter(format!(
            "resize target {width}x{height} must be non-zero"
        )));
    }

    if !fits_buffer(width, height) {
        return Err(ImageError::InvalidParameter(format!(
            "resize target {width}x{height} exceeds {MAX_PIXELS} pixels"
        )));
    }

    // Fast path: same size
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    Ok(image::imageops::resize(
        image,
        width,
        height,
        filter.to_image_filter(),
    ))
}

/// Derive the other side of a ratio-preserving resize.
///
/// With `along` the current length of the constrained side and `across` the
/// current length of the other side, returns `round(target * across / along)`.
///
/// # Errors
///
/// `InvalidParameter` when `target` is zero or the derived side rounds to zero.
pub fn scaled_dimension(target: u32, along: u32, across: u32) -> ImageResult<u32> {
    if target == 0 {
        return Err(ImageError::InvalidParameter(
            "resize target must be positive".to_string(),
        ));
    }
    if along == 0 {
        return Err(ImageError::InvalidParameter(
            "source dimension is zero".to_string(),
        ));
    }

    let derived = (target as f64 * across as f64 / along as f64).round();

    if derived < 1.0 {
        return Err(ImageError::InvalidParameter(format!(
            "resizing to {target} collapses the other side of a {along}x{across} image to zero"
        )));
    }
    if derived > u32::MAX as f64 {
        return Err(ImageError::InvalidParameter(format!(
            "resizing to {target} overflows the other side"
        )));
    }

    Ok(derived as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn create_test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
                255,
            ])
        })
    }

    #[test]
    fn test_resample_basic() {
        let img = create_test_image(100, 80);
        let result = resample(&img, 50, 40, ResampleFilter::Bilinear).unwrap();
        assert_eq!(result.dimensions(), (50, 40));
    }

    #[test]
    fn test_resample_ignores_aspect_ratio() {
        let img = create_test_image(100, 80);
        let result = resample(&img, 10, 300, ResampleFilter::Lanczos3).unwrap();
        assert_eq!(result.dimensions(), (10, 300));
    }

    #[test]
    fn test_resample_same_size() {
        let img = create_test_image(20, 20);
        let result = resample(&img, 20, 20, ResampleFilter::Bilinear).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_resample_zero_dimension() {
        let img = create_test_image(20, 20);
        assert!(matches!(
            resample(&img, 0, 10, ResampleFilter::Bilinear),
            Err(ImageError::InvalidParameter(_))
        ));
        assert!(resample(&img, 10, 0, ResampleFilter::Bilinear).is_err());
    }

    #[test]
    fn test_resample_oversized_target() {
        let img = create_test_image(1, 1);
        assert!(matches!(
            resample(&img, u32::MAX, u32::MAX, ResampleFilter::Bilinear),
            Err(ImageError::InvalidParameter(_))
        ));
        assert!(resample(&img, 70_000, 70_000, ResampleFilter::Bilinear).is_err());
        assert!(resample(&img, u32::MAX, 1, ResampleFilter::Bilinear).is_err());
    }

    #[test]
    fn test_fits_buffer_bounds() {
        assert!(fits_buffer(1 << 14, 1 << 14));
        assert!(!fits_buffer((1 << 14) + 1, 1 << 14));
        assert!(fits_buffer(u32::MAX, 0));
    }

    #[test]
    fn test_downscale_averages() {
        // Checkerboard of black and white; a 2x downscale should land near grey
        let img = RgbaImage::from_fn(64, 64, |x, y| {
            let v = if (x + y) % 2 == 0 { 0 } else { 255 };
            Rgba([v, v, v, 255])
        });
        let result = resample(&img, 8, 8, ResampleFilter::Bilinear).unwrap();
        let px = result.get_pixel(4, 4);
        assert!(
            (96..=160).contains(&px[0]),
            "downscaled checkerboard should be grey, got {}",
            px[0]
        );
    }

    #[test]
    fn test_scaled_dimension_rounds() {
        // 300x200 resized to width 100 -> height 66.67 -> 67
        assert_eq!(scaled_dimension(100, 300, 200).unwrap(), 67);
        // 640x480 resized to height 240 -> width 320
        assert_eq!(scaled_dimension(240, 480, 640).unwrap(), 320);
        assert_eq!(scaled_dimension(50, 100, 100).unwrap(), 50);
    }

    #[test]
    fn test_scaled_dimension_collapse() {
        assert!(matches!(
            scaled_dimension(1, 1000, 1),
            Err(ImageError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_scaled_dimension_zero_target() {
        assert!(scaled_dimension(0, 10, 10).is_err());
    }
}
