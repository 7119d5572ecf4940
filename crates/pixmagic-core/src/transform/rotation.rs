//! Counter-clockwise rotation with background fill.
//!
//! Multiples of 90° are exact pixel remaps. Any other angle expands the canvas
//! to the rotated bounding box and fills it by inverse mapping: for each
//! destination pixel we compute the source position and interpolate. Samples
//! that fall outside the source read the fill color, so the corners exposed by
//! the rotation take the background and the edges blend into it.
//!
//! In image coordinates (y down) a visual counter-clockwise rotation by θ has
//! the inverse transform:
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! where `(dx, dy)` is the destination pixel center relative to the
//! destination center.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::resize::fits_buffer;

/// Interpolation filter for arbitrary-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

const RIGHT_ANGLE_TOLERANCE: f64 = 1e-9;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```ignore
/// use pixmagic_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    if let Some(quarter) = quarter_turns(angle_degrees) {
        return if quarter % 2 == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate `image` counter-clockwise by `angle_degrees`.
///
/// Returns `None` when the geometry is unusable: a non-finite angle, an empty
/// source, or a destination too large to allocate.
pub fn rotate_ccw(
    image: &RgbaImage,
    angle_degrees: f64,
    fill: Rgba<u8>,
    filter: InterpolationFilter,
) -> Option<RgbaImage> {
    if !angle_degrees.is_finite() || image.width() == 0 || image.height() == 0 {
        return None;
    }

    // image's rotate90 turns clockwise, so a counter-clockwise quarter is rotate270
    match quarter_turns(angle_degrees) {
        Some(0) => return Some(image.clone()),
        Some(1) => return Some(image::imageops::rotate270(image)),
        Some(2) => return Some(image::imageops::rotate180(image)),
        Some(3) => return Some(image::imageops::rotate90(image)),
        _ => {}
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), angle_degrees);
    if !fits_buffer(dst_w, dst_h) {
        return None;
    }

    Some(rotate_interpolated(image, angle_degrees, (dst_w, dst_h), fill, filter))
}

/// Number of quarter turns if `angle_degrees` is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let quarters = (normalized / 90.0).round();
    if (normalized - quarters * 90.0).abs() < RIGHT_ANGLE_TOLERANCE {
        Some(quarters as u32 % 4)
    } else {
        None
    }
}

fn rotate_interpolated(
    image: &RgbaImage,
    angle_degrees: f64,
    (dst_w, dst_h): (u32, u32),
    fill: Rgba<u8>,
    filter: InterpolationFilter,
) -> RgbaImage {
    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width() as f64 / 2.0;
    let src_cy = image.height() as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    RgbaImage::from_fn(dst_w, dst_h, |dst_x, dst_y| {
        let dx = dst_x as f64 + 0.5 - dst_cx;
        let dy = dst_y as f64 + 0.5 - dst_cy;

        // Back to pixel-index space of the source
        let src_x = dx * cos - dy * sin + src_cx - 0.5;
        let src_y = dx * sin + dy * cos + src_cy - 0.5;

        match filter {
            InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, fill),
            InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y, fill),
        }
    })
}

/// Read a source pixel as f64 channels, or the fill color outside the image.
#[inline]
fn pixel_or_fill(image: &RgbaImage, px: i64, py: i64, fill: Rgba<u8>) -> [f64; 4] {
    let p = if px >= 0 && py >= 0 && px < image.width() as i64 && py < image.height() as i64 {
        *image.get_pixel(px as u32, py as u32)
    } else {
        fill
    };
    [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights their
/// contribution based on distance.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64, fill: Rgba<u8>) -> Rgba<u8> {
    let (w, h) = (image.width() as f64, image.height() as f64);
    if x <= -1.0 || y <= -1.0 || x >= w || y >= h {
        return fill;
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = pixel_or_fill(image, x0, y0, fill);
    let p10 = pixel_or_fill(image, x0 + 1, y0, fill);
    let p01 = pixel_or_fill(image, x0, y0 + 1, fill);
    let p11 = pixel_or_fill(image, x0 + 1, y0 + 1, fill);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Rgba(result)
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood. Near the border, where part of that
/// neighborhood is background, it falls back to bilinear.
fn sample_lanczos3(image: &RgbaImage, x: f64, y: f64, fill: Rgba<u8>) -> Rgba<u8> {
    let (w, h) = (image.width() as i64, image.height() as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y, fill);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = pixel_or_fill(image, px, py, fill);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for i in 0..4 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    Rgba(result)
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
