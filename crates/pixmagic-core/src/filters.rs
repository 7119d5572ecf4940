//! Per-pixel color filters.
//!
//! Every filter mutates an RGBA buffer in place and leaves the alpha channel
//! untouched. Results are clamped to 0..=255 per channel after the filter is
//! applied, so extreme levels saturate instead of wrapping.

use image::RgbaImage;

use crate::luminance::luma_u8;

/// Lowest accepted brightness/contrast level.
pub const MIN_LEVEL: i32 = -255;

/// Highest accepted brightness/contrast level.
pub const MAX_LEVEL: i32 = 255;

/// 3x3 Gaussian kernel, normalized by [`GAUSSIAN_DIVISOR`].
const GAUSSIAN_KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
const GAUSSIAN_DIVISOR: u32 = 16;

/// Desaturate every pixel to its BT.601 grey level.
pub fn grayscale(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        let grey = luma_u8(px[0], px[1], px[2]);
        px[0] = grey;
        px[1] = grey;
        px[2] = grey;
    }
}

/// Invert every color channel.
pub fn negate(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
}

/// Add `level` to every color channel.
///
/// `level` is clamped to -255..=255 first.
pub fn brightness(image: &mut RgbaImage, level: i32) {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    if level == 0 {
        return;
    }
    for px in image.pixels_mut() {
        for c in &mut px.0[..3] {
            *c = (*c as i32 + level).clamp(0, 255) as u8;
        }
    }
}

/// Scale every color channel around mid-grey.
///
/// The scale factor is `((100 - level) / 100)^2`: 0 keeps the image, positive
/// levels flatten it toward grey (100 is uniform grey) and negative levels
/// push channels apart. `level` is clamped to -255..=255 first.
pub fn contrast(image: &mut RgbaImage, level: i32) {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    if level == 0 {
        return;
    }
    let factor = contrast_factor(level);

    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        let x = ((v as f64 / 255.0 - 0.5) * factor + 0.5) * 255.0;
        *out = x.clamp(0.0, 255.0).round() as u8;
    }

    for px in image.pixels_mut() {
        px[0] = lut[px[0] as usize];
        px[1] = lut[px[1] as usize];
        px[2] = lut[px[2] as usize];
    }
}

/// One pass of a 3x3 Gaussian blur. Border pixels reuse the nearest edge sample.
pub fn gaussian_blur(image: &mut RgbaImage) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let src = image.clone();

    for y in 0..h {
        for x in 0..w {
            let mut sum = [0u32; 3];
            for (ky, row) in GAUSSIAN_KERNEL.iter().enumerate() {
                let sy = (y as i64 + ky as i64 - 1).clamp(0, h as i64 - 1) as u32;
                for (kx, weight) in row.iter().enumerate() {
                    let sx = (x as i64 + kx as i64 - 1).clamp(0, w as i64 - 1) as u32;
                    let p = src.get_pixel(sx, sy);
                    sum[0] += p[0] as u32 * weight;
                    sum[1] += p[1] as u32 * weight;
                    sum[2] += p[2] as u32 * weight;
                }
            }
            let px = image.get_pixel_mut(x, y);
            px[0] = (sum[0] / GAUSSIAN_DIVISOR) as u8;
            px[1] = (sum[1] / GAUSSIAN_DIVISOR) as u8;
            px[2] = (sum[2] / GAUSSIAN_DIVISOR) as u8;
        }
    }
}

#[inline]
fn contrast_factor(level: i32) -> f64 {
    let f = (100.0 - level as f64) / 100.0;
    f * f
}
