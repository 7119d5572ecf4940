//! Luminance weights used by the greyscale filter.
//!
//! Uses the ITU-R BT.601 weights that classic raster libraries apply when
//! desaturating 8-bit sRGB data.

/// BT.601 weight of the red channel.
pub const LUMA_R: f32 = 0.299;

/// BT.601 weight of the green channel.
pub const LUMA_G: f32 = 0.587;

/// BT.601 weight of the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Grey level of an 8-bit RGB sample, truncated toward zero.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    lum.clamp(0.0, 255.0) as u8
}
