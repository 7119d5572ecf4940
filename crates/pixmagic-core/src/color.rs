//! Hexadecimal color parsing and translucency conversion.
//!
//! Colors arrive as `rrggbb` or short `rgb` strings, with or without a leading
//! `#`. The lenient parser never fails: a string of any other length yields
//! white. Callers that want malformed input rejected pick
//! [`HexFallback::Reject`].

use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{ImageError, ImageResult, Rgb};

/// Largest value on the 0 (opaque) to 127 (transparent) translucency scale.
pub const MAX_TRANSLUCENCY: u8 = 127;

/// What to do with a hex string that is not 3 or 6 hex digits long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexFallback {
    /// Substitute white.
    #[default]
    White,
    /// Fail with `InvalidParameter`.
    Reject,
}

/// Parse a hex color leniently.
///
/// # Example
///
/// ```ignore
/// use pixmagic_core::color::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#f80"), Rgb::new(255, 136, 0));
/// assert_eq!(hex_to_rgb("ab"), Rgb::WHITE);
/// ```
pub fn hex_to_rgb(color: &str) -> Rgb {
    let digits = color.strip_prefix('#').unwrap_or(color);
    let chars: Vec<char> = digits.chars().collect();

    let channels: [String; 3] = match chars.len() {
        6 => [
            chars[0..2].iter().collect(),
            chars[2..4].iter().collect(),
            chars[4..6].iter().collect(),
        ],
        3 => [
            [chars[0], chars[0]].iter().collect(),
            [chars[1], chars[1]].iter().collect(),
            [chars[2], chars[2]].iter().collect(),
        ],
        _ => {
            warn!("hex color '{color}' is not 3 or 6 digits long, using white");
            return Rgb::WHITE;
        }
    };

    Rgb::new(
        lenient_hex_byte(&channels[0]),
        lenient_hex_byte(&channels[1]),
        lenient_hex_byte(&channels[2]),
    )
}

/// Parse a hex color with an explicit fallback policy.
pub fn parse_hex_color(color: &str, fallback: HexFallback) -> ImageResult<Rgb> {
    match fallback {
        HexFallback::White => Ok(hex_to_rgb(color)),
        HexFallback::Reject => strict_hex_to_rgb(color),
    }
}

/// Map the 0..=127 translucency scale onto an 8-bit alpha sample (255 = opaque).
pub fn alpha_to_u8(alpha: u8) -> ImageResult<u8> {
    if alpha > MAX_TRANSLUCENCY {
        return Err(ImageError::InvalidParameter(format!(
            "alpha {alpha} is outside 0..={MAX_TRANSLUCENCY}"
        )));
    }
    let opacity = (MAX_TRANSLUCENCY - alpha) as u32;
    Ok(((opacity * 255 + MAX_TRANSLUCENCY as u32 / 2) / MAX_TRANSLUCENCY as u32) as u8)
}

/// Accumulate the hex digits of a two-character channel, skipping anything
/// that is not a hex digit.
fn lenient_hex_byte(pair: &str) -> u8 {
    pair.chars()
        .filter_map(|c| c.to_digit(16))
        .fold(0u32, |acc, d| acc * 16 + d) as u8
}

fn strict_hex_to_rgb(color: &str) -> ImageResult<Rgb> {
    let digits = color.strip_prefix('#').unwrap_or(color);
    let invalid = || ImageError::InvalidParameter(format!("malformed hex color '{color}'"));

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        6 => digits.to_string(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
