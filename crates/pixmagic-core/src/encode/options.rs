//! Encoding parameters and destinations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{ImageError, ImageResult, TargetFormat};

/// Highest JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Highest PNG compression level.
pub const MAX_PNG_COMPRESSION: u8 = 9;

/// Parameters for `save`, `encode` and `output`.
///
/// Only the parameter of the resolved format is used: JPEG ignores
/// `png_compression` and PNG ignores `jpeg_quality`. GIF takes neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Target format; `Inherit` reuses the format detected at load.
    pub format: TargetFormat,
    /// JPEG quality, 0 to 100 (best).
    pub jpeg_quality: u8,
    /// PNG compression, 0 (none, fastest) to 9 (smallest).
    pub png_compression: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: TargetFormat::Inherit,
            jpeg_quality: MAX_JPEG_QUALITY,
            png_compression: 0,
        }
    }
}

impl SaveOptions {
    /// Options that inherit the loaded format at maximum quality.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: impl Into<TargetFormat>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn with_png_compression(mut self, level: u8) -> Self {
        self.png_compression = level;
        self
    }

    /// Check the per-format parameters are in range.
    pub fn validate(&self) -> ImageResult<()> {
        if self.jpeg_quality > MAX_JPEG_QUALITY {
            return Err(ImageError::InvalidParameter(format!(
                "JPEG quality {} is outside 0..={MAX_JPEG_QUALITY}",
                self.jpeg_quality
            )));
        }
        if self.png_compression > MAX_PNG_COMPRESSION {
            return Err(ImageError::InvalidParameter(format!(
                "PNG compression {} is outside 0..={MAX_PNG_COMPRESSION}",
                self.png_compression
            )));
        }
        Ok(())
    }
}

/// Where `save` writes the encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A file, created or truncated.
    File(PathBuf),
    /// The process's standard output.
    Stdout,
}

impl Destination {
    /// Build a destination from an optional path; no path, or an empty one,
    /// means standard output.
    pub fn from_optional_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if !p.as_os_str().is_empty() => Destination::File(p),
            _ => Destination::Stdout,
        }
    }
}

impl From<PathBuf> for Destination {
    fn from(path: PathBuf) -> Self {
        Destination::File(path)
    }
}

impl From<&Path> for Destination {
    fn from(path: &Path) -> Self {
        Destination::File(path.to_path_buf())
    }
}
