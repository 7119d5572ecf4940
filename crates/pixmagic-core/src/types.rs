//! Core types shared by the decode, encode and transform pipelines.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kinds reported by every image operation.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The source path does not exist or is a directory.
    #[error("No image file at {}", .0.display())]
    NotFound(PathBuf),

    /// The detected or requested format is not JPEG, PNG or GIF.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The operation needs a loaded image.
    #[error("No image loaded")]
    NotLoaded,

    /// A caller-supplied parameter is out of range or malformed.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The codec rejected the source bytes.
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    /// The codec or the destination could not produce output.
    #[error("Failed to encode image: {0}")]
    EncodeFailure(String),

    /// I/O error while reading the source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type ImageResult<T> = Result<T, ImageError>;

/// Encoded container formats the engine can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Gif,
}

impl ImageType {
    /// MIME subtype, e.g. `jpeg`.
    pub fn subtype(self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpeg",
            ImageType::Png => "png",
            ImageType::Gif => "gif",
        }
    }

    /// Full MIME type, e.g. `image/jpeg`.
    pub fn mime(self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Gif => "image/gif",
        }
    }

    /// Convert to the image crate's format tag.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageType::Jpeg => image::ImageFormat::Jpeg,
            ImageType::Png => image::ImageFormat::Png,
            ImageType::Gif => image::ImageFormat::Gif,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subtype())
    }
}

impl FromStr for ImageType {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageType::Jpeg),
            "png" => Ok(ImageType::Png),
            "gif" => Ok(ImageType::Gif),
            _ => Err(ImageError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Target format for encoding.
///
/// `Inherit` reuses the format detected at load time; an image that was never
/// decoded from a file has nothing to inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    Inherit,
    #[serde(untagged)]
    Explicit(ImageType),
}

impl TargetFormat {
    /// Resolve against the format stored on the image.
    pub fn resolve(self, stored: Option<ImageType>) -> ImageResult<ImageType> {
        match self {
            TargetFormat::Explicit(kind) => Ok(kind),
            TargetFormat::Inherit => stored.ok_or_else(|| {
                ImageError::UnsupportedFormat("inherit (no format detected at load)".to_string())
            }),
        }
    }
}

impl From<ImageType> for TargetFormat {
    fn from(kind: ImageType) -> Self {
        TargetFormat::Explicit(kind)
    }
}

impl FromStr for TargetFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("inherit") {
            Ok(TargetFormat::Inherit)
        } else {
            s.parse().map(TargetFormat::Explicit)
        }
    }
}

/// Reflection axis for [`crate::RasterImage::flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-to-right.
    #[serde(alias = "h")]
    Horizontal,
    /// Mirror top-to-bottom.
    #[serde(alias = "v")]
    Vertical,
    /// Horizontal then vertical.
    Both,
}

impl FromStr for FlipAxis {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" | "horizontal" => Ok(FlipAxis::Horizontal),
            "v" | "vertical" => Ok(FlipAxis::Vertical),
            "both" => Ok(FlipAxis::Both),
            other => Err(ImageError::InvalidParameter(format!(
                "unknown flip axis '{other}' (expected h, horizontal, v, vertical or both)"
            ))),
        }
    }
}

/// Alpha configuration recorded on a buffer.
///
/// `blending` records whether the buffer was left in compositing mode (after
/// load and rotate) or overwrite mode (after flip); it is reported through
/// `RasterImage::alpha_mode` and no engine draw composites. `save_alpha`
/// decides whether encoders that can store transparency keep the alpha
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaMode {
    pub blending: bool,
    pub save_alpha: bool,
}

impl AlphaMode {
    /// Configuration after load and rotate.
    pub const fn compositing() -> Self {
        Self {
            blending: true,
            save_alpha: true,
        }
    }

    /// Configuration of a flip destination: transparent pixels copy through.
    pub const fn overwrite() -> Self {
        Self {
            blending: false,
            save_alpha: true,
        }
    }
}

impl Default for AlphaMode {
    fn default() -> Self {
        Self::compositing()
    }
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Attach an 8-bit alpha sample.
    pub fn with_alpha(self, alpha: u8) -> image::Rgba<u8> {
        image::Rgba([self.red, self.green, self.blue, alpha])
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_type_aliases() {
        assert_eq!("jpg".parse::<ImageType>().unwrap(), ImageType::Jpeg);
        assert_eq!("jpeg".parse::<ImageType>().unwrap(), ImageType::Jpeg);
        assert_eq!("PNG".parse::<ImageType>().unwrap(), ImageType::Png);
        assert_eq!("gif".parse::<ImageType>().unwrap(), ImageType::Gif);
    }

    #[test]
    fn test_image_type_unknown() {
        let err = "bmp".parse::<ImageType>().unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedFormat(ref s) if s == "bmp"));
    }

    #[test]
    fn test_image_type_mime() {
        assert_eq!(ImageType::Jpeg.mime(), "image/jpeg");
        assert_eq!(ImageType::Png.mime(), "image/png");
        assert_eq!(ImageType::Gif.subtype(), "gif");
    }

    #[test]
    fn test_target_format_parse() {
        assert_eq!("inherit".parse::<TargetFormat>().unwrap(), TargetFormat::Inherit);
        assert_eq!(
            "jpg".parse::<TargetFormat>().unwrap(),
            TargetFormat::Explicit(ImageType::Jpeg)
        );
        assert!("tiff".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_target_format_resolve() {
        assert_eq!(
            TargetFormat::Inherit.resolve(Some(ImageType::Gif)).unwrap(),
            ImageType::Gif
        );
        assert_eq!(
            TargetFormat::Explicit(ImageType::Png).resolve(None).unwrap(),
            ImageType::Png
        );
        assert!(matches!(
            TargetFormat::Inherit.resolve(None),
            Err(ImageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_target_format_serde() {
        let inherit: TargetFormat = serde_json::from_str("\"inherit\"").unwrap();
        assert_eq!(inherit, TargetFormat::Inherit);
        let png: TargetFormat = serde_json::from_str("\"png\"").unwrap();
        assert_eq!(png, TargetFormat::Explicit(ImageType::Png));
    }

    #[test]
    fn test_flip_axis_parse() {
        assert_eq!("h".parse::<FlipAxis>().unwrap(), FlipAxis::Horizontal);
        assert_eq!("horizontal".parse::<FlipAxis>().unwrap(), FlipAxis::Horizontal);
        assert_eq!("v".parse::<FlipAxis>().unwrap(), FlipAxis::Vertical);
        assert_eq!("vertical".parse::<FlipAxis>().unwrap(), FlipAxis::Vertical);
        assert_eq!("both".parse::<FlipAxis>().unwrap(), FlipAxis::Both);
        assert!(matches!(
            "diagonal".parse::<FlipAxis>(),
            Err(ImageError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_alpha_modes() {
        assert!(AlphaMode::compositing().blending);
        assert!(!AlphaMode::overwrite().blending);
        assert!(AlphaMode::overwrite().save_alpha);
        assert_eq!(AlphaMode::default(), AlphaMode::compositing());
    }

    #[test]
    fn test_error_display() {
        let err = ImageError::InvalidParameter("width must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: width must be positive");
        assert_eq!(ImageError::NotLoaded.to_string(), "No image loaded");
    }
}
