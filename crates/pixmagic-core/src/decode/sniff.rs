//! Content sniffing.
//!
//! Identifies an encoded image by the magic number at the start of its bytes.
//! The file name plays no part: a PNG saved as `photo.jpg` is a PNG.

use crate::types::ImageType;

/// Magic numbers for format detection
mod magic {
    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// GIF87a
    pub const GIF87A: &[u8] = b"GIF87a";

    /// GIF89a
    pub const GIF89A: &[u8] = b"GIF89a";

    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    /// WebP: RIFF....WEBP
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";

    /// ICO: 00 00 01 00
    pub const ICO: &[u8] = &[0x00, 0x00, 0x01, 0x00];
}

/// Outcome of sniffing a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    /// A format the engine decodes.
    Supported(ImageType),
    /// Anything else, identified by MIME type.
    Other(&'static str),
}

impl Sniffed {
    /// MIME type of the sniffed content.
    pub fn mime(self) -> &'static str {
        match self {
            Sniffed::Supported(kind) => kind.mime(),
            Sniffed::Other(mime) => mime,
        }
    }
}

/// Detect the format of encoded image bytes.
pub fn detect_format(data: &[u8]) -> Sniffed {
    if data.starts_with(magic::JPEG) {
        return Sniffed::Supported(ImageType::Jpeg);
    }
    if data.starts_with(magic::PNG) {
        return Sniffed::Supported(ImageType::Png);
    }
    if data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A) {
        return Sniffed::Supported(ImageType::Gif);
    }

    if data.starts_with(magic::BMP) {
        return Sniffed::Other("image/bmp");
    }
    if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        return Sniffed::Other("image/tiff");
    }
    if data.len() >= 12 && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP {
        return Sniffed::Other("image/webp");
    }
    if data.starts_with(magic::ICO) {
        return Sniffed::Other("image/vnd.microsoft.icon");
    }
    if data.is_empty() {
        return Sniffed::Other("application/x-empty");
    }

    Sniffed::Other("application/octet-stream")
}
