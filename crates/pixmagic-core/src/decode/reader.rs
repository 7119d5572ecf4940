//! File and byte decoding into RGBA buffers.

use std::io::{Cursor, ErrorKind};
use std::path::Path;

use image::{ImageReader, RgbaImage};
use log::debug;

use super::sniff::{detect_format, Sniffed};
use crate::types::{ImageError, ImageResult, ImageType};

/// A decoded image: RGBA8 pixels plus the format the bytes were in.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub pixels: RgbaImage,
    pub format: ImageType,
}

/// Decode the image stored at `path`.
///
/// # Errors
///
/// - `NotFound` if `path` does not exist or is a directory
/// - `UnsupportedFormat` if the content is not JPEG, PNG or GIF
/// - `DecodeFailure` if the codec rejects the bytes
/// - `Io` for any other read error
pub fn decode_file(path: &Path) -> ImageResult<Decoded> {
    if !path.exists() || path.is_dir() {
        return Err(ImageError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImageError::NotFound(path.to_path_buf()),
        _ => ImageError::Io(e),
    })?;

    debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_bytes(&bytes)
}

/// Decode in-memory image bytes, picking the codec from the content.
pub fn decode_bytes(bytes: &[u8]) -> ImageResult<Decoded> {
    let format = match detect_format(bytes) {
        Sniffed::Supported(kind) => kind,
        other => return Err(ImageError::UnsupportedFormat(other.mime().to_string())),
    };

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| ImageError::DecodeFailure(e.to_string()))?;

    let pixels = img.into_rgba8();
    debug!(
        "decoded {} image {}x{}",
        format,
        pixels.width(),
        pixels.height()
    );

    Ok(Decoded { pixels, format })
}
