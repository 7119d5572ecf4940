//! Codec dispatch for JPEG, PNG and GIF output.
//!
//! Each format reads only its own parameter from [`SaveOptions`]: JPEG uses
//! the quality, PNG the compression level, GIF neither.

use std::io::Write;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use log::debug;

use super::options::SaveOptions;
use crate::types::{AlphaMode, ImageError, ImageResult, ImageType};

/// Encode `pixels` as `format` into `writer`.
///
/// `alpha` decides whether PNG keeps the alpha channel. JPEG always drops
/// it; GIF maps fully transparent pixels to its transparent index.
///
/// # Errors
///
/// - `InvalidParameter` if the options are out of range
/// - `EncodeFailure` if the codec or the writer fails
pub fn encode_to<W: Write + ?Sized>(
    writer: &mut W,
    pixels: &RgbaImage,
    format: ImageType,
    options: &SaveOptions,
    alpha: AlphaMode,
) -> ImageResult<()> {
    options.validate()?;

    let (width, height) = pixels.dimensions();
    match format {
        ImageType::Jpeg => {
            // The codec rejects quality 0
            let quality = options.jpeg_quality.clamp(1, 100);
            let rgb = strip_alpha(pixels);
            JpegEncoder::new_with_quality(&mut *writer, quality)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(encode_failure)?;
        }
        ImageType::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut *writer,
                png_compression_type(options.png_compression),
                FilterType::Adaptive,
            );
            if alpha.save_alpha {
                encoder
                    .write_image(pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
                    .map_err(encode_failure)?;
            } else {
                let rgb = strip_alpha(pixels);
                encoder
                    .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                    .map_err(encode_failure)?;
            }
        }
        ImageType::Gif => {
            // The trailer is written when the encoder drops at the end of this block
            let mut encoder = GifEncoder::new(&mut *writer);
            encoder
                .encode(pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(encode_failure)?;
        }
    }

    writer
        .flush()
        .map_err(|e| ImageError::EncodeFailure(e.to_string()))?;
    debug!("encoded {}x{} image as {}", width, height, format);
    Ok(())
}

/// Encode into a fresh byte vector.
pub fn encode_to_vec(
    pixels: &RgbaImage,
    format: ImageType,
    options: &SaveOptions,
    alpha: AlphaMode,
) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_to(&mut buffer, pixels, format, options, alpha)?;
    Ok(buffer)
}

/// Map the 0..=9 PNG compression scale onto the codec's presets.
pub fn png_compression_type(level: u8) -> CompressionType {
    match level {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn strip_alpha(pixels: &RgbaImage) -> Vec<u8> {
    pixels
        .as_raw()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect()
}

fn encode_failure(e: image::ImageError) -> ImageError {
    ImageError::EncodeFailure(e.to_string())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Encoding is deterministic for every format.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=16, 1u32..=16),
            quality in 1u8..=100,
            seed in any::<u8>(),
        ) {
            let img = RgbaImage::from_fn(width, height, |x, y| {
                let v = seed.wrapping_add((x * 7 + y * 13) as u8);
                image::Rgba([v, v / 2, 255 - v, 255])
            });
            let options = SaveOptions::new().with_jpeg_quality(quality);
            for format in [ImageType::Jpeg, ImageType::Png, ImageType::Gif] {
                let a = encode_to_vec(&img, format, &options, AlphaMode::compositing()).unwrap();
                let b = encode_to_vec(&img, format, &options, AlphaMode::compositing()).unwrap();
                prop_assert_eq!(a, b);
            }
        }

        /// JPEG output always carries SOI and EOI markers.
        #[test]
        fn prop_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=100,
        ) {
            let img = RgbaImage::from_pixel(width, height, image::Rgba([128, 128, 128, 255]));
            let options = SaveOptions::new().with_jpeg_quality(quality);
            let bytes = encode_to_vec(&img, ImageType::Jpeg, &options, AlphaMode::compositing()).unwrap();
            prop_assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
        }
    }
}
