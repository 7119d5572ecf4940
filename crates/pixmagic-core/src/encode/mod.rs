//! Image encoding.
//!
//! This module provides functionality for:
//! - Encoding RGBA buffers to JPEG, PNG or GIF with per-format parameters
//! - Describing where a saved image goes ([`Destination`])
//!
//! # Examples
//!
//! ```ignore
//! use pixmagic_core::encode::{encode_to_vec, SaveOptions};
//!
//! let options = SaveOptions::new().with_jpeg_quality(90);
//! let bytes = encode_to_vec(&pixels, ImageType::Jpeg, &options, AlphaMode::compositing())?;
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod options;
mod writer;

pub use options::{Destination, SaveOptions, MAX_JPEG_QUALITY, MAX_PNG_COMPRESSION};
pub use writer::{encode_to, encode_to_vec, png_compression_type};
