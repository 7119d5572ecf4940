//! Image decoding.
//!
//! This module provides functionality for:
//! - Sniffing the encoded format from file content
//! - Decoding JPEG, PNG and GIF into RGBA8 buffers
//!
//! # Examples
//!
//! ```ignore
//! use pixmagic_core::decode::decode_file;
//!
//! let decoded = decode_file(Path::new("photo.jpg"))?;
//! println!("Decoded {} {}x{}", decoded.format, decoded.pixels.width(), decoded.pixels.height());
//! ```

mod reader;
mod sniff;

pub use reader::{decode_bytes, decode_file, Decoded};
pub use sniff::{detect_format, Sniffed};
