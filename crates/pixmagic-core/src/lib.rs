//! Pixmagic Core - Raster image editing engine
//!
//! This crate loads JPEG, PNG and GIF images into an owned RGBA buffer,
//! applies geometric and color transforms, and writes the result to a file,
//! a writer, or a content-typed output stream.
//!
//! ```ignore
//! use std::path::Path;
//!
//! use pixmagic_core::{
//!     Destination, FlipAxis, ImageType, RasterImage, RotateOptions, SaveOptions,
//! };
//!
//! let mut img = RasterImage::new();
//! img.load("photo.jpg")?;
//! img.resize_to_width(800)?;
//! img.flip(FlipAxis::Horizontal)?;
//! img.rotate(90, &RotateOptions::default())?;
//!
//! let options = SaveOptions::new().with_format(ImageType::Png);
//! img.save(&Destination::from(Path::new("out.png")), &options)?;
//! ```

pub mod color;
pub mod decode;
pub mod encode;
pub mod filters;
pub mod luminance;
pub mod output;
pub mod raster;
pub mod recipe;
pub mod transform;
pub mod types;

pub use color::{hex_to_rgb, parse_hex_color, HexFallback};
pub use encode::{Destination, SaveOptions};
pub use output::{HeaderedStream, OutputSink, RawStream, Rendered};
pub use raster::{RasterImage, RotateOptions};
pub use recipe::{EditOp, Recipe};
pub use transform::{InterpolationFilter, ResampleFilter};
pub use types::{AlphaMode, FlipAxis, ImageError, ImageResult, ImageType, Rgb, TargetFormat};
