//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use pixmagic_core::{Destination, ImageType, RasterImage, SaveOptions};

pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Path in the system temp dir, removed first so each test starts clean.
pub fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pixmagic_it_{}_{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

/// Opaque four-color quadrant image; few enough colors for a lossless GIF.
pub fn quadrants(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| match (x < width / 2, y < height / 2) {
        (true, true) => RED,
        (false, true) => GREEN,
        (true, false) => BLUE,
        (false, false) => WHITE,
    })
}

/// Write `pixels` as `format` to a fresh temp file.
pub fn write_fixture(name: &str, pixels: RgbaImage, format: ImageType) -> PathBuf {
    let path = temp_path(name);
    RasterImage::from_rgba(pixels)
        .unwrap()
        .save(
            &Destination::File(path.clone()),
            &SaveOptions::new().with_format(format),
        )
        .unwrap();
    path
}
