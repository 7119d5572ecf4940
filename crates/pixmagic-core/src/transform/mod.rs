//! Geometric transforms: resize, flip and rotation.
//!
//! Every transform reads a source buffer and returns a newly allocated one;
//! [`crate::RasterImage`] moves the result in place of the old buffer.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, rows are stored top to bottom
//! - [`rotate_ccw`] angles are in degrees, positive = counter-clockwise
//! - [`crate::RasterImage::rotate`] presents the clockwise contract on top of it

pub mod canvas;
mod flip;
mod resize;
mod rotation;

pub use flip::flip;
pub use resize::{fits_buffer, resample, scaled_dimension, ResampleFilter, MAX_PIXELS};
pub use rotation::{compute_rotated_bounds, rotate_ccw, InterpolationFilter};
