//! Serializable edit recipes.
//!
//! A recipe is a JSON document listing edit operations and the options used
//! to save the result:
//!
//! ```json
//! {
//!   "ops": [
//!     { "op": "resize_to_width", "width": 800 },
//!     { "op": "rotate", "angle": 90, "background": "#000" },
//!     { "op": "grey_scale" }
//!   ],
//!   "save": { "format": "png", "png_compression": 6 }
//! }
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::hex_to_rgb;
use crate::encode::SaveOptions;
use crate::raster::{RasterImage, RotateOptions};
use crate::types::{FlipAxis, ImageError, ImageResult};

/// One edit step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Resize {
        width: u32,
        height: u32,
    },
    ResizeToWidth {
        width: u32,
    },
    ResizeToHeight {
        height: u32,
    },
    Flip {
        axis: FlipAxis,
    },
    Rotate {
        angle: i32,
        /// Hex fill color, parsed leniently. White when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<String>,
        /// Translucency of the fill, 0..=127.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha: Option<u8>,
    },
    GreyScale,
    ReverseColor,
    Brightness {
        level: i32,
    },
    Contrast {
        level: i32,
    },
    Blur,
}

impl EditOp {
    /// Short name used in logs and error context.
    pub fn name(&self) -> &'static str {
        match self {
            EditOp::Resize { .. } => "resize",
            EditOp::ResizeToWidth { .. } => "resize_to_width",
            EditOp::ResizeToHeight { .. } => "resize_to_height",
            EditOp::Flip { .. } => "flip",
            EditOp::Rotate { .. } => "rotate",
            EditOp::GreyScale => "grey_scale",
            EditOp::ReverseColor => "reverse_color",
            EditOp::Brightness { .. } => "brightness",
            EditOp::Contrast { .. } => "contrast",
            EditOp::Blur => "blur",
        }
    }

    /// Range checks on `alpha` are left to `RasterImage::rotate`.
    fn rotate_options(background: Option<&str>, alpha: Option<u8>) -> RotateOptions {
        let options = RotateOptions::new().with_alpha(alpha.unwrap_or(0));
        match background {
            Some(hex) => options.with_background(hex_to_rgb(hex)),
            None => options,
        }
    }
}

impl RasterImage {
    /// Run a single edit step.
    pub fn apply(&mut self, op: &EditOp) -> ImageResult<()> {
        trace!("applying {op:?}");
        match op {
            EditOp::Resize { width, height } => self.resize(*width, *height),
            EditOp::ResizeToWidth { width } => self.resize_to_width(*width),
            EditOp::ResizeToHeight { height } => self.resize_to_height(*height),
            EditOp::Flip { axis } => self.flip(*axis),
            EditOp::Rotate {
                angle,
                background,
                alpha,
            } => {
                let options = EditOp::rotate_options(background.as_deref(), *alpha);
                self.rotate(*angle, &options)
            }
            EditOp::GreyScale => self.grey_scale(),
            EditOp::ReverseColor => self.reverse_color(),
            EditOp::Brightness { level } => self.set_brightness(*level),
            EditOp::Contrast { level } => self.set_contrast(*level),
            EditOp::Blur => self.set_blur(),
        }
    }
}

/// A list of edit steps plus the options for saving the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub ops: Vec<EditOp>,
    pub save: SaveOptions,
}

impl Recipe {
    /// Parse a recipe from JSON.
    pub fn from_json(json: &str) -> ImageResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ImageError::InvalidParameter(format!("malformed recipe: {e}")))
    }

    pub fn to_json(&self) -> ImageResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ImageError::InvalidParameter(format!("unserializable recipe: {e}")))
    }

    /// Apply every op in order, stopping at the first failure.
    ///
    /// On failure the image keeps the state left by the last successful op.
    pub fn apply_all(&self, image: &mut RasterImage) -> ImageResult<()> {
        for (index, op) in self.ops.iter().enumerate() {
            image.apply(op).map_err(|e| {
                debug!("recipe stopped at op {index} ({}): {e}", op.name());
                e
            })?;
        }
        debug!("applied {} recipe ops", self.ops.len());
        Ok(())
    }
}
