//! The editable raster image.
//!
//! A [`RasterImage`] starts empty. `load` fills it with an RGBA buffer and
//! remembers the detected format; transforms replace the buffer; `save`,
//! `encode` and `output` read it without mutating.

use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::{alpha_to_u8, parse_hex_color, HexFallback};
use crate::decode::{decode_bytes, decode_file, Decoded};
use crate::encode::{encode_to, encode_to_vec, Destination, SaveOptions};
use crate::filters;
use crate::output::{HeaderedStream, OutputSink, Rendered};
use crate::transform::{
    flip, resample, rotate_ccw, scaled_dimension, InterpolationFilter, ResampleFilter,
};
use crate::types::{AlphaMode, FlipAxis, ImageError, ImageResult, ImageType, Rgb};

/// Background and interpolation settings for [`RasterImage::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    /// Fill for the corners exposed by the rotation.
    pub background: Rgb,
    /// Translucency of the fill, 0 (opaque) to 127 (transparent).
    pub alpha: u8,
    pub filter: InterpolationFilter,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            alpha: 0,
            filter: InterpolationFilter::Bilinear,
        }
    }
}

impl RotateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background from a hex string.
    pub fn with_background_hex(mut self, hex: &str, fallback: HexFallback) -> ImageResult<Self> {
        self.background = parse_hex_color(hex, fallback)?;
        Ok(self)
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_filter(mut self, filter: InterpolationFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Debug, Clone)]
struct Canvas {
    pixels: RgbaImage,
    alpha: AlphaMode,
}

/// An owned RGBA pixel buffer plus the format it was decoded from.
#[derive(Debug, Clone, Default)]
pub struct RasterImage {
    canvas: Option<Canvas>,
    format: Option<ImageType>,
}

impl RasterImage {
    /// An empty, unloaded image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing buffer. The format stays unset, so saving needs an
    /// explicit target format.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the buffer has a zero dimension.
    pub fn from_rgba(pixels: RgbaImage) -> ImageResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ImageError::InvalidParameter(format!(
                "buffer {}x{} has no pixels",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self {
            canvas: Some(Canvas {
                pixels,
                alpha: AlphaMode::compositing(),
            }),
            format: None,
        })
    }

    /// Decode the file at `path`, detecting the format from its content.
    ///
    /// On failure the instance is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> ImageResult<()> {
        let decoded = decode_file(path.as_ref())?;
        self.install(decoded);
        Ok(())
    }

    /// Decode in-memory bytes.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> ImageResult<()> {
        let decoded = decode_bytes(bytes)?;
        self.install(decoded);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.canvas.is_some()
    }

    /// Width in pixels, 0 when nothing is loaded.
    pub fn width(&self) -> u32 {
        self.canvas.as_ref().map_or(0, |c| c.pixels.width())
    }

    /// Height in pixels, 0 when nothing is loaded.
    pub fn height(&self) -> u32 {
        self.canvas.as_ref().map_or(0, |c| c.pixels.height())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Format detected by the last successful load.
    pub fn format(&self) -> Option<ImageType> {
        self.format
    }

    pub fn alpha_mode(&self) -> Option<AlphaMode> {
        self.canvas.as_ref().map(|c| c.alpha)
    }

    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref().map(|c| &c.pixels)
    }

    pub fn into_pixels(self) -> Option<RgbaImage> {
        self.canvas.map(|c| c.pixels)
    }

    // ---- Encoding ----

    /// Encode and write to `destination`.
    ///
    /// The target format is resolved and the options validated before
    /// anything is written, so an unsupported request never touches the
    /// destination.
    pub fn save(&self, destination: &Destination, options: &SaveOptions) -> ImageResult<()> {
        let bytes = self.encode(options)?;
        match destination {
            Destination::File(path) => {
                std::fs::write(path, &bytes).map_err(|e| {
                    ImageError::EncodeFailure(format!("writing {}: {e}", path.display()))
                })?;
                debug!("saved {} bytes to {}", bytes.len(), path.display());
            }
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(&bytes)
                    .and_then(|()| stdout.flush())
                    .map_err(|e| ImageError::EncodeFailure(format!("writing stdout: {e}")))?;
                debug!("saved {} bytes to stdout", bytes.len());
            }
        }
        Ok(())
    }

    /// Encode into a byte vector.
    pub fn encode(&self, options: &SaveOptions) -> ImageResult<Vec<u8>> {
        let canvas = self.canvas()?;
        let format = self.target_format(options)?;
        encode_to_vec(&canvas.pixels, format, options, canvas.alpha)
    }

    /// Encode straight into `writer`.
    pub fn encode_to<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        options: &SaveOptions,
    ) -> ImageResult<()> {
        let canvas = self.canvas()?;
        let format = self.target_format(options)?;
        encode_to(writer, &canvas.pixels, format, options, canvas.alpha)
    }

    /// Render to `sink`: the content-type marker, then the encoded body.
    ///
    /// The marker names the MIME type of the target format in `options`,
    /// which is the loaded format only when the target is inherited.
    ///
    /// Fails with `NotLoaded` before anything reaches the sink. The returned
    /// token should be consumed with [`Rendered::halt`].
    pub fn output<S: OutputSink + ?Sized>(
        &self,
        sink: &mut S,
        options: &SaveOptions,
    ) -> ImageResult<Rendered> {
        let format = self.target_format(options)?;
        let bytes = self.encode(options)?;

        let write_failure = |e: std::io::Error| ImageError::EncodeFailure(e.to_string());
        sink.content_type(format.mime()).map_err(write_failure)?;
        let body = sink.body();
        body.write_all(&bytes).map_err(write_failure)?;
        body.flush().map_err(write_failure)?;

        Ok(Rendered::new(format.mime(), bytes.len()))
    }

    /// Render to stdout with a `Content-type` header and exit the process.
    ///
    /// Only returns on failure.
    pub fn output_and_exit(&self, options: &SaveOptions) -> ImageResult<Infallible> {
        let rendered = self.output(&mut HeaderedStream::stdout(), options)?;
        rendered.halt()
    }

    // ---- Geometry ----

    /// Resample to exactly `width` x `height` with the bilinear filter.
    pub fn resize(&mut self, width: u32, height: u32) -> ImageResult<()> {
        self.resize_with(width, height, ResampleFilter::default())
    }

    pub fn resize_with(
        &mut self,
        width: u32,
        height: u32,
        filter: ResampleFilter,
    ) -> ImageResult<()> {
        let canvas = self.canvas()?;
        let resized = resample(&canvas.pixels, width, height, filter)?;
        let alpha = canvas.alpha;
        self.replace(resized, alpha);
        Ok(())
    }

    /// Scale to `height`, deriving the width from the current aspect ratio.
    pub fn resize_to_height(&mut self, height: u32) -> ImageResult<()> {
        let (cur_w, cur_h) = self.canvas()?.pixels.dimensions();
        let width = scaled_dimension(height, cur_h, cur_w)?;
        self.resize(width, height)
    }

    /// Scale to `width`, deriving the height from the current aspect ratio.
    pub fn resize_to_width(&mut self, width: u32) -> ImageResult<()> {
        let (cur_w, cur_h) = self.canvas()?.pixels.dimensions();
        let height = scaled_dimension(width, cur_w, cur_h)?;
        self.resize(width, height)
    }

    /// Mirror the image. The new buffer keeps transparent pixels as they
    /// were and is left with blending off.
    pub fn flip(&mut self, axis: FlipAxis) -> ImageResult<()> {
        let flipped = flip(&self.canvas()?.pixels, axis);
        self.replace(flipped, AlphaMode::overwrite());
        Ok(())
    }

    /// Rotate clockwise by `angle` degrees. The sign is ignored.
    ///
    /// Corners exposed by the rotation take `options.background` at
    /// `options.alpha` translucency. On failure the buffer is unchanged.
    pub fn rotate(&mut self, angle: i32, options: &RotateOptions) -> ImageResult<()> {
        let fill = options.background.with_alpha(alpha_to_u8(options.alpha)?);
        let canvas = self.canvas()?;

        // The primitive turns counter-clockwise
        let ccw = 360 - angle.unsigned_abs() % 360;
        trace!("rotating {angle}° clockwise as {ccw}° counter-clockwise");

        let rotated = rotate_ccw(&canvas.pixels, f64::from(ccw), fill, options.filter)
            .ok_or_else(|| {
                ImageError::InvalidParameter(format!(
                    "cannot rotate a {}x{} image by {angle}°",
                    canvas.pixels.width(),
                    canvas.pixels.height()
                ))
            })?;
        self.replace(rotated, AlphaMode::compositing());
        Ok(())
    }

    // ---- Color filters ----

    pub fn grey_scale(&mut self) -> ImageResult<()> {
        filters::grayscale(&mut self.canvas_mut()?.pixels);
        Ok(())
    }

    pub fn reverse_color(&mut self) -> ImageResult<()> {
        filters::negate(&mut self.canvas_mut()?.pixels);
        Ok(())
    }

    /// Add `level` to every color channel; the level is clamped to -255..=255.
    pub fn set_brightness(&mut self, level: i32) -> ImageResult<()> {
        filters::brightness(&mut self.canvas_mut()?.pixels, level);
        Ok(())
    }

    /// Scale contrast; positive levels flatten, negative levels steepen.
    pub fn set_contrast(&mut self, level: i32) -> ImageResult<()> {
        filters::contrast(&mut self.canvas_mut()?.pixels, level);
        Ok(())
    }

    /// One pass of the 3x3 Gaussian kernel.
    pub fn set_blur(&mut self) -> ImageResult<()> {
        filters::gaussian_blur(&mut self.canvas_mut()?.pixels);
        Ok(())
    }

    fn canvas(&self) -> ImageResult<&Canvas> {
        self.canvas.as_ref().ok_or(ImageError::NotLoaded)
    }

    fn canvas_mut(&mut self) -> ImageResult<&mut Canvas> {
        self.canvas.as_mut().ok_or(ImageError::NotLoaded)
    }

    fn target_format(&self, options: &SaveOptions) -> ImageResult<ImageType> {
        self.canvas()?;
        options.validate()?;
        options.format.resolve(self.format)
    }

    fn install(&mut self, decoded: Decoded) {
        self.canvas = Some(Canvas {
            pixels: decoded.pixels,
            alpha: AlphaMode::compositing(),
        });
        self.format = Some(decoded.format);
    }

    fn replace(&mut self, pixels: RgbaImage, alpha: AlphaMode) {
        debug!(
            "replacing {}x{} buffer with {}x{}",
            self.width(),
            self.height(),
            pixels.width(),
            pixels.height()
        );
        // The previous buffer drops here
        self.canvas = Some(Canvas { pixels, alpha });
    }
}
