//! Command line arguments and their translation into edit operations.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use pixmagic_core::{
    parse_hex_color, EditOp, FlipAxis, HexFallback, Recipe, SaveOptions, TargetFormat,
};

#[derive(Debug, Parser)]
#[command(name = "pixmagic", version, about = "Load, edit and re-encode JPEG, PNG and GIF images")]
#[command(group(ArgGroup::new("destination").required(true).args(["out", "stdout", "print_recipe"])))]
pub struct Args {
    /// Source image; the format is detected from its content
    pub input: PathBuf,

    /// JSON recipe whose ops run before any flag-driven edit
    #[arg(long, value_name = "FILE")]
    pub recipe: Option<PathBuf>,

    /// Resize to exactly WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub resize: Option<(u32, u32)>,

    /// Resize to this width, keeping the aspect ratio
    #[arg(long, value_name = "N")]
    pub width: Option<u32>,

    /// Resize to this height, keeping the aspect ratio
    #[arg(long, value_name = "N")]
    pub height: Option<u32>,

    /// Mirror along h, v or both
    #[arg(long, value_name = "AXIS")]
    pub flip: Option<FlipAxis>,

    /// Rotate clockwise by this many degrees
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub rotate: Option<i32>,

    /// Fill color for corners exposed by --rotate
    #[arg(long, value_name = "HEX", default_value = "ffffff")]
    pub background: String,

    /// Fill translucency for --rotate, 0 (opaque) to 127 (transparent)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub alpha: u8,

    /// Reject malformed --background colors instead of using white
    #[arg(long)]
    pub strict_colors: bool,

    /// Convert to greyscale
    #[arg(long)]
    pub grey: bool,

    /// Invert colors
    #[arg(long)]
    pub negate: bool,

    /// Brightness shift, -255 to 255
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Contrast level, -255 to 255 (positive flattens)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub contrast: Option<i32>,

    /// Apply one Gaussian blur pass
    #[arg(long)]
    pub blur: bool,

    /// Output format: inherit, jpg, jpeg, png or gif
    #[arg(long, value_name = "F")]
    pub format: Option<TargetFormat>,

    /// JPEG quality, 0 to 100
    #[arg(long, value_name = "N")]
    pub quality: Option<u8>,

    /// PNG compression, 0 to 9
    #[arg(long, value_name = "N")]
    pub compression: Option<u8>,

    /// Write the result to this file
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Stream the result to stdout and exit
    #[arg(long)]
    pub stdout: bool,

    /// With --stdout, precede the image with a Content-type header
    #[arg(long)]
    pub cgi: bool,

    /// Print the effective recipe as JSON instead of editing
    #[arg(long)]
    pub print_recipe: bool,
}

impl Args {
    /// Combine the recipe file (if any) with the flags into one recipe.
    ///
    /// Recipe ops come first, then flag-driven ops in a fixed order. Save
    /// flags override the recipe's save options.
    pub fn effective_recipe(&self) -> Result<Recipe> {
        // An unset `--stdout` switch still satisfies clap's `requires`
        if self.cgi && !self.stdout {
            bail!("--cgi only applies together with --stdout");
        }

        let mut recipe = match &self.recipe {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading recipe {}", path.display()))?;
                Recipe::from_json(&json)
                    .with_context(|| format!("parsing recipe {}", path.display()))?
            }
            None => Recipe::default(),
        };

        recipe.ops.extend(self.flag_ops()?);
        recipe.save = self.save_options(recipe.save);
        Ok(recipe)
    }

    fn flag_ops(&self) -> Result<Vec<EditOp>> {
        let mut ops = Vec::new();

        if let Some((width, height)) = self.resize {
            ops.push(EditOp::Resize { width, height });
        }
        if let Some(width) = self.width {
            ops.push(EditOp::ResizeToWidth { width });
        }
        if let Some(height) = self.height {
            ops.push(EditOp::ResizeToHeight { height });
        }
        if let Some(axis) = self.flip {
            ops.push(EditOp::Flip { axis });
        }
        if let Some(angle) = self.rotate {
            if self.strict_colors {
                parse_hex_color(&self.background, HexFallback::Reject)
                    .context("invalid --background")?;
            }
            ops.push(EditOp::Rotate {
                angle,
                background: Some(self.background.clone()),
                alpha: Some(self.alpha),
            });
        }
        if self.grey {
            ops.push(EditOp::GreyScale);
        }
        if self.negate {
            ops.push(EditOp::ReverseColor);
        }
        if let Some(level) = self.brightness {
            ops.push(EditOp::Brightness { level });
        }
        if let Some(level) = self.contrast {
            ops.push(EditOp::Contrast { level });
        }
        if self.blur {
            ops.push(EditOp::Blur);
        }

        Ok(ops)
    }

    fn save_options(&self, base: SaveOptions) -> SaveOptions {
        let mut options = base;
        if let Some(format) = self.format {
            options = options.with_format(format);
        }
        if let Some(quality) = self.quality {
            options = options.with_jpeg_quality(quality);
        }
        if let Some(level) = self.compression {
            options = options.with_png_compression(level);
        }
        options
    }
}

/// Parse `WIDTHxHEIGHT`.
fn parse_size(s: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT, got '{s}'");
    };
    let width = w.trim().parse().with_context(|| format!("bad width in '{s}'"))?;
    let height = h.trim().parse().with_context(|| format!("bad height in '{s}'"))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixmagic_core::ImageType;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pixmagic").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480").unwrap(), (640, 480));
        assert_eq!(parse_size("10X2").unwrap(), (10, 2));
        assert!(parse_size("640").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn test_destination_required() {
        assert!(Args::try_parse_from(["pixmagic", "in.png"]).is_err());
        let both = ["pixmagic", "in.png", "--out", "a.png", "--stdout"];
        assert!(Args::try_parse_from(both).is_err());
    }

    #[test]
    fn test_cgi_requires_stdout() {
        let args = parse(&["in.png", "--out", "a.png", "--cgi"]);
        assert!(args.effective_recipe().is_err());

        let args = parse(&["in.png", "--print-recipe", "--cgi"]);
        assert!(args.effective_recipe().is_err());

        let args = parse(&["in.png", "--stdout", "--cgi"]);
        assert!(args.cgi);
        assert!(args.effective_recipe().is_ok());
    }

    #[test]
    fn test_flag_ops_fixed_order() {
        let args = parse(&[
            "in.png", "--blur", "--grey", "--rotate", "-90", "--flip", "both", "--width", "100",
            "--brightness", "-20", "--out", "o.png",
        ]);
        let recipe = args.effective_recipe().unwrap();
        assert_eq!(
            recipe.ops,
            vec![
                EditOp::ResizeToWidth { width: 100 },
                EditOp::Flip { axis: FlipAxis::Both },
                EditOp::Rotate {
                    angle: -90,
                    background: Some("ffffff".to_string()),
                    alpha: Some(0),
                },
                EditOp::GreyScale,
                EditOp::Brightness { level: -20 },
                EditOp::Blur,
            ]
        );
    }

    #[test]
    fn test_bad_flip_axis_rejected() {
        assert!(Args::try_parse_from(["pixmagic", "in.png", "--flip", "x", "--stdout"]).is_err());
    }

    #[test]
    fn test_strict_colors() {
        let args = parse(&[
            "in.png",
            "--rotate",
            "10",
            "--background",
            "ab",
            "--strict-colors",
            "--stdout",
        ]);
        assert!(args.effective_recipe().is_err());

        let args = parse(&["in.png", "--rotate", "10", "--background", "ab", "--stdout"]);
        assert!(args.effective_recipe().is_ok());
    }

    #[test]
    fn test_save_flags_override_recipe() {
        let path = std::env::temp_dir()
            .join(format!("pixmagic_cli_recipe_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"ops": [{"op": "blur"}], "save": {"format": "gif", "jpeg_quality": 40}}"#,
        )
        .unwrap();

        let args = parse(&[
            "in.png",
            "--recipe",
            path.to_str().unwrap(),
            "--negate",
            "--format",
            "jpg",
            "--stdout",
        ]);
        let recipe = args.effective_recipe().unwrap();
        assert_eq!(recipe.ops, vec![EditOp::Blur, EditOp::ReverseColor]);
        assert_eq!(recipe.save.format, TargetFormat::Explicit(ImageType::Jpeg));
        assert_eq!(recipe.save.jpeg_quality, 40);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_recipe_file() {
        let args = parse(&["in.png", "--recipe", "/nonexistent/pixmagic.json", "--stdout"]);
        assert!(args.effective_recipe().is_err());
    }
}
