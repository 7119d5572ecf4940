mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pixmagic_core::{Destination, HeaderedStream, RasterImage, RawStream};

use crate::cli::Args;

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with image bytes on stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let recipe = args.effective_recipe()?;

    if args.print_recipe {
        println!("{}", recipe.to_json()?);
        return Ok(());
    }

    let mut image = RasterImage::new();
    image
        .load(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    info!(
        "loaded {} ({}x{}, {})",
        args.input.display(),
        image.width(),
        image.height(),
        image.format().map_or("unknown", |f| f.subtype())
    );

    for op in &recipe.ops {
        image
            .apply(op)
            .with_context(|| format!("applying {}", op.name()))?;
    }

    if args.stdout {
        let rendered = if args.cgi {
            image.output(&mut HeaderedStream::stdout(), &recipe.save)
        } else {
            image.output(&mut RawStream::stdout(), &recipe.save)
        }
        .context("writing image to stdout")?;
        rendered.halt();
    }

    if let Some(path) = args.out {
        image
            .save(&Destination::File(path.clone()), &recipe.save)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    }

    Ok(())
}
