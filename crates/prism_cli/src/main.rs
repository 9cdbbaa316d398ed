use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use prism_renderer::{render, render_parallel, ImageBuffer, RenderConfig, Scene};

mod cli;
mod scenes;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let (scene, mut config) = match &args.scene {
        Some(path) => load(path)?,
        None => {
            log::info!("No scene file given, rendering the built-in demo");
            (
                scenes::demo_scene().context("Failed to build demo scene")?,
                RenderConfig::default(),
            )
        }
    };
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    config.validate().context("Invalid render settings")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let image = if args.serial {
        render(&scene, &config)
    } else {
        render_parallel(&scene, &config, args.bucket_size)
    };

    save(&image, &args.output)?;
    log::info!("Saved {}", args.output.display());
    Ok(())
}

/// Load a scene file and the render settings it carries.
fn load(path: &Path) -> Result<(Scene, RenderConfig)> {
    let description = prism_core::load_scene(path)
        .with_context(|| format!("Failed to load scene {}", path.display()))?;
    let scene = Scene::from_description(&description)
        .with_context(|| format!("Invalid scene {}", path.display()))?;

    let mut config = RenderConfig::default();
    config.apply(&description.render);
    Ok((scene, config))
}

fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_bytes())
        .context("Image buffer size does not match its dimensions")?;
    rgb.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
