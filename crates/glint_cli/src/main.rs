//! glint - render scene description files to PNG.
//!
//! ```text
//! glint [-s N] [-d W H] [-r DEPTH] [--debug] scene.txt [more.txt ...] out.png [copy.png ...]
//! ```
//!
//! Files ending in `.png` are outputs; every other file is a scene input.
//! Inputs are read in order as one scene, and the same image is written to
//! every output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_core::load_scene;
use glint_renderer::{render, RenderConfig, Scene, TraceSettings};

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Ray trace scene description files to PNG images", long_about = None)]
struct Cli {
    /// Scene files (.txt) and output images (.png)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Samples per pixel along each axis (N gives an NxN grid)
    #[arg(short, long, default_value_t = 2)]
    samples: u32,

    /// Output image dimensions
    #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [1000, 1000])]
    dims: Vec<u32>,

    /// Reflection recursion depth
    #[arg(short, long, default_value_t = 2)]
    recursion: i32,

    /// Shade by surface normal instead of lighting
    #[arg(long)]
    debug: bool,

    /// Test every element instead of using the BVH
    #[arg(long)]
    brute_force: bool,

    /// Seed for the anti-aliasing jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Validate `-d W H`: both positive, and the RGB buffer size fits in memory addressing.
fn image_dims(dims: &[u32]) -> Result<(u32, u32)> {
    let (width, height) = match dims {
        [w, h] if *w > 0 && *h > 0 => (*w, *h),
        _ => bail!("image dimensions must be two positive integers"),
    };
    let bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3));
    if bytes.is_none() {
        bail!("image dimensions {}x{} are too large", width, height);
    }
    Ok((width, height))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (outputs, inputs): (Vec<PathBuf>, Vec<PathBuf>) =
        cli.files.into_iter().partition(|path| is_png(path));
    if inputs.is_empty() {
        bail!("no scene input files given");
    }
    if outputs.is_empty() {
        bail!("no .png output files given");
    }
    let (width, height) = image_dims(&cli.dims)?;

    let start = Instant::now();
    let description = load_scene(&inputs).context("failed to load scene")?;
    log::info!(
        "Loaded {} objects and {} lights from {} file(s) in {:?}",
        description.object_count(),
        description.light_count(),
        inputs.len(),
        start.elapsed()
    );
    let bounds = description.world_bounds();
    if bounds.is_valid() {
        log::info!("Scene bounds {} to {}", bounds.min, bounds.max);
    }

    let settings = TraceSettings::default()
        .with_recursion_depth(cli.recursion)
        .with_debug_normals(cli.debug)
        .with_bvh(!cli.brute_force);

    let start = Instant::now();
    let scene = Scene::from_description(description, settings);
    log::info!(
        "BVH built in {:?} (depth {})",
        start.elapsed(),
        scene.bvh().depth()
    );

    let config = RenderConfig::default()
        .with_resolution(width, height)
        .with_samples(cli.samples)
        .with_seed(cli.seed);

    let start = Instant::now();
    let image = render(&scene, &config);
    log::info!("Rendered in {:?}", start.elapsed());

    for output in &outputs {
        image
            .save_png(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        log::info!("Wrote {}", output.display());
    }

    Ok(())
}
