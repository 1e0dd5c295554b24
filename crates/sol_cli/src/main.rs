//! `sol` - render a scene file (or the built-in box) to an image.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use sol_core::SceneDesc;
use sol_renderer::{render, save_image, Camera, RenderConfig, Scene, MAX_RECURSION_DEPTH};

/// Whitted-style ray tracer
#[derive(Parser, Debug)]
#[command(name = "sol", version, about)]
struct Args {
    /// JSON scene file; the built-in box scene is used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image (.png or .ppm)
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Reflection bounces after the primary hit
    #[arg(
        short,
        long,
        default_value_t = 3,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-1..=MAX_RECURSION_DEPTH as i64)
    )]
    depth: i32,

    /// Shadow rays per light at the primary hit
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    shadow_samples: u32,

    /// Reflection rays at the primary hit
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    reflection_samples: u32,

    /// Jitter radius for shadow rays
    #[arg(long, default_value_t = 0.0)]
    shadow_spread: f32,

    /// Jitter radius for reflection rays
    #[arg(long, default_value_t = 0.0)]
    reflection_spread: f32,

    /// Offset for secondary ray origins, in scene units
    #[arg(long, default_value_t = 0.001)]
    bias: f32,

    /// Seed for stochastic sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_depth: self.depth,
            shadow_samples: self.shadow_samples,
            reflection_samples: self.reflection_samples,
            shadow_spread: self.shadow_spread,
            reflection_spread: self.reflection_spread,
            bias: self.bias,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let desc = match &args.scene {
        Some(path) => SceneDesc::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the built-in box");
            SceneDesc::default_box()
        }
    };

    let start = Instant::now();
    let scene = Scene::from_desc(&desc).context("Failed to build scene")?;
    log::info!(
        "Scene built in {:?}: {} objects, {} lights",
        start.elapsed(),
        scene.objects().len(),
        desc.lights.len()
    );

    let mut camera = Camera::from_desc(&desc.camera.unwrap_or_default())
        .with_resolution(args.width, args.height);
    camera.initialize();

    let config = args.render_config();
    if config.is_stochastic() {
        log::info!(
            "Stochastic sampling on (seed {}, shadow spread {}, reflection spread {})",
            config.seed,
            config.shadow_spread,
            config.reflection_spread
        );
    }

    let image = render(&camera, &scene, &config);

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sol"]);
        assert_eq!(args.width, 1000);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert!(args.scene.is_none());
        assert_eq!(args.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = Args::parse_from([
            "sol",
            "--scene",
            "room.json",
            "--depth",
            "5",
            "--shadow-samples",
            "16",
            "--shadow-spread",
            "0.2",
            "--seed",
            "9",
            "-j",
            "2",
        ]);

        let config = args.render_config();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.shadow_samples, 16);
        assert_eq!(config.shadow_spread, 0.2);
        assert_eq!(config.seed, 9);
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.scene, Some(PathBuf::from("room.json")));
    }

    #[test]
    fn test_depth_range() {
        assert!(Args::try_parse_from(["sol", "--depth", "1000000"]).is_err());
        assert!(Args::try_parse_from(["sol", "--depth", "-2"]).is_err());
        assert_eq!(Args::parse_from(["sol", "--depth", "-1"]).depth, -1);

        let max = MAX_RECURSION_DEPTH.to_string();
        let args = Args::parse_from(["sol", "--depth", max.as_str()]);
        assert_eq!(args.depth, MAX_RECURSION_DEPTH);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(Args::try_parse_from(["sol", "--width", "0"]).is_err());
    }
}
