//! solarcast CLI - solar exposure analysis for role-tagged scenes
//!
//! Reads a scene document, traces sun visibility over its base surface and
//! writes the resulting exposure grid as an image and/or JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use solarcast::{bounding_box, compute_exposure, ExposureSettings};

mod output;
mod scene;

use scene::SceneDocument;

#[derive(Parser)]
#[command(name = "solarcast")]
#[command(about = "Solar exposure heat-maps for base surfaces and their occluders", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the exposure grid for a scene
    Trace {
        /// Scene document (.json)
        scene: PathBuf,
        /// Settings file (.toml); unset fields keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the grid as a PNG image
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Size the grid from the base extent instead of the settings
        #[arg(long)]
        fit_grid: bool,
        /// Pixels per grid cell in the PNG
        #[arg(long, default_value_t = 1)]
        pixel_size: u32,
    },
    /// List the objects of a scene and their roles
    Info {
        /// Scene document (.json)
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Trace {
            scene,
            config,
            output,
            json,
            fit_grid,
            pixel_size,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            let doc = read_scene(&scene)?;
            let resolved = doc.resolve();
            let base = resolved
                .base
                .context("scene has no base object with a display mesh")?;

            // A malformed base is left for the estimator to report.
            if fit_grid {
                if let Ok(extent) = bounding_box(&base.vertices) {
                    settings = settings.fitted_to(&extent);
                }
            }

            let report =
                compute_exposure(&base.vertices, &resolved.design, &resolved.context, &settings)?;

            let summary = report.grid.summary();
            println!(
                "{}x{} grid, {} suns, {} occluder triangles",
                report.grid.width(),
                report.grid.height(),
                report.sun_count,
                report.occluder_count
            );
            println!(
                "exposure min {} / mean {:.1} / max {}",
                summary.min, summary.mean, summary.max
            );

            if let Some(path) = output {
                output::write_png(&report.grid, &path, pixel_size)?;
                println!("Wrote image to {}", path.display());
            }
            if let Some(path) = json {
                output::write_json(&report, &path)?;
                println!("Wrote report to {}", path.display());
            }
        }
        Commands::Info { scene } => {
            show_info(&scene)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<ExposureSettings> {
    let Some(path) = path else {
        return Ok(ExposureSettings::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))
}

fn read_scene(path: &Path) -> Result<SceneDocument> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    SceneDocument::from_json(&json).with_context(|| format!("invalid scene {}", path.display()))
}

fn show_info(path: &Path) -> Result<()> {
    let doc = read_scene(path)?;

    println!("Scene: {}", path.display());
    println!("Objects: {}", doc.objects.len());
    for object in &doc.objects {
        let role = object
            .role()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        let triangles = object.display_mesh().map_or(0, |m| m.num_triangles());
        println!(
            "  {:<16} role={:<8} meshes={} triangles={}",
            object.name,
            role,
            object.display_value.len(),
            triangles
        );
    }

    let resolved = doc.resolve();
    match &resolved.base {
        Some(base) if base.vertices.is_empty() => println!("Base extent: empty"),
        Some(base) => {
            let extent = bounding_box(&base.vertices)?;
            let fitted = ExposureSettings::default().fitted_to(&extent);
            println!(
                "Base extent: ({:.2}, {:.2}) - ({:.2}, {:.2}) at z={:.2}",
                extent.min.x, extent.min.y, extent.max.x, extent.max.y, extent.max.z
            );
            println!(
                "Sample grid at default spacing: {}x{}",
                fitted.grid_width, fitted.grid_height
            );
        }
        None => println!("Base extent: none"),
    }
    println!(
        "Occluders: {} design, {} context",
        resolved.design.len(),
        resolved.context.len()
    );

    Ok(())
}
