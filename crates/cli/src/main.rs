#![deny(unsafe_code)]
//! Headless host for the flow-field renderer.
//!
//! Subcommands:
//! - `render` runs the particle system for N frames and writes the last frame as PNG
//! - `params` prints the parameter values and schema

mod error;

use error::CliError;
use flowfield_core::{Engine, FrameDriver, Srgb};
use flowfield_particles::ParticleSystem;
use flowfield_raster::snapshot::write_png;
use flowfield_raster::PixelSurface;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Flow-field particle renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run N frames and write the final frame as a PNG snapshot.
    Render {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1000)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 800)]
        height: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 240)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Nominal frame rate, used to report simulated time.
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Background color the transparent frame is composited over.
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Draw the flow-field grid overlay.
        #[arg(long)]
        debug_grid: bool,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,

        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print parameter values and schema.
    Params {
        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_params(raw: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params { params } => {
            let params = parse_params(&params)?;
            let system = ParticleSystem::from_json(1000, 800, 0, &params)?;
            let info = serde_json::json!({
                "params": system.params(),
                "schema": system.param_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            fps,
            background,
            debug_grid,
            output,
            params,
        } => {
            let params = parse_params(&params)?;
            let background = Srgb::from_hex(&background)?;

            let mut system = ParticleSystem::from_json(width, height, seed, &params)?;
            if debug_grid {
                system.set_debug_grid(true);
            }
            let mut surface = PixelSurface::new(width, height)?;
            let mut driver = FrameDriver::new(fps);

            log::info!(
                "rendering {frames} frames at {width}x{height} (seed {seed}, {} particles)",
                system.particles().len()
            );
            driver.run(&mut system, &mut surface, frames);
            write_png(&surface, background, &output)?;

            let simulated = driver.frame_interval().as_secs_f64() * frames as f64;
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "simulated_seconds": simulated,
                    "phase": system.field().phase(),
                    "params": system.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {frames} frames ({simulated:.1}s at {fps} fps, {width}x{height}, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
