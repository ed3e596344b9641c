use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use ocean_float::prelude::*;

/// Command-line tool that floats a boat on a Gerstner wave ocean
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Frame rate of the simulation clock
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Storm intensity (0.01-2.0), scales the swell amplitude
    #[arg(short, long, default_value_t = 0.5)]
    storm: f32,

    /// Boat heading in degrees (0-360)
    #[arg(long, default_value_t = 0.0)]
    heading: f32,

    /// Fixed-point rounds per surface sample
    #[arg(short, long, default_value_t = 4)]
    iterations: usize,

    /// Pitch damping constant (>= 1, larger is smoother)
    #[arg(long, default_value_t = 7.0)]
    pitch_damping: f32,

    /// Roll damping constant (>= 1, larger is smoother)
    #[arg(long, default_value_t = 5.0)]
    roll_damping: f32,

    /// Scale damping by the real frame interval instead of per frame
    #[arg(long)]
    time_scaled: bool,

    /// Side length of the exported ocean plane
    #[arg(long, default_value_t = 192.0)]
    ocean_size: f32,

    /// Grid cells per side of the exported ocean plane
    #[arg(long, default_value_t = 96)]
    subdivisions: usize,

    /// Print every Nth frame
    #[arg(long, default_value_t = 30)]
    every: u64,

    /// Write the last frame as a GLB scene
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            ocean_size: self.ocean_size,
            subdivisions: self.subdivisions,
            storm_factor: self.storm,
            heading: self.heading,
            pitch_damping: self.pitch_damping,
            roll_damping: self.roll_damping,
            iterations: self.iterations,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "fps must be positive, got {}", args.fps);

    let config = args.scene_config();
    let mut sim = Simulation::new(&config).context("Invalid scene configuration")?;
    if args.time_scaled {
        let body = FloatingBody::new(&config.hull_bounds(), config.pitch_damping, config.roll_damping)?
            .with_smoothing(SmoothingMode::time_scaled(1.0 / args.fps)?)?;
        sim = sim.with_body(body);
        sim.set_heading(config.heading);
    }

    println!("Simulating boat on Gerstner ocean...");
    println!(
        "Storm factor {:.2} (swell amplitude {:.2}), heading {:.0}°, {} frames at {} fps",
        sim.ocean().storm_factor(),
        sim.ocean().primary_amplitude(),
        sim.body().heading(),
        args.frames,
        args.fps
    );
    log::info!(
        "Inversion contraction bound {:.3}",
        sim.ocean().field().contraction_bound()
    );

    println!(
        "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "frame", "time", "heave", "heading", "pitch", "roll"
    );
    let every = args.every.max(1);
    for frame in 1..=args.frames {
        let pose = sim.step(frame as f32 / args.fps);
        if frame % every == 0 || frame == args.frames {
            println!(
                "{:>6} {:>8.3} {:>8.3} {:>8.1} {:>8.2} {:>8.2}",
                pose.frame, pose.time, pose.position.z, pose.heading, pose.pitch, pose.roll
            );
        }
    }

    if let Some(path) = &args.export {
        println!("Building ocean mesh...");
        let mut ocean = Mesh::new_plane(
            config.ocean_size,
            config.ocean_size,
            config.subdivisions,
            config.subdivisions,
        );
        ocean.apply_wave_field(sim.ocean().field(), sim.time());
        if let Some((min, max)) = ocean.height_range() {
            println!("Ocean height range: min = {:.4}, max = {:.4}", min, max);
        }

        let hull = Mesh::from_bounds(&config.hull_bounds()).transformed(&sim.pose().transform());

        println!("Exporting to {}...", path.display());
        export_scene(&ocean, Some(&hull), path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!("Done!");
    Ok(())
}
