//! Tarn headless driver
//!
//! Runs the simulation without a window: ticks at the simulation cadence
//! (or flat out), logs periodic stats, and can dump a final-frame snapshot
//! through the software surface. A windowed host would drive the same
//! `World` entry points from its event loop instead.

mod surface;

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tarn_core::{SimConfig, World};

use crate::surface::PixmapSurface;

/// Target frame time of the external driver
const TICK_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Parser, Debug)]
#[command(name = "tarn", about = "Pond-ecosystem simulation, headless")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1_000)]
    ticks: u64,

    /// RNG seed override (takes precedence over the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a RON config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sleep to the ~30 ms cadence instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write a PPM snapshot of the final frame to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = SimConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    let width = config.world.width;
    let height = config.world.height;
    let mut world = World::new(config);
    log::info!("running {} ticks", args.ticks);

    for i in 0..args.ticks {
        let start = Instant::now();
        world.tick();

        if (i + 1) % 100 == 0 {
            log::info!(
                "tick {}: {} plants, {} prey, {} blight nodes, field energy {:.1}",
                world.tick_count(),
                world.plants().len(),
                world.prey().len(),
                world.blight().node_count(),
                world.field().total_energy()
            );
        }

        if args.realtime {
            if let Some(remaining) = TICK_INTERVAL.checked_sub(start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    if let Some(path) = args.snapshot {
        let mut surface = PixmapSurface::new(width as usize, height as usize);
        world.render(&mut surface);
        surface.write_ppm(&path)?;
        log::info!("snapshot written to {}", path.display());
    }

    Ok(())
}
