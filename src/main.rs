//! Nova Defense headless runner
//!
//! Drives the simulation on a simulated animation clock, with the demo
//! autopilot standing in for the player. Snapshots can be streamed to stdout
//! as JSON lines for an external renderer.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use nova_defense::render::{JsonLinesRenderer, LogRenderer, Renderer, hud_line};
use nova_defense::{Game, Settings};

#[derive(Debug, Parser)]
#[command(name = "nova-defense", about = "Run a headless Nova Defense game")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<std::path::PathBuf>,
    /// RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum frames to simulate (overrides settings)
    #[arg(long)]
    frames: Option<u64>,
    /// Stream JSON snapshots to stdout
    #[arg(long)]
    snapshots: bool,
    /// Disable the demo autopilot
    #[arg(long)]
    no_autopilot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(frames) = args.frames {
        settings.max_frames = frames;
    }
    settings.snapshots |= args.snapshots;
    settings.autopilot &= !args.no_autopilot;

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Nova Defense (headless) starting, seed {}", seed);

    let game = if settings.snapshots {
        let stdout = std::io::stdout();
        let mut renderer = JsonLinesRenderer::new(stdout.lock());
        let game = run(seed, &settings, &mut renderer)?;
        renderer.into_inner().flush().context("flushing snapshots")?;
        game
    } else {
        run(seed, &settings, &mut LogRenderer::default())?
    };

    log::info!("{}", hud_line(game.state()));
    log::info!(
        "Finished after {} frames ({} simulated ticks)",
        game.frames(),
        game.state().time_ticks
    );
    Ok(())
}

/// Play one game to completion or until the frame budget runs out
fn run<R: Renderer>(seed: u64, settings: &Settings, renderer: &mut R) -> Result<Game> {
    let mut game = Game::new(seed, settings);
    let mut now = 0.0;
    game.start(now);

    for _ in 0..settings.max_frames {
        now += settings.frame_ms;
        game.frame(now, renderer).context("drawing frame")?;
        if !game.state().is_playing() {
            break;
        }
    }
    Ok(game)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
