//! Asteroids entry point
//!
//! Runs the fixed-rate game loop headlessly: a pilot supplies input, the
//! text HUD stands in for a window, and the final score goes to stdout.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;

use asteroids::platform::{FramePacer, time_seed};
use asteroids::renderer::{RenderSink, RenderView, TextHud};
use asteroids::sim::{GameState, Pilot, check_invariants, tick};
use asteroids::{HighScores, Settings, SoundEffect};

#[derive(Parser, Debug)]
#[command(
    name = "asteroids",
    version,
    about = "Asteroids-style arcade shooter",
    disable_version_flag = true
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// JSON settings file (missing file means defaults)
    #[arg(short, long, default_value = "asteroids.json")]
    config: PathBuf,

    /// RNG seed (defaults to a time-based seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Input source: idle, thrust-fire or hunter
    #[arg(short, long)]
    pilot: Option<Pilot>,

    /// Pace ticks to the configured frame rate
    #[arg(long)]
    realtime: bool,

    /// Check state invariants after every tick
    #[arg(long)]
    strict: bool,

    /// High score file (overrides settings)
    #[arg(long)]
    highscores: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(max_ticks) = self.max_ticks {
            settings.max_ticks = Some(max_ticks);
        }
        if let Some(pilot) = self.pilot {
            settings.pilot = pilot;
        }
        if self.realtime {
            settings.realtime = true;
        }
        if self.strict {
            settings.strict = true;
        }
        if let Some(path) = &self.highscores {
            settings.highscores_path = Some(path.clone());
        }
    }
}

struct RunSummary {
    score: u64,
    ticks: u64,
    ship_destroyed: bool,
}

fn run(settings: &Settings, seed: u64) -> Result<RunSummary> {
    let mut state = GameState::with_field(seed, settings.field());
    let mut audio = settings.audio();
    let mut hud = TextHud::new(settings.hud_interval);
    let mut pacer = settings.realtime.then(|| FramePacer::new(settings.max_fps));

    log::info!(
        "Running with pilot {:?}, {}",
        settings.pilot,
        if settings.realtime { "real-time" } else { "unpaced" }
    );

    let mut ship_destroyed = false;
    loop {
        if settings.max_ticks.is_some_and(|max| state.time_ticks >= max) {
            log::info!("Tick limit reached");
            break;
        }

        let input = settings.pilot.input(&state);
        if tick(&mut state, &input, &mut audio) {
            ship_destroyed = true;
            break;
        }
        if settings.strict {
            check_invariants(&state).context("state check failed")?;
        }

        hud.present(&RenderView::new(&state));

        if let Some(pacer) = pacer.as_mut() {
            pacer.wait();
        }
    }

    log::info!(
        "Shots fired: {}, rocks destroyed: {}",
        audio.count(SoundEffect::LaserFired),
        audio.count(SoundEffect::RockDestroyed)
    );
    for effect in SoundEffect::ALL {
        log::debug!("{:?} cues: {}", effect, audio.count(effect));
    }
    if let Some(pacer) = &pacer
        && pacer.dropped_frames() > 0
    {
        log::warn!("Dropped {} frames", pacer.dropped_frames());
    }

    Ok(RunSummary {
        score: state.score,
        ticks: state.time_ticks,
        ship_destroyed,
    })
}

fn record_score(settings: &Settings, summary: &RunSummary) -> Result<()> {
    let Some(path) = &settings.highscores_path else {
        return Ok(());
    };
    let mut scores = HighScores::load(path)
        .with_context(|| format!("loading high scores from {}", path.display()))?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    if let Some(rank) = scores.add_score(summary.score, summary.ticks, timestamp) {
        println!("New high score! Rank #{rank}");
        scores
            .save(path)
            .with_context(|| format!("saving high scores to {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    cli.apply(&mut settings);
    if settings.max_fps == 0 {
        bail!("max_fps must be positive");
    }

    let seed = cli.seed.unwrap_or_else(time_seed);
    log::info!("Asteroids starting (seed {})", seed);

    let summary = run(&settings, seed)?;
    if summary.ship_destroyed {
        println!("Game over after {} ticks", summary.ticks);
    }
    println!("Score: {}", summary.score);

    record_score(&settings, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::parse_from([
            "asteroids",
            "--max-ticks",
            "100",
            "--pilot",
            "idle",
            "--strict",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.max_ticks, Some(100));
        assert_eq!(settings.pilot, Pilot::Idle);
        assert!(settings.strict);
        assert!(!settings.realtime);
    }

    #[test]
    fn test_lowercase_v_prints_version() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["asteroids", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        }
        let err = Cli::try_parse_from(["asteroids", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let settings = Settings {
            max_ticks: Some(30),
            pilot: Pilot::Idle,
            strict: true,
            hud_interval: 0,
            ..Default::default()
        };
        let summary = run(&settings, 17).unwrap();
        assert!(summary.ticks <= 30);
        assert!(summary.score >= summary.ticks);
    }
}
