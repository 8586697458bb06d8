//! Twin Arcade entry point
//!
//! Runs the selected game headless on autopilot and prints a JSON summary.
//!
//! Usage: `twin-arcade [breaker|serpent|both] [low|medium|high]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};

use twin_arcade::platform::{AutoplayInput, Game, LogPresenter, Runner};
use twin_arcade::sim::{BreakerSession, SerpentSession};
use twin_arcade::{QualityPreset, Settings};

/// Seed from the wall clock when none is configured
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Twin Arcade starting...");

    let mut args = std::env::args().skip(1);
    let choice = args.next().unwrap_or_else(|| "both".to_string());

    let mut settings = Settings::load();
    if let Some(quality) = args.next() {
        settings.quality = QualityPreset::parse(&quality)
            .with_context(|| format!("unknown quality preset '{}'", quality))?;
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Seed {} (quality {}, particles {})",
        seed,
        settings.quality.as_str(),
        settings.max_particles()
    );

    let mut games: Vec<Box<dyn Game>> = match choice.as_str() {
        "breaker" => vec![Box::new(BreakerSession::new(seed))],
        "serpent" => vec![Box::new(SerpentSession::new(seed))],
        "both" => vec![
            Box::new(BreakerSession::new(seed)),
            Box::new(SerpentSession::new(seed)),
        ],
        other => bail!("unknown game '{}' (expected breaker, serpent or both)", other),
    };

    let mut summaries = Vec::with_capacity(games.len());
    for game in games.iter_mut() {
        println!("{}", game.controls_banner());

        let mut input = AutoplayInput::default();
        let mut presenter = LogPresenter::new(settings.max_particles(), seed);
        let mut runner = Runner::new(&settings);
        summaries.push(runner.run(game.as_mut(), &mut input, &mut presenter));
    }

    let json = serde_json::to_string_pretty(&summaries).context("serializing run summary")?;
    println!("{}", json);
    Ok(())
}
