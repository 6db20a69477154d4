//! Duckshot entry point
//!
//! Headless attract mode: runs the simulation at the nominal tick rate on a
//! manual clock with a synthesized autoplayer, then prints the final score
//! and the leaderboard. The graphical front end drives the same `sim` API.

use std::path::Path;
use std::process::ExitCode;

use duckshot::audio::LogAudio;
use duckshot::consts::{TICK_HZ, TICK_MS};
use duckshot::platform::{Clock as _, ManualClock};
use duckshot::scores::{Leaderboard, results_file};
use duckshot::settings::SETTINGS_FILE;
use duckshot::sim::{GameMode, HudModel, RoundPhase, RoundState, TickInput, tick};
use duckshot::{Context, Settings};

struct Args {
    mode: GameMode,
    seed: u64,
    max_ticks: u64,
    save_as: Option<String>,
}

const USAGE: &str = "usage: duckshot [standard|time] [--seed N] [--ticks N] [--save NAME]";

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        mode: GameMode::Standard,
        seed: 7,
        // Five minutes of simulated play, in case nobody runs out of lives
        max_ticks: 300 * TICK_HZ as u64,
        save_as: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                args.seed = it
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("--seed needs a number")?;
            }
            "--ticks" => {
                args.max_ticks = it
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("--ticks needs a number")?;
            }
            "--save" => {
                args.save_as = Some(it.next().ok_or("--save needs a name")?);
            }
            mode => {
                args.mode =
                    GameMode::from_str(mode).ok_or_else(|| format!("unknown mode {mode:?}"))?;
            }
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let mut ctx = Context::new(
        Box::new(ManualClock::new()),
        Box::new(LogAudio::new(settings.effective_sfx())),
    );

    let mut state = match RoundState::new(args.mode, args.seed, ctx.clock.now_ms()) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("failed to set up round: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "attract mode: {} round, seed {}",
        args.mode.as_str(),
        args.seed
    );

    let input = TickInput {
        trigger: None,
        demo: true,
    };
    while state.phase == RoundPhase::Playing && state.time_ticks < args.max_ticks {
        tick(&mut state, &input, &mut ctx);
        ctx.clock.advance(TICK_MS);
    }

    let now = ctx.clock.now_ms();
    println!(
        "final score: {} ({} hits over {:.1}s)",
        state.score,
        state.duck_hits,
        now as f64 / 1_000.0
    );
    match state.hud(now) {
        HudModel::Standard { lives, shots, .. } => {
            println!("lives left: {lives}, shots left: {shots}");
        }
        HudModel::Timed { remaining_secs, .. } => {
            println!("time left: {remaining_secs}s");
        }
    }

    let path = Path::new(results_file(args.mode));
    let mut board = Leaderboard::load(path);
    if let Some(name) = args.save_as {
        match board.submit(&name, state.score) {
            Some(rank) => {
                if let Err(err) = board.save(path) {
                    eprintln!("could not save results to {}: {err}", path.display());
                    return ExitCode::FAILURE;
                }
                println!("saved as {name} (rank {rank})");
            }
            None => println!("{} didn't make the top 10", state.score),
        }
    }
    if !board.is_empty() {
        println!("--- top scores ({}) ---", args.mode.as_str());
        for (i, entry) in board.entries.iter().enumerate() {
            println!("{:>2}. {:<16} {}", i + 1, entry.name, entry.score);
        }
    }

    ExitCode::SUCCESS
}
