//! Rock Blaster entry point
//!
//! Runs the game on the headless platform: the autopilot plays, frames are
//! recorded instead of shown, and a JSON summary of the session is printed
//! when the run ends.
//!
//! Usage: `rock-blaster [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use rock_blaster::platform::headless::{
    ManifestAssets, RecordingRenderer, ScriptedInput, SilentAudio, SimClock, SystemClock,
};
use rock_blaster::platform::{AudioSink, Clock, Renderer};
use rock_blaster::sim::GamePhase;
use rock_blaster::{Error, Game, Settings};

/// Game time covered by one `Game::run` slice between title-screen checks
const SLICE_MS: u64 = 1000;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Rock Blaster (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref())?;

    let mut assets = ManifestAssets::new(settings.asset_root.clone());
    let mut game = Game::new(
        &settings,
        &mut assets,
        RecordingRenderer::new(),
        SilentAudio::new(),
    )?;

    if settings.realtime {
        play(&mut game, &mut SystemClock::new(), &settings);
    } else {
        play(&mut game, &mut SimClock::new(), &settings);
    }

    let snapshot = game.state().snapshot();
    log::info!(
        "Session ended after {} ticks ({} frames drawn)",
        snapshot.time_ticks,
        game.renderer().frames
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Click through the title screen `auto_start_games` times, until time runs out
fn play<R: Renderer, S: AudioSink>(
    game: &mut Game<R, S>,
    clock: &mut impl Clock,
    settings: &Settings,
) {
    let mut input = ScriptedInput::new();
    let limit_ms = settings.run_secs.map(|secs| clock.now_ms() + secs * 1000);
    let mut games_left = settings.auto_start_games;
    let mut started_any = false;

    while game.is_running() {
        if game.state().phase == GamePhase::Starting {
            if games_left > 0 {
                games_left -= 1;
                started_any = true;
                input.click();
                log::info!("Starting game ({} more queued)", games_left);
            } else if started_any {
                break;
            }
        }

        let now = clock.now_ms();
        let slice_end = match limit_ms {
            Some(limit) if now >= limit => break,
            Some(limit) => (now + SLICE_MS).min(limit),
            None => now + SLICE_MS,
        };
        game.run(clock, &mut input, Some(slice_end));
    }
}
