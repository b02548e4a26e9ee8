//! Session phase transitions
//!
//! STARTING -> PLAYING -> DYING -> PLAYING ... -> GAME_OVER -> STARTING.
//! Timed transitions are requested as `Effect::ArmTimer` and completed when
//! the driver feeds the matching `TimerKind` back through `on_timer`.

use super::spawn::spawn_rocks;
use super::state::{Effect, GamePhase, GameState, Ship, SoundCue, TimerKind};
use crate::arena_center;
use crate::consts::*;

/// Put a fresh ship in the middle of the arena and resume play
pub fn start(state: &mut GameState) {
    state.ship = Ship::new(arena_center(), state.ship.size);
    state.emit(Effect::StartMusic);
    state.phase = GamePhase::Playing;
    log::info!("playing: {} lives, score {}", state.lives, state.score);
}

/// Lose a life. Only meaningful while playing; returns whether it applied
pub fn die(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }

    state.emit(Effect::StopMusic);
    state.lives = state.lives.saturating_sub(1);
    state.counter = 0;
    state.phase = GamePhase::Dying;
    state.emit(Effect::Play(SoundCue::Die));
    let after_ms = state.cue_lengths.delay_ms(SoundCue::Die);
    state.emit(Effect::ArmTimer {
        kind: TimerKind::Respawn,
        after_ms,
    });

    log::info!("ship destroyed, {} lives left", state.lives);
    true
}

/// End the run and schedule the return to the title screen
pub fn game_over(state: &mut GameState) {
    state.emit(Effect::StopMusic);
    state.phase = GamePhase::GameOver;
    state.emit(Effect::Play(SoundCue::GameOver));
    let after_ms = state.cue_lengths.delay_ms(SoundCue::GameOver);
    state.emit(Effect::ArmTimer {
        kind: TimerKind::Restart,
        after_ms,
    });

    log::info!("game over, final score {}", state.score);
}

/// Respawn timer fired: continue with a fresh field or end the run
pub fn respawn(state: &mut GameState) {
    if state.phase != GamePhase::Dying {
        log::debug!("ignoring respawn in {:?}", state.phase);
        return;
    }

    if state.lives < 1 {
        game_over(state);
    } else {
        state.rocks.clear();
        start(state);
        spawn_rocks(state, INITIAL_ROCKS);
    }
}

/// Restart timer fired: back to the title screen
pub fn restart(state: &mut GameState) {
    if state.phase != GamePhase::GameOver {
        log::debug!("ignoring restart in {:?}", state.phase);
        return;
    }
    state.phase = GamePhase::Starting;
}

/// Dispatch a fired timer
pub fn on_timer(state: &mut GameState, kind: TimerKind) {
    match kind {
        TimerKind::Respawn => respawn(state),
        TimerKind::Restart => restart(state),
    }
}

/// Reset the whole session and start playing
pub fn do_init(state: &mut GameState) {
    state.rocks.clear();
    state.lives = STARTING_LIVES;
    state.score = 0;
    state.counter = 0;
    start(state);
    spawn_rocks(state, INITIAL_ROCKS);
}

/// Pointer click: begins a new game from the title screen only
pub fn click(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Starting {
        log::debug!("ignoring click in {:?}", state.phase);
        return false;
    }
    do_init(state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CueLengths;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        do_init(&mut state);
        state.drain_effects();
        state
    }

    #[test]
    fn test_do_init_starts_fresh_session() {
        let mut state = GameState::new(11);
        state.score = 999;
        state.lives = 0;
        state.counter = 123;

        do_init(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.counter, 0);
        assert_eq!(state.rocks.len(), INITIAL_ROCKS);
        assert!(state.ship.missiles.is_empty());
        assert_eq!(state.drain_effects(), vec![Effect::StartMusic]);
    }

    #[test]
    fn test_die_arms_respawn_after_cue() {
        let mut state = playing(5);
        state.cue_lengths = CueLengths {
            die: 2.5,
            game_over: 4.0,
        };
        state.counter = 77;

        assert!(die(&mut state));

        assert_eq!(state.phase, GamePhase::Dying);
        assert_eq!(state.lives, 2);
        assert_eq!(state.counter, 0);
        assert_eq!(
            state.drain_effects(),
            vec![
                Effect::StopMusic,
                Effect::Play(SoundCue::Die),
                Effect::ArmTimer {
                    kind: TimerKind::Respawn,
                    after_ms: 3500
                },
            ]
        );
    }

    #[test]
    fn test_die_outside_play_is_noop() {
        let mut state = playing(5);
        die(&mut state);
        state.drain_effects();

        assert!(!die(&mut state));
        assert_eq!(state.lives, 2);
        assert!(state.drain_effects().is_empty());
    }

    #[test]
    fn test_respawn_with_lives_left() {
        let mut state = playing(8);
        state.rocks.truncate(1);
        state.ship.missiles.push(crate::sim::state::Missile::new(glam::Vec2::ZERO, 0.0));
        die(&mut state);
        state.drain_effects();

        on_timer(&mut state, TimerKind::Respawn);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 2);
        assert_eq!(state.rocks.len(), INITIAL_ROCKS);
        assert!(state.ship.missiles.is_empty());
        assert_eq!(state.ship.pos, arena_center());
        assert_eq!(state.drain_effects(), vec![Effect::StartMusic]);
    }

    #[test]
    fn test_last_life_leads_to_game_over_then_title() {
        let mut state = playing(9);
        state.lives = 1;
        die(&mut state);
        assert_eq!(state.lives, 0);
        state.drain_effects();

        on_timer(&mut state, TimerKind::Respawn);
        assert_eq!(state.phase, GamePhase::GameOver);
        let effects = state.drain_effects();
        assert_eq!(effects[0], Effect::StopMusic);
        assert_eq!(effects[1], Effect::Play(SoundCue::GameOver));
        assert!(matches!(
            effects[2],
            Effect::ArmTimer {
                kind: TimerKind::Restart,
                after_ms: 4000
            }
        ));

        on_timer(&mut state, TimerKind::Restart);
        assert_eq!(state.phase, GamePhase::Starting);
    }

    #[test]
    fn test_stale_timers_are_ignored() {
        let mut state = playing(10);
        on_timer(&mut state, TimerKind::Respawn);
        on_timer(&mut state, TimerKind::Restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.drain_effects().is_empty());
    }

    #[test]
    fn test_click_only_from_title_screen() {
        let mut state = GameState::new(12);
        assert!(click(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);

        state.score = 40;
        assert!(!click(&mut state));
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut state = playing(13);
        state.lives = 0;
        die(&mut state);
        assert_eq!(state.lives, 0);
    }
}
