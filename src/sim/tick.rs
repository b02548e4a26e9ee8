//! Fixed timestep simulation tick
//!
//! One call advances the session by 1/30 s.

use super::collision::{missiles_physics, rocks_physics};
use super::kinematics::Body;
use super::spawn::make_rock;
use super::state::{GamePhase, GameState, RockSize};
use crate::consts::*;
use crate::wrap_degrees;

/// Controls held during a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer counter-clockwise
    pub turn_left: bool,
    /// Steer clockwise
    pub turn_right: bool,
    /// Move along the heading
    pub thrust: bool,
    /// Fire (rate limited)
    pub fire: bool,
    /// Clock time of this tick in milliseconds, used by the fire limiter
    pub now_ms: u64,
    /// Idle/demo mode - AI steers and shoots
    pub idle_mode: bool,
}

/// Fire if the cooldown has elapsed; returns whether a missile was launched
pub fn try_fire(state: &mut GameState, now_ms: u64) -> bool {
    let ready = state
        .last_fire
        .is_none_or(|last| now_ms.saturating_sub(last) >= FIRE_COOLDOWN_MS);
    if ready {
        state.ship.fire();
        state.last_fire = Some(now_ms);
    }
    ready
}

/// Aim at the nearest rock and shoot when lined up
fn autopilot(state: &GameState, input: &mut TickInput) {
    let ship = state.ship.pos;
    let Some(target) = state
        .rocks
        .iter()
        .map(|rock| rock.pos)
        .min_by(|a, b| a.distance_squared(ship).total_cmp(&b.distance_squared(ship)))
    else {
        return;
    };

    let to_target = target - ship;
    // Inverse of heading_vector: (-sin a, -cos a) = d
    let wanted = wrap_degrees((-to_target.x).atan2(-to_target.y).to_degrees());
    let diff = wrap_degrees(wanted - state.ship.angle);

    if diff > SHIP_TURN_STEP / 2.0 && diff <= 180.0 {
        input.turn_left = true;
    } else if diff > 180.0 && diff < 360.0 - SHIP_TURN_STEP / 2.0 {
        input.turn_right = true;
    }
    input.fire = diff < 15.0 || diff > 345.0;
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    let mut input = input.clone();
    if input.idle_mode && state.phase == GamePhase::Playing {
        autopilot(state, &mut input);
    }
    let input = &input;

    // Shooting does not depend on the phase
    if input.fire {
        try_fire(state, input.now_ms);
    }

    state.time_ticks += 1;

    if state.phase != GamePhase::Playing {
        return;
    }

    if input.turn_right {
        state.ship.turn(-SHIP_TURN_STEP);
    }
    if input.turn_left {
        state.ship.turn(SHIP_TURN_STEP);
    }
    if input.thrust {
        state.ship.advance();
        state.ship.thrusting = true;
    } else {
        state.ship.thrusting = false;
    }

    if !state.ship.missiles.is_empty() {
        missiles_physics(state);
    }
    if !state.rocks.is_empty() {
        rocks_physics(state);
    }

    // A death this tick already reset the counter
    if state.phase == GamePhase::Playing {
        state.counter += 1;
        if state.counter >= ROCK_SPAWN_INTERVAL_TICKS {
            if state.rocks.len() < MAX_ROCKS {
                make_rock(state, RockSize::default());
            }
            // The cap blocks only the spawn; the counter restarts either way
            state.counter = 0;
        }
    }

    log::trace!(
        "tick {}: {} rocks, {} missiles, score {}",
        state.time_ticks,
        state.rocks.len(),
        state.ship.missiles.len(),
        state.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::phase::do_init;
    use crate::sim::state::Rock;
    use glam::Vec2;

    fn fresh_game(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        do_init(&mut state);
        state.drain_effects();
        state
    }

    fn empty_field(seed: u64) -> GameState {
        let mut state = fresh_game(seed);
        state.rocks.clear();
        state
    }

    #[test]
    fn test_title_screen_does_not_simulate() {
        let mut state = GameState::new(1);
        let input = TickInput {
            turn_left: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Starting);
        assert_eq!(state.ship.angle, 0.0);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_fire_rate_limit() {
        let mut state = empty_field(2);
        let fire_at = |now_ms| TickInput {
            fire: true,
            now_ms,
            ..Default::default()
        };

        tick(&mut state, &fire_at(1000));
        tick(&mut state, &fire_at(1100));
        assert_eq!(state.ship.missiles.len(), 1);

        tick(&mut state, &fire_at(1250));
        assert_eq!(state.ship.missiles.len(), 2);
    }

    #[test]
    fn test_fire_exactly_at_cooldown() {
        let mut state = empty_field(3);
        assert!(try_fire(&mut state, 0));
        assert!(!try_fire(&mut state, 100));
        assert!(try_fire(&mut state, 150));
        assert_eq!(state.ship.missiles.len(), 2);
    }

    #[test]
    fn test_fire_exact_cooldown_at_odd_times() {
        let mut state = empty_field(3);
        assert!(try_fire(&mut state, 550));
        assert!(!try_fire(&mut state, 699));
        assert!(try_fire(&mut state, 700));
        assert!(try_fire(&mut state, 850));
        assert_eq!(state.ship.missiles.len(), 3);
    }

    #[test]
    fn test_fire_works_in_any_phase() {
        let mut state = GameState::new(4);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.ship.missiles.len(), 1);
    }

    #[test]
    fn test_steering_and_thrust() {
        let mut state = empty_field(5);
        let input = TickInput {
            turn_right: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.ship.angle, 350.0);
        assert!(state.ship.thrusting);
        assert!(state.ship.pos.distance(Vec2::new(400.0, 300.0)) > 3.99);

        let both = TickInput {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        tick(&mut state, &both);
        assert_eq!(state.ship.angle, 350.0);
        assert!(!state.ship.thrusting);
    }

    #[test]
    fn test_empty_tick_only_counts() {
        let mut state = empty_field(6);
        let before = (state.score, state.lives, state.phase);

        tick(&mut state, &TickInput::default());

        assert_eq!((state.score, state.lives, state.phase), before);
        assert_eq!(state.counter, 1);
        assert!(state.rocks.is_empty());
    }

    #[test]
    fn test_timed_spawn_every_thirty_seconds() {
        let mut state = empty_field(7);
        for _ in 0..ROCK_SPAWN_INTERVAL_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.rocks.is_empty());
        assert_eq!(state.counter, ROCK_SPAWN_INTERVAL_TICKS - 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.rocks.len(), 1);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_timed_spawn_respects_cap() {
        let mut state = empty_field(8);
        for _ in 0..MAX_ROCKS {
            state.rocks.push(Rock {
                pos: Vec2::new(20.0, 20.0),
                size: RockSize::Small,
                direction: Vec2::ZERO,
                speed: 0.0,
            });
        }
        state.counter = ROCK_SPAWN_INTERVAL_TICKS - 1;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.rocks.len(), MAX_ROCKS);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_collision_with_ship_stops_counter() {
        let mut state = empty_field(9);
        state.counter = 10;
        state.rocks.push(Rock {
            pos: state.ship.pos + Vec2::new(10.0, 0.0),
            size: RockSize::Big,
            direction: Vec2::ZERO,
            speed: 0.0,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Dying);
        assert_eq!(state.lives, 2);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_autopilot_turns_toward_rock() {
        let mut state = empty_field(10);
        // Rock due left of the ship: heading 90
        state.rocks.push(Rock {
            pos: Vec2::new(100.0, 300.0),
            size: RockSize::Big,
            direction: Vec2::ZERO,
            speed: 0.0,
        });
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..9 {
            tick(&mut state, &input);
        }
        assert_eq!(state.ship.angle, 90.0);
        assert!(!state.ship.missiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = fresh_game(99999);
        let mut state2 = fresh_game(99999);

        let inputs = [
            TickInput {
                turn_left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                thrust: true,
                now_ms: 500,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                now_ms: 1000,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.rocks.len(), state2.rocks.len());
        assert_eq!(state1.ship.pos, state2.ship.pos);
    }
}
