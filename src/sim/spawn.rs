//! Rock factory
//!
//! Rocks are placed by rejection sampling: anything within
//! `min_rock_distance` of the ship is thrown away and redrawn.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Rock, RockSize};
use crate::consts::*;

/// One direction component: a uniform magnitude in [0, 1) with a random sign
fn drift_component(rng: &mut impl Rng) -> f32 {
    let magnitude: f32 = rng.random();
    if rng.random_bool(0.5) { -magnitude } else { magnitude }
}

/// Draw an integer point in `[margin, W - margin] x [margin, H - margin]`
fn sample_point(rng: &mut impl Rng, margin: i32) -> Vec2 {
    let x = rng.random_range(margin..=ARENA_WIDTH as i32 - margin);
    let y = rng.random_range(margin..=ARENA_HEIGHT as i32 - margin);
    Vec2::new(x as f32, y as f32)
}

/// Spawn a rock of `size` somewhere away from the ship and register it
///
/// The first candidate keeps a margin from the edges; retries use the whole
/// arena. There is no retry cap: some corner of the arena is always at least
/// half a diagonal away from any ship position.
pub fn make_rock(state: &mut GameState, size: RockSize) {
    let ship_pos = state.ship.pos;
    let min_distance = state.min_rock_distance;

    let mut pos = sample_point(&mut state.rng, ROCK_SPAWN_MARGIN);
    while pos.distance(ship_pos) < min_distance {
        pos = sample_point(&mut state.rng, 0);
    }

    let direction = Vec2::new(
        drift_component(&mut state.rng),
        drift_component(&mut state.rng),
    );

    log::debug!("spawned {} rock at ({}, {})", size.as_str(), pos.x, pos.y);
    state.rocks.push(Rock {
        pos,
        size,
        direction,
        speed: ROCK_SPEED,
    });
}

/// Spawn the pieces of a destroyed rock, returning how many were made
///
/// Pieces appear at fresh random positions, not where the parent was.
pub fn split(state: &mut GameState, size: RockSize) -> usize {
    match size.split() {
        Some(child) => {
            make_rock(state, child);
            make_rock(state, child);
            2
        }
        None => 0,
    }
}

/// Spawn `count` default-size rocks
pub fn spawn_rocks(state: &mut GameState, count: usize) {
    for _ in 0..count {
        make_rock(state, RockSize::default());
    }
}
