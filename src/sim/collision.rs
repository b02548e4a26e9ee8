//! Collision passes for missiles and rocks
//!
//! Both passes mark first and sweep afterwards, so no collection is resized
//! while it is being walked. Rocks spawned by a pass are appended after the
//! sweep and are not tested until the next tick.

use super::kinematics::Body;
use super::phase;
use super::spawn::{make_rock, split};
use super::state::{GameState, RockSize};
use crate::consts::SHIP_HIT_DISTANCE;
use crate::{arena_bounding_radius, arena_center};

/// What a missile pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissileReport {
    /// Sizes of the rocks destroyed, in iteration order
    pub destroyed: Vec<RockSize>,
    /// Missiles removed after hitting something
    pub spent: usize,
    /// Missiles removed after leaving the arena
    pub lost: usize,
}

/// What a rock pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RockReport {
    /// At least one rock reached the ship
    pub ship_hit: bool,
    /// Rocks that left the arena and were replaced
    pub recycled: usize,
}

/// Remove every element whose flag is set
fn sweep<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut flags = marked.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Move every missile, then resolve missile/rock hits
///
/// A missile can destroy several rocks in one pass but is removed once.
/// Each destroyed rock scores and splits exactly once.
pub fn missiles_physics(state: &mut GameState) -> MissileReport {
    let mut report = MissileReport::default();
    let center = arena_center();
    let bounds = arena_bounding_radius();

    for missile in &mut state.ship.missiles {
        missile.advance();
    }

    let mut rock_hit = vec![false; state.rocks.len()];
    let mut missile_gone = vec![false; state.ship.missiles.len()];

    for (mi, missile) in state.ship.missiles.iter().enumerate() {
        for (ri, rock) in state.rocks.iter().enumerate() {
            if rock_hit[ri] {
                continue;
            }
            if missile.pos.distance(rock.pos) < rock.size.hit_threshold() {
                rock_hit[ri] = true;
                missile_gone[mi] = true;
                report.destroyed.push(rock.size);
            }
        }
        if missile_gone[mi] {
            report.spent += 1;
        } else if missile.pos.distance(center) > bounds + missile.extent() {
            missile_gone[mi] = true;
            report.lost += 1;
        }
    }

    sweep(&mut state.rocks, &rock_hit);
    sweep(&mut state.ship.missiles, &missile_gone);

    for &size in &report.destroyed {
        state.score += size.score();
        split(state, size);
    }

    if !report.destroyed.is_empty() {
        log::debug!(
            "missiles destroyed {} rock(s), score now {}",
            report.destroyed.len(),
            state.score
        );
    }

    report
}

/// Move every rock, then resolve rock/ship hits and arena exits
///
/// Several rocks reaching the ship in the same tick cost a single life.
pub fn rocks_physics(state: &mut GameState) -> RockReport {
    let mut report = RockReport::default();
    let center = arena_center();
    let bounds = arena_bounding_radius();
    let ship_pos = state.ship.pos;

    let mut escaped = vec![false; state.rocks.len()];

    for (i, rock) in state.rocks.iter_mut().enumerate() {
        rock.advance();

        if rock.pos.distance(ship_pos) < SHIP_HIT_DISTANCE {
            report.ship_hit = true;
        } else if rock.pos.distance(center) > bounds {
            escaped[i] = true;
            report.recycled += 1;
        }
    }

    sweep(&mut state.rocks, &escaped);

    // Replacements are always full-size rocks, whatever left the arena
    for _ in 0..report.recycled {
        make_rock(state, RockSize::default());
    }

    if report.ship_hit {
        phase::die(state);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Missile, Rock};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(2024);
        state.phase = GamePhase::Playing;
        state
    }

    fn still_rock(pos: Vec2, size: RockSize) -> Rock {
        Rock {
            pos,
            size,
            direction: Vec2::ZERO,
            speed: 0.0,
        }
    }

    /// A missile that will sit exactly on `target` after its next advance
    fn missile_onto(target: Vec2) -> Missile {
        // Heading 0 moves straight up the screen
        Missile::new(target + Vec2::new(0.0, 15.0), 0.0)
    }

    #[test]
    fn test_big_rock_splits_into_two_normals() {
        let mut state = playing_state();
        let target = Vec2::new(100.0, 100.0);
        state.rocks.push(still_rock(target, RockSize::Big));
        state.ship.missiles.push(missile_onto(target));

        let report = missiles_physics(&mut state);

        assert_eq!(report.destroyed, vec![RockSize::Big]);
        assert_eq!(report.spent, 1);
        assert_eq!(state.score, 20);
        assert!(state.ship.missiles.is_empty());
        assert_eq!(state.rocks.len(), 2);
        assert!(state.rocks.iter().all(|r| r.size == RockSize::Normal));
    }

    #[test]
    fn test_scores_per_size() {
        for (size, score, children) in [
            (RockSize::Big, 20, 2),
            (RockSize::Normal, 50, 2),
            (RockSize::Small, 100, 0),
        ] {
            let mut state = playing_state();
            let target = Vec2::new(120.0, 80.0);
            state.rocks.push(still_rock(target, size));
            state.ship.missiles.push(missile_onto(target));

            missiles_physics(&mut state);

            assert_eq!(state.score, score);
            assert_eq!(state.rocks.len(), children);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut state = playing_state();
        let target = Vec2::new(100.0, 100.0);
        state
            .rocks
            .push(still_rock(target + Vec2::new(30.0, 0.0), RockSize::Small));
        state.ship.missiles.push(missile_onto(target));

        let report = missiles_physics(&mut state);

        assert!(report.destroyed.is_empty());
        assert_eq!(state.rocks.len(), 1);
        assert_eq!(state.ship.missiles.len(), 1);
    }

    #[test]
    fn test_one_missile_two_rocks_removed_once() {
        let mut state = playing_state();
        let target = Vec2::new(100.0, 100.0);
        state.rocks.push(still_rock(target, RockSize::Small));
        state
            .rocks
            .push(still_rock(target + Vec2::new(10.0, 0.0), RockSize::Small));
        state.ship.missiles.push(missile_onto(target));
        // A second missile far away must survive the sweep
        state.ship.missiles.push(Missile::new(Vec2::new(700.0, 500.0), 0.0));

        let report = missiles_physics(&mut state);

        assert_eq!(report.destroyed.len(), 2);
        assert_eq!(report.spent, 1);
        assert_eq!(state.score, 200);
        assert!(state.rocks.is_empty());
        assert_eq!(state.ship.missiles.len(), 1);
        assert_eq!(state.ship.missiles[0].pos, Vec2::new(700.0, 485.0));
    }

    #[test]
    fn test_two_missiles_one_rock_scores_once() {
        let mut state = playing_state();
        let target = Vec2::new(100.0, 100.0);
        state.rocks.push(still_rock(target, RockSize::Small));
        state.ship.missiles.push(missile_onto(target));
        state.ship.missiles.push(missile_onto(target + Vec2::new(5.0, 0.0)));

        let report = missiles_physics(&mut state);

        assert_eq!(report.destroyed, vec![RockSize::Small]);
        assert_eq!(state.score, 100);
        // The second missile found nothing left to hit
        assert_eq!(state.ship.missiles.len(), 1);
    }

    #[test]
    fn test_missile_leaving_arena_is_dropped() {
        let mut state = playing_state();
        state.ship.missiles.push(Missile::new(Vec2::new(400.0, -200.0), 0.0));

        let report = missiles_physics(&mut state);

        assert_eq!(report.lost, 1);
        assert!(state.ship.missiles.is_empty());
    }

    #[test]
    fn test_rock_hitting_ship_kills_once() {
        let mut state = playing_state();
        let ship = state.ship.pos;
        state
            .rocks
            .push(still_rock(ship + Vec2::new(50.0, 0.0), RockSize::Big));
        state
            .rocks
            .push(still_rock(ship - Vec2::new(0.0, 40.0), RockSize::Small));

        let report = rocks_physics(&mut state);

        assert!(report.ship_hit);
        assert_eq!(state.phase, GamePhase::Dying);
        assert_eq!(state.lives, 2);
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn test_escaped_rock_is_replaced_with_big() {
        let mut state = playing_state();
        let mut rock = still_rock(Vec2::new(-150.0, -150.0), RockSize::Small);
        rock.direction = Vec2::new(-1.0, -1.0);
        rock.speed = 4.0;
        state.rocks.push(rock);
        state.rocks.push(still_rock(Vec2::new(50.0, 50.0), RockSize::Normal));

        let report = rocks_physics(&mut state);

        assert_eq!(report.recycled, 1);
        assert!(!report.ship_hit);
        assert_eq!(state.rocks.len(), 2);
        assert_eq!(state.rocks[0].size, RockSize::Normal);
        assert_eq!(state.rocks[1].size, RockSize::Big);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
