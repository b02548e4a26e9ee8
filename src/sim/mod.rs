//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Side effects (audio, timers) are emitted as `Effect`s, never performed
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod phase;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{MissileReport, RockReport, missiles_physics, rocks_physics};
pub use kinematics::Body;
pub use phase::{click, die, do_init, game_over, on_timer, respawn, restart, start};
pub use spawn::{make_rock, split};
pub use state::{
    CueLengths, Effect, GamePhase, GameState, Missile, Rock, RockSize, Ship, Snapshot, SoundCue,
    TimerKind,
};
pub use tick::{TickInput, tick, try_fire};
