//! Rock Blaster - A single-screen rock blasting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game phases)
//! - `driver`: Event loop, input mapping and effect dispatch
//! - `timer`: Event queue and per-kind timers
//! - `platform`: Collaborator traits (assets, renderer, audio, input, clock)
//! - `renderer`: Frame composition on top of the `Renderer` trait
//! - `audio`: Music and sound cue playback

pub mod audio;
pub mod driver;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod timer;

pub use driver::Game;
pub use error::{AssetError, Error, SettingsError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const FPS: u32 = 30;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// REFRESH timer period
    pub const REFRESH_MS: u64 = 1000 / FPS as u64;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 4.0;
    /// Degrees turned per tick while a steering key is held
    pub const SHIP_TURN_STEP: f32 = 10.0;
    /// Rock closer than this to the ship kills it
    pub const SHIP_HIT_DISTANCE: f32 = 90.0;

    /// Missile defaults
    pub const MISSILE_SPEED: f32 = 15.0;
    pub const MISSILE_RADIUS: f32 = 5.0;
    /// Minimum clock time between two shots (milliseconds)
    pub const FIRE_COOLDOWN_MS: u64 = 150;

    /// Rock defaults
    pub const ROCK_SPEED: f32 = 4.0;
    pub const INITIAL_ROCKS: usize = 4;
    /// Timed spawns stop once this many rocks are alive
    pub const MAX_ROCKS: usize = 10;
    /// Ticks survived between timed rock spawns (30 seconds)
    pub const ROCK_SPAWN_INTERVAL_TICKS: u32 = 30 * FPS;
    /// Rocks never spawn closer than this to the ship
    pub const MIN_ROCK_DISTANCE: f32 = 350.0;
    /// Edge margin for the first spawn candidate
    pub const ROCK_SPAWN_MARGIN: i32 = 200;

    pub const STARTING_LIVES: u8 = 3;

    /// Extra delay after a death/game-over cue before the timer fires
    pub const CUE_GRACE_SECS: f32 = 1.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees (0 = up, positive = counter-clockwise on screen)
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new((-rad).sin(), -rad.cos())
}

/// Centre of the arena in screen coordinates
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Radius of the circle that encloses the arena (half its diagonal)
#[inline]
pub fn arena_bounding_radius() -> f32 {
    arena_center().length()
}
