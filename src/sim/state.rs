//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`, which the driver owns.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{arena_center, heading_vector};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a click
    Starting,
    /// Active gameplay
    Playing,
    /// Ship destroyed, waiting for the respawn timer
    Dying,
    /// Out of lives, waiting for the restart timer
    GameOver,
}

/// Rock size classes, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum RockSize {
    #[default]
    Big,
    Normal,
    Small,
}

impl RockSize {
    pub const ALL: [RockSize; 3] = [RockSize::Big, RockSize::Normal, RockSize::Small];

    /// Missile closer than this destroys the rock
    pub fn hit_threshold(self) -> f32 {
        match self {
            RockSize::Big => 80.0,
            RockSize::Normal => 55.0,
            RockSize::Small => 30.0,
        }
    }

    /// Score awarded for destroying a rock of this size
    pub fn score(self) -> u64 {
        match self {
            RockSize::Big => 20,
            RockSize::Normal => 50,
            RockSize::Small => 100,
        }
    }

    /// Size of the two pieces a destroyed rock breaks into
    pub fn split(self) -> Option<RockSize> {
        match self {
            RockSize::Big => Some(RockSize::Normal),
            RockSize::Normal => Some(RockSize::Small),
            RockSize::Small => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RockSize::Big => "big",
            RockSize::Normal => "normal",
            RockSize::Small => "small",
        }
    }
}

/// A missile fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub pos: Vec2,
    /// Heading in degrees, fixed at launch
    pub angle: f32,
    pub speed: f32,
}

impl Missile {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            speed: MISSILE_SPEED,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in degrees, always in [0, 360)
    pub angle: f32,
    /// Unit thrust direction, refreshed from `angle` whenever the ship moves
    pub direction: Vec2,
    pub thrusting: bool,
    pub speed: f32,
    /// Sprite width/height, used to place the nose
    pub size: Vec2,
    /// Missiles in flight
    pub missiles: Vec<Missile>,
}

impl Ship {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            direction: Vec2::new(0.0, -1.0),
            thrusting: false,
            speed: SHIP_SPEED,
            size,
            missiles: Vec::new(),
        }
    }

    /// Point where missiles leave the ship
    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vector(self.angle) * self.size / 2.0
    }

    /// Launch a missile from the nose along the current heading
    pub fn fire(&mut self) {
        let missile = Missile::new(self.nose(), self.angle);
        self.missiles.push(missile);
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub pos: Vec2,
    pub size: RockSize,
    /// Drift direction, fixed at spawn (not normalized)
    pub direction: Vec2,
    pub speed: f32,
}

/// Timers the simulation asks the driver to arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Bring the ship back (or end the game) after the death cue
    Respawn,
    /// Return to the title screen after the game-over cue
    Restart,
}

/// One-shot sounds the simulation triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Die,
    GameOver,
}

/// Side effects requested by the simulation, executed by the driver in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Start the looping soundtrack
    StartMusic,
    /// Stop the soundtrack
    StopMusic,
    /// Play a one-shot cue
    Play(SoundCue),
    /// Arm a single-shot timer
    ArmTimer { kind: TimerKind, after_ms: u64 },
}

/// Playback lengths of the timed cues, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueLengths {
    pub die: f32,
    pub game_over: f32,
}

impl Default for CueLengths {
    fn default() -> Self {
        Self {
            die: 2.0,
            game_over: 3.0,
        }
    }
}

impl CueLengths {
    /// Timer delay for a cue: its length plus a second of grace
    pub fn delay_ms(&self, cue: SoundCue) -> u64 {
        let secs = match cue {
            SoundCue::Die => self.die,
            SoundCue::GameOver => self.game_over,
        };
        ((secs.max(0.0) + CUE_GRACE_SECS) * 1000.0) as u64
    }
}

/// Default ship sprite size when no image has been measured
pub const DEFAULT_SHIP_SIZE: Vec2 = Vec2::new(50.0, 60.0);

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u8,
    pub score: u64,
    /// Ticks survived since the last timed spawn or death
    pub counter: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    /// Active rocks (order is irrelevant)
    pub rocks: Vec<Rock>,
    pub min_rock_distance: f32,
    /// Clock time of the last shot (milliseconds)
    pub last_fire: Option<u64>,
    pub cue_lengths: CueLengths,
    /// Effects produced since the last drain
    effects: Vec<Effect>,
}

impl GameState {
    /// Create a new session on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Starting,
            lives: STARTING_LIVES,
            score: 0,
            counter: 0,
            time_ticks: 0,
            ship: Ship::new(arena_center(), DEFAULT_SHIP_SIZE),
            rocks: Vec::new(),
            min_rock_distance: MIN_ROCK_DISTANCE,
            last_fire: None,
            cue_lengths: CueLengths::default(),
            effects: Vec::new(),
        }
    }

    /// Queue an effect for the driver
    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Take all pending effects in emission order
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn pending_effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Serializable view of the session
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            phase: self.phase,
            lives: self.lives,
            score: self.score,
            counter: self.counter,
            time_ticks: self.time_ticks,
            ship: self.ship.clone(),
            rocks: self.rocks.clone(),
        }
    }
}

/// Point-in-time copy of the session, for logging and tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub phase: GamePhase,
    pub lives: u8,
    pub score: u64,
    pub counter: u32,
    pub time_ticks: u64,
    pub ship: Ship,
    pub rocks: Vec<Rock>,
}
