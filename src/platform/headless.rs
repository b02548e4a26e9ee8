//! Headless platform: runs the full loop without a window or audio device
//!
//! Used by the native binary (demo/attract mode) and by tests.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use glam::Vec2;

use super::{
    AssetProvider, AudioSink, Clock, Color, ImageHandle, InputSource, Key, Renderer, SoundHandle,
};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::{AssetError, AssetKind};

/// Image sizes and sound lengths of the stock asset set
pub const STOCK_IMAGES: &[(&str, f32, f32)] = &[
    ("spaceship-off.png", 50.0, 60.0),
    ("spaceship-on.png", 50.0, 76.0),
    ("missile.png", 8.0, 20.0),
    ("rock-big.png", 150.0, 150.0),
    ("rock-normal.png", 100.0, 100.0),
    ("rock-small.png", 50.0, 50.0),
];

pub const STOCK_SOUNDS: &[(&str, f32)] = &[
    ("soundtrack.wav", 64.0),
    ("die.wav", 2.0),
    ("game_over.wav", 3.0),
];

/// Asset provider backed by a manifest of known dimensions
///
/// With a root directory every file must also exist under `images/` or
/// `sounds/`, otherwise loading fails.
#[derive(Debug, Clone)]
pub struct ManifestAssets {
    root: Option<PathBuf>,
    images: HashMap<String, Vec2>,
    sounds: HashMap<String, f32>,
    next_id: usize,
}

impl ManifestAssets {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            images: STOCK_IMAGES
                .iter()
                .map(|&(name, w, h)| (name.to_string(), Vec2::new(w, h)))
                .collect(),
            sounds: STOCK_SOUNDS
                .iter()
                .map(|&(name, len)| (name.to_string(), len))
                .collect(),
            next_id: 0,
        }
    }

    /// Override the length of a sound
    pub fn with_sound_length(mut self, name: &str, length: f32) -> Self {
        self.sounds.insert(name.to_string(), length);
        self
    }

    fn check_file(&self, kind: AssetKind, dir: &str, name: &str) -> Result<(), AssetError> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let path = root.join(dir).join(name);
        if path.is_file() {
            Ok(())
        } else {
            Err(AssetError::Missing {
                kind,
                name: name.to_string(),
                path,
            })
        }
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

}

impl AssetProvider for ManifestAssets {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, AssetError> {
        let size = *self.images.get(name).ok_or_else(|| AssetError::Unknown {
            kind: AssetKind::Image,
            name: name.to_string(),
        })?;
        self.check_file(AssetKind::Image, "images", name)?;
        Ok(ImageHandle {
            id: self.allocate_id(),
            name: name.to_string(),
            size,
        })
    }

    fn load_sound(&mut self, name: &str) -> Result<SoundHandle, AssetError> {
        let length = *self.sounds.get(name).ok_or_else(|| AssetError::Unknown {
            kind: AssetKind::Sound,
            name: name.to_string(),
        })?;
        self.check_file(AssetKind::Sound, "sounds", name)?;
        Ok(SoundHandle {
            id: self.allocate_id(),
            name: name.to_string(),
            length,
        })
    }
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Image { name: String, center: Vec2 },
    Rotated { name: String, center: Vec2, angle: f32 },
    Text { text: String, center: Vec2, font_size: f32, color: Color },
}

/// Renderer that keeps the draw calls of the last presented frame
#[derive(Debug)]
pub struct RecordingRenderer {
    /// Size of the virtual display
    surface: Vec2,
    current: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    pub frames: u64,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    /// Display exactly the size of the arena
    pub fn new() -> Self {
        Self::with_surface(Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    pub fn with_surface(surface: Vec2) -> Self {
        Self {
            surface,
            current: Vec::new(),
            last_frame: Vec::new(),
            frames: 0,
        }
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Texts drawn in the last frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    /// The whole arena has to fit on the display
    fn open(&mut self) -> Result<(), AssetError> {
        if self.surface.x < ARENA_WIDTH || self.surface.y < ARENA_HEIGHT {
            return Err(AssetError::Device {
                device: "display",
                reason: format!(
                    "surface {}x{} is smaller than the {}x{} arena",
                    self.surface.x, self.surface.y, ARENA_WIDTH, ARENA_HEIGHT
                ),
            });
        }
        log::debug!("display open at {}x{}", self.surface.x, self.surface.y);
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.current.clear();
        self.current.push(DrawCommand::Clear(color));
    }

    fn draw_image(&mut self, image: &ImageHandle, center: Vec2) {
        self.current.push(DrawCommand::Image {
            name: image.name.clone(),
            center,
        });
    }

    fn draw_rotated(&mut self, image: &ImageHandle, center: Vec2, angle_deg: f32) {
        self.current.push(DrawCommand::Rotated {
            name: image.name.clone(),
            center,
            angle: angle_deg,
        });
    }

    /// Monospace estimate: each glyph is half as wide as it is tall
    fn measure_text(&self, text: &str, font_size: f32) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * font_size * 0.5, font_size * 0.7)
    }

    fn draw_text(&mut self, text: &str, center: Vec2, font_size: f32, color: Color) {
        self.current.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            font_size,
            color,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.current);
        self.frames += 1;
    }
}

/// Audio sink that logs and remembers what is playing
#[derive(Debug, Default)]
pub struct SilentAudio {
    /// Every `play` call, in order
    pub played: Vec<String>,
    /// Looping sounds currently playing
    pub looping: HashSet<String>,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for SilentAudio {
    fn play(&mut self, sound: &SoundHandle, looping: bool, volume: f32) {
        log::debug!("play {} (loop: {}, volume: {:.2})", sound.name, looping, volume);
        self.played.push(sound.name.clone());
        if looping {
            self.looping.insert(sound.name.clone());
        }
    }

    fn stop(&mut self, sound: &SoundHandle) {
        log::debug!("stop {}", sound.name);
        self.looping.remove(&sound.name);
    }
}

/// Input driven from code
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pressed: HashSet<Key>,
    clicks: usize,
    quit: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn click(&mut self) {
        self.clicks += 1;
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }
}

impl InputSource for ScriptedInput {
    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn take_click(&mut self) -> bool {
        if self.clicks > 0 {
            self.clicks -= 1;
            true
        } else {
            false
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Simulated clock: waiting jumps straight to the deadline
#[derive(Debug, Default, Clone)]
pub struct SimClock {
    now_ms: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait_until(&mut self, deadline_ms: u64) {
        self.now_ms = self.now_ms.max(deadline_ms);
    }
}

/// Wall clock: waiting sleeps the thread
#[derive(Debug, Clone)]
pub struct SystemClock {
    started: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn wait_until(&mut self, deadline_ms: u64) {
        let now = self.now_ms();
        if deadline_ms > now {
            std::thread::sleep(Duration::from_millis(deadline_ms - now));
        }
    }
}
