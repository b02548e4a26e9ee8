//! Platform abstraction layer
//!
//! The simulation never touches devices. Everything it needs from the outside
//! world goes through these traits:
//! - Assets (images and sounds by file name)
//! - Rendering surface
//! - Audio output
//! - Keyboard/pointer state
//! - Monotonic clock

pub mod headless;

use glam::Vec2;

use crate::error::AssetError;

/// A loaded image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub id: usize,
    pub name: String,
    /// Width and height in pixels
    pub size: Vec2,
}

/// A loaded sound
#[derive(Debug, Clone, PartialEq)]
pub struct SoundHandle {
    pub id: usize,
    pub name: String,
    /// Playback length in seconds
    pub length: f32,
}

/// Loads assets by file name; a missing asset is an error
pub trait AssetProvider {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, AssetError>;
    fn load_sound(&mut self, name: &str) -> Result<SoundHandle, AssetError>;
}

/// RGB colour
pub type Color = [u8; 3];

/// Display surface the frame is drawn onto
pub trait Renderer {
    /// Prepare the surface before the first frame
    fn open(&mut self) -> Result<(), AssetError> {
        Ok(())
    }
    fn clear(&mut self, color: Color);
    fn draw_image(&mut self, image: &ImageHandle, center: Vec2);
    /// Draw `image` rotated counter-clockwise by `angle_deg` around its centre
    fn draw_rotated(&mut self, image: &ImageHandle, center: Vec2, angle_deg: f32);
    /// Size of `text` rendered at `font_size`
    fn measure_text(&self, text: &str, font_size: f32) -> Vec2;
    fn draw_text(&mut self, text: &str, center: Vec2, font_size: f32, color: Color);
    /// Show the finished frame
    fn present(&mut self);
}

/// Audio output
pub trait AudioSink {
    fn play(&mut self, sound: &SoundHandle, looping: bool, volume: f32);
    fn stop(&mut self, sound: &SoundHandle);
}

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    Space,
}

/// Keyboard and pointer state
pub trait InputSource {
    fn is_pressed(&self, key: Key) -> bool;
    /// Take a pending pointer click, if one happened since the last call
    fn take_click(&mut self) -> bool;
    fn quit_requested(&self) -> bool {
        false
    }
}

/// Monotonic milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
    /// Block until `deadline_ms`
    fn wait_until(&mut self, deadline_ms: u64);
}
