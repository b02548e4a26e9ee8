//! Frame composition
//!
//! Draws one frame of the session through the platform `Renderer`.

use glam::Vec2;

use crate::arena_center;
use crate::consts::ARENA_WIDTH;
use crate::error::AssetError;
use crate::platform::{AssetProvider, Color, ImageHandle, Renderer};
use crate::sim::{GamePhase, GameState, RockSize};

pub const BACKGROUND: Color = [0, 0, 0];
pub const SCORE_COLOR: Color = [0, 155, 0];
pub const GAME_OVER_COLOR: Color = [255, 0, 0];

pub const LARGE_FONT: f32 = 100.0;
pub const MEDIUM_FONT: f32 = 50.0;

pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// Every image the game draws
#[derive(Debug, Clone)]
pub struct Sprites {
    pub ship: ImageHandle,
    /// Ship with its engine lit
    pub ship_thrust: ImageHandle,
    pub missile: ImageHandle,
    pub rock_big: ImageHandle,
    pub rock_normal: ImageHandle,
    pub rock_small: ImageHandle,
}

impl Sprites {
    pub fn load(assets: &mut impl AssetProvider) -> Result<Self, AssetError> {
        Ok(Self {
            ship: assets.load_image("spaceship-off.png")?,
            ship_thrust: assets.load_image("spaceship-on.png")?,
            missile: assets.load_image("missile.png")?,
            rock_big: assets.load_image("rock-big.png")?,
            rock_normal: assets.load_image("rock-normal.png")?,
            rock_small: assets.load_image("rock-small.png")?,
        })
    }

    pub fn rock(&self, size: RockSize) -> &ImageHandle {
        match size {
            RockSize::Big => &self.rock_big,
            RockSize::Normal => &self.rock_normal,
            RockSize::Small => &self.rock_small,
        }
    }

    /// Ship size used to place the nose
    pub fn ship_size(&self) -> Vec2 {
        self.ship.size
    }
}

/// Draw the whole frame and present it
pub fn draw_frame(renderer: &mut impl Renderer, state: &GameState, sprites: &Sprites) {
    renderer.clear(BACKGROUND);

    let ship = &state.ship;
    let ship_image = if ship.thrusting {
        &sprites.ship_thrust
    } else {
        &sprites.ship
    };
    renderer.draw_rotated(ship_image, ship.pos, ship.angle);

    for missile in &ship.missiles {
        renderer.draw_image(&sprites.missile, missile.pos);
    }

    for rock in &state.rocks {
        renderer.draw_image(sprites.rock(rock.size), rock.pos);
    }

    // Score hugs the top-right corner
    let score = state.score.to_string();
    let extent = renderer.measure_text(&score, MEDIUM_FONT);
    let score_pos = Vec2::new(ARENA_WIDTH - extent.x, extent.y + 10.0);
    renderer.draw_text(&score, score_pos, MEDIUM_FONT, SCORE_COLOR);

    if matches!(state.phase, GamePhase::GameOver | GamePhase::Starting) {
        renderer.draw_text(GAME_OVER_TEXT, arena_center(), LARGE_FONT, GAME_OVER_COLOR);
    }

    renderer.present();
}
