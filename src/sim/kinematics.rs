//! Linear kinematics shared by every entity
//!
//! Each tick an entity moves `direction * speed`. There is no acceleration,
//! friction or rotational inertia.

use glam::Vec2;

use super::state::{Missile, Rock, Ship};
use crate::consts::MISSILE_RADIUS;
use crate::{heading_vector, wrap_degrees};

/// Something that occupies space in the arena and moves once per tick
pub trait Body {
    /// Current centre
    fn pos(&self) -> Vec2;
    /// Radius of the visual extent
    fn extent(&self) -> f32;
    /// Advance one tick
    fn advance(&mut self);
}

impl Body for Ship {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> f32 {
        self.size.max_element() / 2.0
    }

    /// Thrust along the current heading
    fn advance(&mut self) {
        self.direction = heading_vector(self.angle);
        self.pos += self.direction * self.speed;
    }
}

impl Body for Missile {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> f32 {
        MISSILE_RADIUS
    }

    fn advance(&mut self) {
        self.pos += heading_vector(self.angle) * self.speed;
    }
}

impl Body for Rock {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> f32 {
        self.size.hit_threshold()
    }

    fn advance(&mut self) {
        self.pos += self.direction * self.speed;
    }
}

impl Ship {
    /// Rotate by `delta` degrees, keeping the heading in [0, 360)
    pub fn turn(&mut self, delta: f32) {
        self.angle = wrap_degrees(self.angle + delta);
    }
}
