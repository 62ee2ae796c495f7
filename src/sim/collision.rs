//! Axis-aligned bounding-box collision test
//!
//! Strict inequalities on every half-plane: rectangles that merely touch
//! edges do not collide. Callers guarantee positive width/height.

use glam::Vec2;

use super::state::{Item, Player};

/// An axis-aligned box with top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl From<&Player> for BoundingBox {
    fn from(p: &Player) -> Self {
        Self::new(p.x, p.y, p.width, p.height)
    }
}

impl From<&Item> for BoundingBox {
    fn from(i: &Item) -> Self {
        Self::new(i.x, i.y, i.width, i.height)
    }
}

/// True iff the two boxes intersect with positive area
pub fn overlaps(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
