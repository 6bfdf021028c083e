//! Sprite entities and their fixed collision shapes
//!
//! A sprite's size and hitbox list are chosen at spawn time from its kind's
//! template and never change afterwards; only pose and velocity move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a sprite is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Ship,
    Asteroid,
    Fragment,
    Laser,
}

impl SpriteKind {
    /// Asteroids and fragments are the destructible hazards
    #[inline]
    pub fn is_rock(self) -> bool {
        matches!(self, SpriteKind::Asteroid | SpriteKind::Fragment)
    }

    /// Size and hitbox list shared by every sprite of this kind
    pub fn template(self) -> &'static SpriteTemplate {
        match self {
            SpriteKind::Ship => &SHIP_TEMPLATE,
            SpriteKind::Asteroid => &ASTEROID_TEMPLATE,
            SpriteKind::Fragment => &FRAGMENT_TEMPLATE,
            SpriteKind::Laser => &LASER_TEMPLATE,
        }
    }
}

/// Axis-aligned box in sprite-local, unrotated space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitbox {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Hitbox {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the box lies entirely within a `w x h` sprite rectangle
    pub fn fits_within(&self, w: u32, h: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.w as i64 <= w as i64
            && self.y as i64 + self.h as i64 <= h as i64
    }
}

/// Per-kind sprite dimensions and collision shape
#[derive(Debug)]
pub struct SpriteTemplate {
    pub w: u32,
    pub h: u32,
    pub hitboxes: &'static [Hitbox],
}

pub static SHIP_TEMPLATE: SpriteTemplate = SpriteTemplate {
    w: 32,
    h: 32,
    hitboxes: &[Hitbox::new(4, 8, 24, 16)],
};

pub static ASTEROID_TEMPLATE: SpriteTemplate = SpriteTemplate {
    w: 64,
    h: 64,
    hitboxes: &[Hitbox::new(8, 16, 48, 32), Hitbox::new(16, 8, 32, 48)],
};

pub static FRAGMENT_TEMPLATE: SpriteTemplate = SpriteTemplate {
    w: 28,
    h: 28,
    hitboxes: &[Hitbox::new(4, 8, 20, 12), Hitbox::new(8, 4, 12, 20)],
};

pub static LASER_TEMPLATE: SpriteTemplate = SpriteTemplate {
    w: 4,
    h: 20,
    hitboxes: &[Hitbox::new(0, 6, 4, 8)],
};

/// A positioned, oriented, moving entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Top-left corner in screen space
    pub pos: Vec2,
    /// Heading (radians)
    pub theta: f32,
    /// Linear velocity (units per tick)
    pub vel: Vec2,
    /// Angular velocity (radians per tick)
    pub omega: f32,
    w: u32,
    h: u32,
    hitboxes: Vec<Hitbox>,
    /// Marked for removal by the current collision pass
    #[serde(skip)]
    pub(crate) doomed: bool,
}

impl Sprite {
    /// Create a sprite of the given kind at rest
    pub fn new(kind: SpriteKind, pos: Vec2, theta: f32) -> Self {
        let template = kind.template();
        Self {
            kind,
            pos,
            theta,
            vel: Vec2::ZERO,
            omega: 0.0,
            w: template.w,
            h: template.h,
            hitboxes: template.hitboxes.to_vec(),
            doomed: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2, omega: f32) -> Self {
        self.vel = vel;
        self.omega = omega;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.h
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    /// Whether the current collision pass has marked this sprite
    pub fn is_doomed(&self) -> bool {
        self.doomed
    }

    /// Hitboxes translated to world space as (min, max) corners.
    /// Boxes do not rotate with the heading.
    pub fn world_boxes(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.hitboxes.iter().map(move |b| {
            let min = self.pos + Vec2::new(b.x as f32, b.y as f32);
            (min, min + Vec2::new(b.w as f32, b.h as f32))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_keep_hitboxes_inside_bounds() {
        for kind in [
            SpriteKind::Ship,
            SpriteKind::Asteroid,
            SpriteKind::Fragment,
            SpriteKind::Laser,
        ] {
            let t = kind.template();
            assert!(!t.hitboxes.is_empty(), "{kind:?} has no hitboxes");
            for b in t.hitboxes {
                assert!(b.fits_within(t.w, t.h), "{kind:?} box {b:?} escapes sprite");
            }
        }
    }

    #[test]
    fn test_fragment_fits_in_asteroid_quadrant() {
        assert!(FRAGMENT_TEMPLATE.w <= ASTEROID_TEMPLATE.w / 2);
        assert!(FRAGMENT_TEMPLATE.h <= ASTEROID_TEMPLATE.h / 2);
    }

    #[test]
    fn test_world_boxes_translate_without_rotation() {
        let mut s = Sprite::new(SpriteKind::Laser, Vec2::new(10.0, 20.0), 0.0);
        let before: Vec<_> = s.world_boxes().collect();
        s.theta = 1.3;
        let after: Vec<_> = s.world_boxes().collect();
        assert_eq!(before, after);
        assert_eq!(before[0].0, Vec2::new(10.0, 26.0));
        assert_eq!(before[0].1, Vec2::new(14.0, 34.0));
    }

    #[test]
    fn test_rock_classification() {
        assert!(SpriteKind::Asteroid.is_rock());
        assert!(SpriteKind::Fragment.is_rock());
        assert!(!SpriteKind::Laser.is_rock());
        assert!(!SpriteKind::Ship.is_rock());
    }
}
