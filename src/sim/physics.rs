//! Kinematics for the ship and free-flying sprites
//!
//! One tick is one unit of time; every step is a plain Euler update.

use super::sprite::Sprite;
use super::state::{Field, SpriteSet};
use crate::consts::*;
use crate::heading_vector;

/// Directional controls sampled for a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Advance the ship one tick: damp, apply forces, integrate, wrap
pub fn integrate_ship(ship: &mut Sprite, controls: Controls, field: Field) {
    ship.vel *= SHIP_LINEAR_DAMPING;
    ship.omega *= SHIP_ANGULAR_DAMPING;

    if controls.thrust {
        ship.vel += heading_vector(ship.theta) * SHIP_THRUST;
    }
    // Both turns may be held; they cancel
    if controls.turn_left {
        ship.omega += SHIP_TORQUE;
    }
    if controls.turn_right {
        ship.omega -= SHIP_TORQUE;
    }

    ship.pos += ship.vel;
    ship.theta += ship.omega;

    wrap(ship, field);
}

/// Teleport a sprite that left the field to the opposite edge, offset by its size
pub fn wrap(sprite: &mut Sprite, field: Field) {
    let size = sprite.size();
    if sprite.pos.x > field.width {
        sprite.pos.x = -size.x;
    } else if sprite.pos.x < -size.x {
        sprite.pos.x = field.width;
    }
    if sprite.pos.y > field.height {
        sprite.pos.y = -size.y;
    } else if sprite.pos.y < -size.y {
        sprite.pos.y = field.height;
    }
}

/// Free flight: no forces, no damping, no wrap
#[inline]
pub fn integrate_sprite(sprite: &mut Sprite) {
    sprite.pos += sprite.vel;
    sprite.theta += sprite.omega;
}

/// Advance every member of the active set
pub fn integrate_all(sprites: &mut SpriteSet) {
    for sprite in sprites.values_mut() {
        integrate_sprite(sprite);
    }
}
