//! Laser firing gated by a score-scaled cooldown

use glam::Vec2;

use super::sprite::{Sprite, SpriteKind};
use super::state::GameState;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::heading_vector;

/// Cooldown after a shot: shrinks with score, never below the floor
pub fn cooldown_for(score: u64) -> u32 {
    let reduction = score / COOLDOWN_SCORE_STEP;
    let remaining = (COOLDOWN_BASE as u64).saturating_sub(reduction) as u32;
    remaining.max(COOLDOWN_FLOOR)
}

/// Laser speed for a ship velocity; always faster than the ship
#[inline]
pub fn laser_speed(ship_vel: Vec2) -> f32 {
    LASER_MIN_SPEED.max(LASER_SPEED_BONUS + ship_vel.length())
}

/// Laser leaving the ship's nose, tip flush with the rotated hull
pub fn make_laser(ship: &Sprite) -> Sprite {
    let t = SpriteKind::Laser.template();
    let dir = heading_vector(ship.theta);
    let nose = ship.center() + dir * (ship.width() as f32 / 2.0);
    let center = nose + dir * (t.h as f32 / 2.0);
    let pos = center - Vec2::new(t.w as f32, t.h as f32) / 2.0;

    Sprite::new(
        SpriteKind::Laser,
        pos,
        ship.theta + std::f32::consts::FRAC_PI_2,
    )
    .with_velocity(dir * laser_speed(ship.vel), 0.0)
}

/// Tick the cooldown and fire if ready. Returns true if a laser was fired.
pub fn update<A: AudioSink + ?Sized>(state: &mut GameState, fire: bool, audio: &mut A) -> bool {
    if state.cooldown > 0 {
        state.cooldown -= 1;
    }
    if state.cooldown > 0 || !fire {
        return false;
    }

    let laser = make_laser(&state.ship);
    state.insert(laser);
    state.cooldown = cooldown_for(state.score);
    audio.play(SoundEffect::LaserFired);
    log::trace!("Laser fired, cooldown={}", state.cooldown);
    true
}
