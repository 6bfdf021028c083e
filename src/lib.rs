//! Asteroids - a fixed-tick arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, weapon)
//! - `renderer`: Read-only render view and the render sink seam
//! - `audio`: Audio cue sink
//! - `platform`: Frame pacing and startup seeding
//! - `persistence`: JSON load/save helpers
//! - `settings`: Runtime configuration

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default play-field dimensions
    pub const SCREEN_WIDTH: u32 = 1024;
    pub const SCREEN_HEIGHT: u32 = 768;

    /// Target tick rate of the frame loop
    pub const MAX_FPS: u32 = 60;

    /// Ship damping, applied every tick before new forces
    pub const SHIP_LINEAR_DAMPING: f32 = 0.99;
    pub const SHIP_ANGULAR_DAMPING: f32 = 0.95;
    /// Thrust acceleration along the heading (units/tick²)
    pub const SHIP_THRUST: f32 = 0.08;
    /// Angular acceleration per turn input (rad/tick²)
    pub const SHIP_TORQUE: f32 = 0.004;

    /// Asteroid velocity component range before difficulty scaling
    pub const ASTEROID_SPEED_MIN: f32 = 0.5;
    pub const ASTEROID_SPEED_MAX: f32 = 3.0;
    /// Hard cap on any spawned velocity component
    pub const ASTEROID_SPEED_CAP: f32 = 3.0;
    /// Asteroid spin range (rad/tick) before difficulty scaling
    pub const ASTEROID_SPIN_MAX: f32 = 0.05;
    /// Difficulty factor: base + score / divisor
    pub const DIFFICULTY_BASE: f32 = 0.5;
    pub const DIFFICULTY_SCORE_DIVISOR: f32 = 16000.0;

    /// Fragments per broken asteroid
    pub const FRAGMENTS_PER_ASTEROID: usize = 4;
    /// Fragment velocity/spin jitter (factor drawn from 1 ± jitter)
    pub const FRAGMENT_JITTER: f32 = 0.1;
    /// Outward nudge added per quadrant axis
    pub const FRAGMENT_NUDGE: f32 = 0.1;
    /// A fragment counts as this fraction of an asteroid toward capacity
    pub const FRAGMENT_WEIGHT: f32 = 0.25;

    /// Capacity: score / step + base asteroids
    pub const CAPACITY_SCORE_STEP: u64 = 1000;
    pub const CAPACITY_BASE: u64 = 3;
    /// Per-tick chance of spawning while under capacity
    pub const SPAWN_CHANCE: f32 = 0.05;

    /// Distance beyond the field after which entities are removed
    pub const DESPAWN_MARGIN: f32 = 100.0;

    /// Laser cooldown: base - score / step, clamped to at least the floor
    pub const COOLDOWN_BASE: u32 = 50;
    pub const COOLDOWN_SCORE_STEP: u64 = 400;
    pub const COOLDOWN_FLOOR: u32 = 1;
    /// Laser speed: max(min, bonus + |ship velocity|)
    pub const LASER_MIN_SPEED: f32 = 6.0;
    pub const LASER_SPEED_BONUS: f32 = 2.0;

    /// Points per rock destroyed by a laser
    pub const SCORE_PER_KILL: u64 = 50;
    /// Points per completed tick
    pub const SCORE_PER_TICK: u64 = 1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector for a heading in screen space (y grows downward)
#[inline]
pub fn heading_vector(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), -theta.sin())
}

/// Renderer rotation in degrees for a heading in radians
#[inline]
pub fn render_degrees(theta: f32) -> f32 {
    -theta.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle() {
        // 3π lands on the ±π seam; either side is acceptable
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!(normalize_angle(-7.0 * PI) < PI);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_heading_vector_points_up_at_half_pi() {
        let v = heading_vector(FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_degrees_sign() {
        assert!((render_degrees(FRAC_PI_2) + 90.0).abs() < 1e-4);
    }
}
