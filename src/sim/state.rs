//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here, including the seeded RNG,
//! so two states built from the same seed evolve identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use slotmap::{SlotMap, new_key_type};

use super::sprite::{Sprite, SpriteKind};
use crate::consts::*;

new_key_type! {
    /// Stable handle to a member of the active entity set
    pub struct SpriteKey;
}

/// Active entity set: every live sprite except the ship
pub type SpriteSet = SlotMap<SpriteKey, Sprite>;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship destroyed, run ended
    GameOver,
}

/// Play-field bounds (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Field {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// True if the sprite's bounding box is more than `margin` beyond any edge
    pub fn is_far_outside(&self, sprite: &Sprite, margin: f32) -> bool {
        let size = sprite.size();
        sprite.pos.x > self.width + margin
            || sprite.pos.x + size.x < -margin
            || sprite.pos.y > self.height + margin
            || sprite.pos.y + size.y < -margin
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Score (never decreases)
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Play-field bounds
    pub field: Field,
    /// The player's ship, never a member of `sprites`
    pub ship: Sprite,
    /// Asteroids, fragments and lasers in flight
    pub sprites: SpriteSet,
    /// Ticks until the weapon can fire again
    pub cooldown: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Field::default())
    }

    /// Create a new game with the ship centred and one asteroid in flight
    pub fn with_field(seed: u64, field: Field) -> Self {
        let mut state = Self::empty(seed, field);
        super::spawn::spawn_asteroid(&mut state);
        log::info!(
            "New game: seed={} field={}x{}",
            seed,
            field.width,
            field.height
        );
        state
    }

    /// A state with no active entities; callers must populate it before ticking
    pub fn empty(seed: u64, field: Field) -> Self {
        Self {
            seed,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            field,
            ship: Self::new_ship(field),
            sprites: SpriteSet::with_key(),
            cooldown: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn new_ship(field: Field) -> Sprite {
        let t = SpriteKind::Ship.template();
        let pos = Vec2::new(
            (field.width - t.w as f32) / 2.0,
            (field.height - t.h as f32) / 2.0,
        );
        Sprite::new(SpriteKind::Ship, pos, std::f32::consts::FRAC_PI_2)
    }

    /// Insert a non-ship sprite into the active set
    pub fn insert(&mut self, sprite: Sprite) -> SpriteKey {
        debug_assert!(sprite.kind != SpriteKind::Ship);
        self.sprites.insert(sprite)
    }

    /// Number of active sprites of the given kind
    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.values().filter(|s| s.kind == kind).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_has_centred_ship_and_one_asteroid() {
        let state = GameState::new(42);
        assert_eq!(state.sprites.len(), 1);
        assert_eq!(state.count(SpriteKind::Asteroid), 1);
        assert_eq!(state.ship.center(), Vec2::new(512.0, 384.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.cooldown, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_far_outside_respects_margin() {
        let field = Field::default();
        let mut s = Sprite::new(SpriteKind::Laser, Vec2::new(1100.0, 100.0), 0.0);
        assert!(!field.is_far_outside(&s, DESPAWN_MARGIN));
        s.pos.x = 1124.5;
        assert!(field.is_far_outside(&s, DESPAWN_MARGIN));
        s.pos = Vec2::new(-104.0, 100.0);
        assert!(!field.is_far_outside(&s, DESPAWN_MARGIN));
        s.pos.x = -104.5;
        assert!(field.is_far_outside(&s, DESPAWN_MARGIN));
    }
}
