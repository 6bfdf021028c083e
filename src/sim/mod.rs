//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed unit timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies; audio goes through [`AudioSink`]
//!
//! [`AudioSink`]: crate::audio::AudioSink

pub mod collision;
pub mod invariants;
pub mod physics;
pub mod pilot;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{ResolveReport, ScanReport, boxes_overlap, sprites_collide};
pub use invariants::{InvariantViolation, RuleCode, check_invariants};
pub use physics::Controls;
pub use pilot::Pilot;
pub use sprite::{Hitbox, Sprite, SpriteKind};
pub use state::{Field, GamePhase, GameState, SpriteKey, SpriteSet};
pub use tick::{TickInput, tick};
