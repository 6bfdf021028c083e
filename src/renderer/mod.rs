//! Rendering seam
//!
//! The simulation hands a read-only [`RenderView`] to a [`RenderSink`] once
//! per completed tick. Sprite rotation for presentation is derived here, never
//! stored in the simulation.

pub mod hud;

pub use hud::TextHud;

use glam::Vec2;

use crate::render_degrees;
use crate::sim::{GameState, Sprite, SpriteKind};

/// One drawable sprite, in renderer terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub kind: SpriteKind,
    /// Destination rectangle top-left
    pub pos: Vec2,
    /// Destination rectangle size
    pub size: Vec2,
    /// Clockwise rotation about the rectangle centre, in degrees
    pub angle_degrees: f32,
}

impl From<&Sprite> for SpriteDraw {
    fn from(sprite: &Sprite) -> Self {
        Self {
            kind: sprite.kind,
            pos: sprite.pos,
            size: sprite.size(),
            angle_degrees: render_degrees(sprite.theta),
        }
    }
}

/// Read-only view of everything a frame shows
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    state: &'a GameState,
}

impl<'a> RenderView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    pub fn ship(&self) -> SpriteDraw {
        SpriteDraw::from(&self.state.ship)
    }

    /// Active sprites in no particular order
    pub fn sprites(&self) -> impl Iterator<Item = SpriteDraw> + 'a {
        self.state.sprites.values().map(SpriteDraw::from)
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn cooldown(&self) -> u32 {
        self.state.cooldown
    }

    pub fn tick(&self) -> u64 {
        self.state.time_ticks
    }
}

/// Receiver of frames
pub trait RenderSink {
    fn present(&mut self, view: &RenderView<'_>);
}
