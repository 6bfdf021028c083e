//! Runtime-checked state invariants
//!
//! These hold at every tick boundary. `tick` asserts them in debug builds;
//! tests and the runner's `--strict` mode call [`check_invariants`] directly.

use std::fmt;

use super::sprite::SpriteKind;
use super::state::GameState;
use crate::consts::COOLDOWN_BASE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    ActiveSetEmpty,
    ShipInActiveSet,
    HitboxOutOfBounds,
    NonFinitePose,
    CooldownRange,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveSetEmpty => write!(f, "ACTIVE_SET_EMPTY"),
            Self::ShipInActiveSet => write!(f, "SHIP_IN_ACTIVE_SET"),
            Self::HitboxOutOfBounds => write!(f, "HITBOX_OUT_OF_BOUNDS"),
            Self::NonFinitePose => write!(f, "NON_FINITE_POSE"),
            Self::CooldownRange => write!(f, "COOLDOWN_RANGE"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantViolation {
    pub tick: u64,
    pub rule: RuleCode,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant {} violated at tick {}", self.rule, self.tick)
    }
}

impl std::error::Error for InvariantViolation {}

pub fn check_invariants(state: &GameState) -> Result<(), InvariantViolation> {
    let fail = |rule| {
        Err(InvariantViolation {
            tick: state.time_ticks,
            rule,
        })
    };

    if state.sprites.is_empty() {
        return fail(RuleCode::ActiveSetEmpty);
    }
    if state.cooldown > COOLDOWN_BASE {
        return fail(RuleCode::CooldownRange);
    }

    for sprite in std::iter::once(&state.ship).chain(state.sprites.values()) {
        let finite = sprite.pos.is_finite()
            && sprite.vel.is_finite()
            && sprite.theta.is_finite()
            && sprite.omega.is_finite();
        if !finite {
            return fail(RuleCode::NonFinitePose);
        }
        if !sprite
            .hitboxes()
            .iter()
            .all(|b| b.fits_within(sprite.width(), sprite.height()))
        {
            return fail(RuleCode::HitboxOutOfBounds);
        }
    }

    if state.sprites.values().any(|s| s.kind == SpriteKind::Ship) {
        return fail(RuleCode::ShipInActiveSet);
    }

    Ok(())
}
