//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the simulation deterministically.
//! Stage order is fixed: integrate, collide, weapon, despawn, spawn, score.

use serde::{Deserialize, Serialize};

use super::collision;
use super::physics::{self, Controls};
use super::spawn;
use super::state::{GamePhase, GameState};
use super::weapon;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Thrust forward along the heading
    pub thrust: bool,
    /// Rotate counter-clockwise
    pub turn_left: bool,
    /// Rotate clockwise
    pub turn_right: bool,
    /// Fire the laser (held)
    pub fire: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            thrust: self.thrust,
            turn_left: self.turn_left,
            turn_right: self.turn_right,
        }
    }
}

/// Advance the game state by one tick.
///
/// Returns true once the ship has been destroyed. A tick that destroys the
/// ship stops right after the collision check: nothing is marked, scored,
/// fired, despawned or spawned.
pub fn tick<A: AudioSink + ?Sized>(state: &mut GameState, input: &TickInput, audio: &mut A) -> bool {
    if state.phase == GamePhase::GameOver {
        return true;
    }

    state.time_ticks += 1;

    physics::integrate_ship(&mut state.ship, input.controls(), state.field);
    physics::integrate_all(&mut state.sprites);
    if input.thrust {
        audio.play(SoundEffect::Thrust);
    }

    let scan = collision::scan(&state.ship, &mut state.sprites);
    if scan.ship_hit {
        state.phase = GamePhase::GameOver;
        audio.play(SoundEffect::ShipDestroyed);
        log::info!(
            "Ship destroyed at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        return true;
    }
    state.score += scan.kills as u64 * SCORE_PER_KILL;
    collision::resolve(&mut state.sprites, &mut state.rng, audio);

    weapon::update(state, input.fire, audio);

    spawn::despawn_out_of_bounds(state);
    spawn::ensure_populated(state);
    spawn::maybe_spawn(state);

    state.score += SCORE_PER_TICK;

    debug_assert!(
        super::invariants::check_invariants(state).is_ok(),
        "{:?}",
        super::invariants::check_invariants(state)
    );
    false
}
