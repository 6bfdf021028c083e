//! Input generators for headless play
//!
//! A pilot looks at the current state and produces the next tick's input,
//! standing in for a keyboard when no window is attached.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sprite::Sprite;
use super::state::GameState;
use super::tick::TickInput;
use crate::normalize_angle;

/// Heading error (radians) within which the hunter opens fire
const AIM_TOLERANCE: f32 = 0.12;
/// Beyond this distance the hunter closes in on its target
const ENGAGE_DISTANCE: f32 = 260.0;
/// Ship angular speed above which the hunter stops adding torque
const MAX_TURN_RATE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pilot {
    /// No input at all
    Idle,
    /// Thrust and fire held, never turn
    ThrustFire,
    /// Turn toward the nearest rock and shoot it
    #[default]
    Hunter,
}

impl FromStr for Pilot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(Pilot::Idle),
            "thrust-fire" | "thrust" => Ok(Pilot::ThrustFire),
            "hunter" => Ok(Pilot::Hunter),
            other => Err(format!(
                "unknown pilot '{other}' (expected idle, thrust-fire or hunter)"
            )),
        }
    }
}

impl Pilot {
    pub fn input(&self, state: &GameState) -> TickInput {
        match self {
            Pilot::Idle => TickInput::default(),
            Pilot::ThrustFire => TickInput {
                thrust: true,
                fire: true,
                ..Default::default()
            },
            Pilot::Hunter => hunt(state),
        }
    }
}

fn nearest_rock<'a>(state: &'a GameState) -> Option<&'a Sprite> {
    let from = state.ship.center();
    state
        .sprites
        .values()
        .filter(|s| s.kind.is_rock())
        .min_by(|a, b| {
            a.center()
                .distance_squared(from)
                .partial_cmp(&b.center().distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn hunt(state: &GameState) -> TickInput {
    let Some(target) = nearest_rock(state) else {
        return TickInput::default();
    };

    let ship = &state.ship;
    let to_target = target.center() - ship.center();
    // Screen y grows downward, headings grow counter-clockwise
    let bearing = (-to_target.y).atan2(to_target.x);
    let error = normalize_angle(bearing - ship.theta);

    TickInput {
        thrust: to_target.length() > ENGAGE_DISTANCE && error.abs() < AIM_TOLERANCE * 4.0,
        turn_left: error > AIM_TOLERANCE && ship.omega < MAX_TURN_RATE,
        turn_right: error < -AIM_TOLERANCE && ship.omega > -MAX_TURN_RATE,
        fire: error.abs() < AIM_TOLERANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::SpriteKind;
    use crate::sim::state::Field;
    use glam::Vec2;

    fn with_rock_at(center: Vec2) -> GameState {
        let mut state = GameState::empty(1, Field::default());
        let t = SpriteKind::Asteroid.template();
        let pos = center - Vec2::new(t.w as f32, t.h as f32) / 2.0;
        state.insert(Sprite::new(SpriteKind::Asteroid, pos, 0.0));
        state
    }

    #[test]
    fn test_hunter_fires_when_aligned() {
        // Ship faces up; rock straight above
        let state = with_rock_at(Vec2::new(512.0, 200.0));
        let input = Pilot::Hunter.input(&state);
        assert!(input.fire);
        assert!(!input.turn_left && !input.turn_right);
    }

    #[test]
    fn test_hunter_turns_toward_target() {
        // Rock to the right: heading 0 is clockwise from π/2
        let state = with_rock_at(Vec2::new(900.0, 384.0));
        let input = Pilot::Hunter.input(&state);
        assert!(input.turn_right);
        assert!(!input.fire);

        let state = with_rock_at(Vec2::new(100.0, 384.0));
        assert!(Pilot::Hunter.input(&state).turn_left);
    }

    #[test]
    fn test_scripted_pilots() {
        let state = GameState::new(2);
        let input = Pilot::ThrustFire.input(&state);
        assert!(input.thrust && input.fire && !input.turn_left && !input.turn_right);
        assert_eq!(Pilot::Idle.input(&state), TickInput::default());
    }

    #[test]
    fn test_pilot_from_str() {
        assert_eq!("Thrust-Fire".parse::<Pilot>(), Ok(Pilot::ThrustFire));
        assert_eq!("hunter".parse::<Pilot>(), Ok(Pilot::Hunter));
        assert!("autopilot".parse::<Pilot>().is_err());
    }
}
