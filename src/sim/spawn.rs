//! Population management for rocks
//!
//! Asteroids enter from just outside the field at a rate that scales with
//! score; anything that drifts well beyond the field is dropped. The active
//! set is never left empty at a tick boundary.

use glam::Vec2;
use rand::Rng;

use super::sprite::{Sprite, SpriteKind};
use super::state::{Field, GameState, SpriteSet};
use crate::consts::*;

/// Field edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Speed multiplier for newly spawned asteroids
#[inline]
pub fn difficulty(score: u64) -> f32 {
    DIFFICULTY_BASE + score as f32 / DIFFICULTY_SCORE_DIVISOR
}

/// Target asteroid-equivalent population for a score
#[inline]
pub fn capacity(score: u64) -> u64 {
    score / CAPACITY_SCORE_STEP + CAPACITY_BASE
}

/// Asteroid-equivalent population: fragments count a quarter each
pub fn effective_population(sprites: &SpriteSet) -> f32 {
    sprites.values().fold(0.0, |n, s| match s.kind {
        SpriteKind::Asteroid => n + 1.0,
        SpriteKind::Fragment => n + FRAGMENT_WEIGHT,
        _ => n,
    })
}

/// Pick an entry edge, weighted so rocks arrive evenly per unit of perimeter
pub fn choose_edge<R: Rng + ?Sized>(rng: &mut R, field: Field) -> Edge {
    let perimeter = field.width + field.height;
    let horizontal = field.width / (2.0 * perimeter);
    let vertical = field.height / (2.0 * perimeter);
    let roll: f32 = rng.random();
    if roll < horizontal {
        Edge::Top
    } else if roll < 2.0 * horizontal {
        Edge::Bottom
    } else if roll < 2.0 * horizontal + vertical {
        Edge::Left
    } else {
        Edge::Right
    }
}

/// Build an asteroid entering from a random edge
pub fn make_asteroid<R: Rng + ?Sized>(rng: &mut R, field: Field, score: u64) -> Sprite {
    let t = SpriteKind::Asteroid.template();
    let (w, h) = (t.w as f32, t.h as f32);
    let factor = difficulty(score);

    let edge = choose_edge(rng, field);
    let along: f32 = rng.random();
    let mut component = || {
        let u: f32 = rng.random();
        let base = ASTEROID_SPEED_MIN + u * (ASTEROID_SPEED_MAX - ASTEROID_SPEED_MIN);
        (base * factor).min(ASTEROID_SPEED_CAP)
    };
    let parallel = component();
    let perpendicular = component() * 0.5;
    let parallel = if rng.random::<bool>() { parallel } else { -parallel };

    let (pos, vel) = match edge {
        Edge::Top => (
            Vec2::new(along * (field.width + w) - w, -h),
            Vec2::new(parallel, perpendicular),
        ),
        Edge::Bottom => (
            Vec2::new(along * (field.width + w) - w, field.height),
            Vec2::new(parallel, -perpendicular),
        ),
        Edge::Left => (
            Vec2::new(-w, along * (field.height + h) - h),
            Vec2::new(perpendicular, parallel),
        ),
        Edge::Right => (
            Vec2::new(field.width, along * (field.height + h) - h),
            Vec2::new(-perpendicular, parallel),
        ),
    };

    let spin: f32 = rng.random();
    let omega = (spin * 2.0 - 1.0) * ASTEROID_SPIN_MAX * factor;
    let theta = rng.random::<f32>() * std::f32::consts::TAU;

    Sprite::new(SpriteKind::Asteroid, pos, theta).with_velocity(vel, omega)
}

/// Spawn one asteroid into the active set
pub fn spawn_asteroid(state: &mut GameState) {
    let asteroid = make_asteroid(&mut state.rng, state.field, state.score);
    log::debug!(
        "Asteroid spawned at ({:.1}, {:.1}) vel ({:.2}, {:.2})",
        asteroid.pos.x,
        asteroid.pos.y,
        asteroid.vel.x,
        asteroid.vel.y
    );
    state.insert(asteroid);
}

/// Build the four fragments of a broken asteroid, one per quadrant
pub fn make_fragments<R: Rng + ?Sized>(rng: &mut R, parent: &Sprite) -> [Sprite; FRAGMENTS_PER_ASTEROID] {
    let t = SpriteKind::Fragment.template();
    let half = parent.size() * 0.5;
    let margin = (half - Vec2::new(t.w as f32, t.h as f32)) * 0.5;

    std::array::from_fn(|i| {
        let quadrant = Vec2::new((i % 2) as f32, (i / 2) as f32);
        let pos = parent.pos + quadrant * half + margin;
        // -0.1 toward the left/top quadrants, +0.1 toward right/bottom
        let nudge = (quadrant * 2.0 - Vec2::ONE) * FRAGMENT_NUDGE;

        let speed_jitter = 1.0 + (rng.random::<f32>() * 2.0 - 1.0) * FRAGMENT_JITTER;
        let spin_jitter = 1.0 + (rng.random::<f32>() * 2.0 - 1.0) * FRAGMENT_JITTER;
        let theta = parent.theta + i as f32 * std::f32::consts::FRAC_PI_2;

        Sprite::new(SpriteKind::Fragment, pos, theta)
            .with_velocity(parent.vel * speed_jitter + nudge, parent.omega * spin_jitter)
    })
}

/// Remove every sprite beyond the despawn margin. Returns how many were removed.
pub fn despawn_out_of_bounds(state: &mut GameState) -> usize {
    let field = state.field;
    let before = state.sprites.len();
    state
        .sprites
        .retain(|_, s| !field.is_far_outside(s, DESPAWN_MARGIN));
    let removed = before - state.sprites.len();
    if removed > 0 {
        log::trace!("Despawned {} sprites", removed);
    }
    removed
}

/// Force an asteroid in if the active set is empty. Returns true if one was added.
pub fn ensure_populated(state: &mut GameState) -> bool {
    if !state.sprites.is_empty() {
        return false;
    }
    log::debug!("Active set empty, forcing asteroid spawn");
    spawn_asteroid(state);
    true
}

/// Under capacity, spawn one asteroid with a small per-tick chance
pub fn maybe_spawn(state: &mut GameState) -> bool {
    let target = capacity(state.score) as f32;
    if effective_population(&state.sprites) >= target {
        return false;
    }
    if state.rng.random::<f32>() >= SPAWN_CHANCE {
        return false;
    }
    spawn_asteroid(state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_difficulty_and_capacity() {
        assert_eq!(difficulty(0), 0.5);
        assert_eq!(difficulty(16000), 1.5);
        assert_eq!(capacity(0), 3);
        assert_eq!(capacity(999), 3);
        assert_eq!(capacity(2500), 5);
    }

    #[test]
    fn test_asteroids_spawn_outside_moving_inward() {
        let field = Field::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for score in [0, 8000, 100_000] {
            for _ in 0..500 {
                let a = make_asteroid(&mut rng, field, score);
                let size = a.size();
                let outside = a.pos.y <= -size.y
                    || a.pos.y >= field.height
                    || a.pos.x <= -size.x
                    || a.pos.x >= field.width;
                assert!(outside, "spawned inside field at {:?}", a.pos);

                if a.pos.y <= -size.y {
                    assert!(a.vel.y > 0.0);
                } else if a.pos.y >= field.height {
                    assert!(a.vel.y < 0.0);
                } else if a.pos.x <= -size.x {
                    assert!(a.vel.x > 0.0);
                } else {
                    assert!(a.vel.x < 0.0);
                }

                assert!(a.vel.x.abs() <= ASTEROID_SPEED_CAP);
                assert!(a.vel.y.abs() <= ASTEROID_SPEED_CAP);
                assert!(a.omega.abs() <= ASTEROID_SPIN_MAX * difficulty(score) + 1e-6);
                assert!(!field.is_far_outside(&a, DESPAWN_MARGIN));
            }
        }
    }

    #[test]
    fn test_edge_weights_follow_aspect_ratio() {
        let field = Field::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut horizontal = 0;
        let n = 20_000;
        for _ in 0..n {
            if matches!(choose_edge(&mut rng, field), Edge::Top | Edge::Bottom) {
                horizontal += 1;
            }
        }
        // Expected share 1024 / 1792 ≈ 0.571
        let share = horizontal as f32 / n as f32;
        assert!((share - 0.571).abs() < 0.02, "share = {share}");
    }

    #[test]
    fn test_fragments_fill_parent_quadrants() {
        let mut rng = Pcg32::seed_from_u64(3);
        let parent = Sprite::new(SpriteKind::Asteroid, Vec2::new(100.0, 200.0), 0.5)
            .with_velocity(Vec2::new(1.0, -2.0), 0.03);
        let frags = make_fragments(&mut rng, &parent);

        assert_eq!(frags[0].pos, Vec2::new(102.0, 202.0));
        assert_eq!(frags[1].pos, Vec2::new(134.0, 202.0));
        assert_eq!(frags[2].pos, Vec2::new(102.0, 234.0));
        assert_eq!(frags[3].pos, Vec2::new(134.0, 234.0));

        for (i, f) in frags.iter().enumerate() {
            assert_eq!(f.kind, SpriteKind::Fragment);
            assert_eq!(f.hitboxes(), SpriteKind::Fragment.template().hitboxes);
            let expected_theta = 0.5 + i as f32 * std::f32::consts::FRAC_PI_2;
            assert!((f.theta - expected_theta).abs() < 1e-5);
            assert!(f.omega >= 0.03 * 0.9 - 1e-6 && f.omega <= 0.03 * 1.1 + 1e-6);
        }
        // Left quadrants drift left relative to right ones
        assert!(frags[0].vel.x < parent.vel.x * 1.1 - 0.1 + 1e-4);
        assert!(frags[1].vel.x > parent.vel.x * 0.9 + 0.1 - 1e-4);
    }

    #[test]
    fn test_despawn_then_respawn_keeps_population() {
        let mut state = GameState::new(5);
        for s in state.sprites.values_mut() {
            s.pos.x = state.field.width + DESPAWN_MARGIN + 1.0;
        }
        assert_eq!(despawn_out_of_bounds(&mut state), 1);
        assert!(state.sprites.is_empty());
        assert!(ensure_populated(&mut state));
        assert_eq!(state.sprites.len(), 1);
        assert!(!ensure_populated(&mut state));
    }

    #[test]
    fn test_no_spawn_at_capacity() {
        let mut state = GameState::new(9);
        for _ in 0..2 {
            spawn_asteroid(&mut state);
        }
        assert_eq!(effective_population(&state.sprites), 3.0);
        for _ in 0..1000 {
            assert!(!maybe_spawn(&mut state));
        }
    }

    fn with_fragments(seed: u64, fragments: usize) -> GameState {
        let mut state = GameState::new(seed);
        spawn_asteroid(&mut state);
        for i in 0..fragments {
            let pos = Vec2::new(100.0 + 40.0 * i as f32, 100.0);
            state.insert(Sprite::new(SpriteKind::Fragment, pos, 0.0));
        }
        state
    }

    #[test]
    fn test_fragments_count_a_quarter() {
        let mut state = with_fragments(9, 4);
        assert_eq!(state.count(SpriteKind::Asteroid), 2);
        assert_eq!(effective_population(&state.sprites), 3.0);
        for _ in 0..1000 {
            assert!(!maybe_spawn(&mut state));
        }

        let mut state = with_fragments(9, 3);
        assert_eq!(effective_population(&state.sprites), 2.75);
        assert!((0..1000).any(|_| maybe_spawn(&mut state)));
        assert_eq!(state.count(SpriteKind::Asteroid), 3);
    }

    #[test]
    fn test_spawn_rate_under_capacity() {
        let mut spawned = 0;
        for seed in 0..400 {
            let mut state = GameState::new(seed);
            if maybe_spawn(&mut state) {
                spawned += 1;
            }
        }
        // ~5% of 400
        assert!((5..=40).contains(&spawned), "spawned = {spawned}");
    }
}
