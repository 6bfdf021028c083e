//! Collision detection and resolution over multi-box hit shapes
//!
//! Every sprite's shape is a union of axis-aligned boxes that translate with
//! the sprite but never rotate. A pass runs in two phases: a pairwise scan
//! that only *marks* sprites, then a sweep that removes marked sprites and
//! breaks marked asteroids into fragments. Nothing is inserted or removed
//! while the scan is iterating.

use glam::Vec2;
use rand::Rng;

use super::spawn::make_fragments;
use super::sprite::{Sprite, SpriteKind};
use super::state::{SpriteKey, SpriteSet};
use crate::audio::{AudioSink, SoundEffect};

/// Half-open AABB overlap test on (min, max) corners
#[inline]
pub fn boxes_overlap(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> bool {
    a.0.x < b.1.x && a.1.x > b.0.x && a.0.y < b.1.y && a.1.y > b.0.y
}

/// True if any box of `a` overlaps any box of `b`
pub fn sprites_collide(a: &Sprite, b: &Sprite) -> bool {
    a.world_boxes()
        .any(|ba| b.world_boxes().any(|bb| boxes_overlap(ba, bb)))
}

/// Outcome of the marking scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// A rock touched the ship; nothing was marked
    pub ship_hit: bool,
    /// Rocks destroyed by lasers this tick
    pub kills: u32,
    /// Rock-rock overlaps seen (detected, never resolved)
    pub rock_contacts: u32,
}

/// Outcome of the resolution sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Sprites removed (rocks and lasers)
    pub removed: usize,
    /// Asteroids that broke into fragments
    pub asteroids_broken: usize,
    /// Fragments inserted
    pub fragments_spawned: usize,
}

/// True for a rock-laser pair in either order
fn rock_laser(a: &Sprite, b: &Sprite) -> bool {
    (a.kind.is_rock() && b.kind == SpriteKind::Laser)
        || (b.kind.is_rock() && a.kind == SpriteKind::Laser)
}

/// Any rock overlapping the ship?
pub fn ship_struck(ship: &Sprite, sprites: &SpriteSet) -> bool {
    sprites
        .values()
        .any(|s| s.kind.is_rock() && sprites_collide(s, ship))
}

/// Pairwise marking scan.
///
/// The ship check runs first and short-circuits: on a ship hit the set is
/// left untouched. Otherwise every unordered pair is visited once; a sprite
/// already marked this pass takes no further part, so one laser kills at most
/// one rock and no rock is counted twice.
pub fn scan(ship: &Sprite, sprites: &mut SpriteSet) -> ScanReport {
    let mut report = ScanReport::default();

    if ship_struck(ship, sprites) {
        report.ship_hit = true;
        return report;
    }

    let keys: Vec<SpriteKey> = sprites.keys().collect();
    for (i, &ka) in keys.iter().enumerate() {
        for &kb in &keys[i + 1..] {
            let (a, b) = (&sprites[ka], &sprites[kb]);
            if a.doomed {
                break;
            }
            if b.doomed {
                continue;
            }

            if rock_laser(a, b) {
                if sprites_collide(a, b) {
                    sprites[ka].doomed = true;
                    sprites[kb].doomed = true;
                    report.kills += 1;
                    break;
                }
            } else if a.kind.is_rock() && b.kind.is_rock() && sprites_collide(a, b) {
                report.rock_contacts += 1;
            }
        }
    }

    if report.rock_contacts > 0 {
        log::trace!("{} rock-rock contacts left unresolved", report.rock_contacts);
    }
    report
}

/// Remove every marked sprite; marked asteroids leave four fragments behind
pub fn resolve<R, A>(sprites: &mut SpriteSet, rng: &mut R, audio: &mut A) -> ResolveReport
where
    R: Rng + ?Sized,
    A: AudioSink + ?Sized,
{
    let mut report = ResolveReport::default();
    let doomed: Vec<SpriteKey> = sprites
        .iter()
        .filter(|(_, s)| s.doomed)
        .map(|(k, _)| k)
        .collect();

    for key in doomed {
        let Some(sprite) = sprites.remove(key) else {
            continue;
        };
        report.removed += 1;

        if sprite.kind.is_rock() {
            audio.play(SoundEffect::RockDestroyed);
        }
        if sprite.kind == SpriteKind::Asteroid {
            for fragment in make_fragments(rng, &sprite) {
                sprites.insert(fragment);
                report.fragments_spawned += 1;
            }
            report.asteroids_broken += 1;
        }
    }

    if report.removed > 0 {
        log::debug!(
            "Collision sweep: removed={} broken={} fragments={}",
            report.removed,
            report.asteroids_broken,
            report.fragments_spawned
        );
    }
    report
}
