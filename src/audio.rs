//! Audio cue sink
//!
//! The simulation never touches a mixer. It reports discrete cues through
//! [`AudioSink`]; whatever backend is attached decides how to play them.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Laser fired
    LaserFired,
    /// Asteroid or fragment destroyed
    RockDestroyed,
    /// Engine running (one cue per thrusting tick)
    Thrust,
    /// Ship hit by a rock
    ShipDestroyed,
}

impl SoundEffect {
    /// Every cue, in counter order
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::LaserFired,
        SoundEffect::RockDestroyed,
        SoundEffect::Thrust,
        SoundEffect::ShipDestroyed,
    ];

    /// Relative loudness before master/sfx volume
    pub fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::LaserFired => 0.5,
            SoundEffect::RockDestroyed => 0.8,
            SoundEffect::Thrust => 0.2,
            SoundEffect::ShipDestroyed => 1.0,
        }
    }

    fn index(&self) -> usize {
        match self {
            SoundEffect::LaserFired => 0,
            SoundEffect::RockDestroyed => 1,
            SoundEffect::Thrust => 2,
            SoundEffect::ShipDestroyed => 3,
        }
    }
}

/// Receiver of audio cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Collects cues in order
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Cue consumer for headless runs
///
/// Scales each cue by its base gain and the configured mix, logs what would
/// be audible and keeps per-effect counts for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct AudioManager {
    /// Master times sfx volume, zero when muted
    gain: f32,
    counts: [u64; SoundEffect::ALL.len()],
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::with_levels(0.8, 1.0, false)
    }
}

impl AudioManager {
    /// Volumes are clamped to 0.0 - 1.0
    pub fn with_levels(master_volume: f32, sfx_volume: f32, muted: bool) -> Self {
        let gain = if muted {
            0.0
        } else {
            master_volume.clamp(0.0, 1.0) * sfx_volume.clamp(0.0, 1.0)
        };
        Self {
            gain,
            counts: [0; SoundEffect::ALL.len()],
        }
    }

    /// How many times a cue has been received (audible or not)
    pub fn count(&self, effect: SoundEffect) -> u64 {
        self.counts[effect.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        self.counts[effect.index()] += 1;

        let level = self.gain * effect.base_gain();
        if level > 0.0 {
            log::trace!("Audio cue {:?} at gain {:.2}", effect, level);
        }
    }
}
