//! Text HUD for headless runs
//!
//! Logs a one-line summary of the field every `interval` frames.

use super::{RenderSink, RenderView};
use crate::sim::SpriteKind;

/// Per-kind sprite tally for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub asteroids: usize,
    pub fragments: usize,
    pub lasers: usize,
}

impl Census {
    pub fn of(view: &RenderView<'_>) -> Self {
        view.sprites().fold(Self::default(), |mut c, s| {
            match s.kind {
                SpriteKind::Asteroid => c.asteroids += 1,
                SpriteKind::Fragment => c.fragments += 1,
                SpriteKind::Laser => c.lasers += 1,
                SpriteKind::Ship => {}
            }
            c
        })
    }
}

#[derive(Debug, Clone)]
pub struct TextHud {
    interval: u64,
    frames: u64,
    last_line: Option<String>,
}

impl TextHud {
    /// `interval` of 0 disables output
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            frames: 0,
            last_line: None,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_line(&self) -> Option<&str> {
        self.last_line.as_deref()
    }

    pub fn format_line(view: &RenderView<'_>) -> String {
        let census = Census::of(view);
        let ship = view.ship();
        format!(
            "tick {:>6} | score {:>7} | rocks {:>2}+{:<2} lasers {:>2} | cooldown {:>2} | ship ({:.0}, {:.0}) {:.0}°",
            view.tick(),
            view.score(),
            census.asteroids,
            census.fragments,
            census.lasers,
            view.cooldown(),
            ship.pos.x,
            ship.pos.y,
            ship.angle_degrees,
        )
    }
}

impl RenderSink for TextHud {
    fn present(&mut self, view: &RenderView<'_>) {
        self.frames += 1;
        if self.interval == 0 || !self.frames.is_multiple_of(self.interval) {
            return;
        }
        let line = Self::format_line(view);
        log::info!("{}", line);
        self.last_line = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_hud_reports_on_interval() {
        let state = GameState::new(4);
        let view = RenderView::new(&state);
        let mut hud = TextHud::new(3);
        hud.present(&view);
        hud.present(&view);
        assert!(hud.last_line().is_none());
        hud.present(&view);
        let line = hud.last_line().expect("third frame reports");
        assert!(line.contains("rocks  1+0"));
        assert_eq!(hud.frames(), 3);
    }

    #[test]
    fn test_census_counts_kinds() {
        let state = GameState::new(4);
        let census = Census::of(&RenderView::new(&state));
        assert_eq!(
            census,
            Census {
                asteroids: 1,
                fragments: 0,
                lasers: 0
            }
        );
    }
}
