//! Wall-clock helpers for the frame loop

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Frames the pacer may fall behind before it drops the backlog
const MAX_LAG_FRAMES: u32 = 8;

/// Seed derived from the current time, for runs without an explicit seed
pub fn time_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs() ^ (now.subsec_nanos() as u64).rotate_left(32)
}

/// Sleeps between ticks so they land on a fixed cadence
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    deadline: Instant,
    dropped: u64,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self {
            frame,
            deadline: Instant::now() + frame,
            dropped: 0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Frames skipped because the loop fell too far behind
    pub fn dropped_frames(&self) -> u64 {
        self.dropped
    }

    /// Block until the next frame is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.deadline {
            thread::sleep(self.deadline - now);
        } else if now - self.deadline > self.frame * MAX_LAG_FRAMES {
            // Too far behind to catch up; restart the cadence from now
            let behind = ((now - self.deadline).as_secs_f64() / self.frame.as_secs_f64()) as u64;
            self.dropped += behind;
            log::warn!("Frame loop fell {} frames behind, resyncing", behind);
            self.deadline = now;
        }
        self.deadline += self.frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let pacer = FramePacer::new(60);
        let micros = pacer.frame_duration().as_micros();
        assert!((16_600..=16_700).contains(&micros));
        assert_eq!(FramePacer::new(0).frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut pacer = FramePacer::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(15));
        assert_eq!(pacer.dropped_frames(), 0);
    }
}
