//! Platform abstraction layer
//!
//! Native-only pieces the game loop needs around the simulation:
//! - Fixed-rate frame pacing
//! - Startup seeding from the clock

pub mod time;

pub use time::{FramePacer, time_seed};
