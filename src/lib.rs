//! Duckshot - an arcade duck-shooting gallery
//!
//! Core modules:
//! - `sim`: Deterministic simulation (duck state machine, round rules, animation)
//! - `platform`: Clock abstraction for native and test time sources
//! - `audio`: Sound-trigger sink (no playback; the presentation layer owns the mixer)
//! - `scores`: Top-10 leaderboard persisted as `name,score` lines
//! - `settings`: Player preferences persisted as JSON

pub mod audio;
pub mod platform;
pub mod scores;
pub mod settings;
pub mod sim;

pub use audio::{SoundEvent, SoundSink};
pub use platform::{Clock, ManualClock, SystemClock};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window width in pixels
    pub const WINDOW_WIDTH: f32 = 800.0;
    /// Height of the flying window; ducks never descend below it
    pub const FLIGHT_WINDOW_HEIGHT: f32 = 360.0;

    /// Sprite sheet geometry - flight frames are laid out left to right
    pub const SHEET_WIDTH: u32 = 255;
    pub const SHEET_HEIGHT: u32 = 90;
    pub const FRAME_WIDTH: u32 = 85;
    pub const FRAME_HEIGHT: u32 = 90;
    /// Ticks between animation frame changes
    pub const FRAME_CADENCE: u32 = 10;

    /// Initial duck velocity in px/tick
    pub const DEFAULT_SPEED_X: f32 = 3.0;
    pub const DEFAULT_SPEED_Y: f32 = -3.0;
    /// Per-tick chance of inverting vertical velocity
    pub const ZIGZAG_CHANCE: f64 = 0.05;
    /// Velocity growth factor applied on every non-initial respawn
    pub const SPEED_GROWTH: f32 = 1.1;
    /// Time on screen before a duck gives up and flies off
    pub const FLY_OFF_AFTER_MS: u64 = 5_000;
    /// How long the shot sprite stays up before the respawn cycle starts
    pub const SHOT_DISPLAY_MS: u64 = 350;
    /// Off-screen wait before a respawned duck reappears
    pub const RESPAWN_DELAY_MS: u64 = 1_000;
    /// Delay before the next duck is picked once an appearance ends
    pub const SWITCH_DELAY_MS: u64 = 2_000;
    /// Parking spot for despawned ducks while they wait
    pub const PARK_X: f32 = -100.0;
    pub const PARK_Y: f32 = -100.0;

    /// Standard mode: lives and per-appearance shot budget
    pub const STARTING_LIVES: u8 = 3;
    pub const SHOTS_PER_DUCK: u8 = 3;
    /// Timed mode budget
    pub const TIMED_BUDGET_MS: u64 = 60_000;
    /// Every Nth cumulative hit awards a milestone bonus
    pub const MILESTONE_INTERVAL: u32 = 5;

    /// Nominal frame rate and derived tick length
    pub const TICK_HZ: u32 = 60;
    pub const TICK_MS: u64 = 1_000 / TICK_HZ as u64;
}

/// Axis-aligned rectangle used for hit testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Point containment, inclusive on the top-left edges
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Collaborator bundle handed to the simulation each tick.
///
/// Owns the time source and the sound trigger, so the core never reaches
/// into ambient global state.
pub struct Context {
    pub clock: Box<dyn Clock>,
    pub audio: Box<dyn SoundSink>,
}

impl Context {
    pub fn new(clock: Box<dyn Clock>, audio: Box<dyn SoundSink>) -> Self {
        Self { clock, audio }
    }

    /// Manual clock and discarded sound triggers, for tests and headless runs
    pub fn headless() -> Self {
        Self::new(Box::new(ManualClock::new()), Box::new(audio::NullAudio))
    }
}
