//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time arrives through the injected clock, never read ambiently
//! - No rendering or platform dependencies

pub mod animation;
pub mod duck;
pub mod state;
pub mod tick;

pub use animation::{FrameCycler, FrameRect, SheetLayout};
pub use duck::{Duck, DuckEvent, DuckKind, LifeState, SpriteView};
pub use state::{GameMode, HudModel, ModeState, RoundPhase, RoundState};
pub use tick::{TickInput, tick};

use thiserror::Error;

/// Construction-time misuse. Nothing here is recoverable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    #[error("frame dimensions and cadence must be non-zero")]
    InvalidFrameSpec,
    #[error("sprite sheet {sheet_width}px wide yields no complete {frame_width}px frame")]
    EmptyFrameSequence { sheet_width: u32, frame_width: u32 },
    #[error("sheet height {sheet_height}px is shorter than the {frame_height}px frame")]
    SheetTooShort { sheet_height: u32, frame_height: u32 },
    #[error("flying window {width}x{height} is too small for the sprite")]
    WindowTooSmall { width: f32, height: f32 },
    #[error("initial velocity must be non-zero on both axes")]
    ZeroVelocity,
}
