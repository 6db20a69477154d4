//! The duck behavioral state machine
//!
//! Deterministic per-tick motion and the hit/respawn lifecycle for one
//! screen-bound flying target. Time arrives as milliseconds from the caller
//! and randomness arrives as an `Rng`, so every flight can be replayed
//! exactly.

use glam::Vec2;
use rand::Rng;

use super::SimError;
use super::animation::{FrameCycler, FrameRect, SheetLayout};
use crate::Rect;
use crate::consts::*;

/// Closed set of duck types. The type fixes the score value and which shot
/// sprite the presentation layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckKind {
    Normal,
    Red,
    Special,
}

impl DuckKind {
    pub const ALL: [DuckKind; 3] = [DuckKind::Normal, DuckKind::Red, DuckKind::Special];

    /// Score awarded (or charged) for hitting this duck
    pub fn points(self) -> i32 {
        match self {
            DuckKind::Special => 100,
            DuckKind::Normal => 50,
            DuckKind::Red => -25,
        }
    }
}

/// Lifecycle state. Flying-off is tracked as a separate flag because it can
/// be forced onto a duck in any state (miss penalty) and composes with these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Shot,
    WaitingToRespawn,
}

/// Emitted by `tick()` on the tick an appearance ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckEvent {
    Despawned,
}

/// What the presentation layer should draw for this duck right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteView {
    /// Flight animation frame from the duck's sheet
    Flight { frame: FrameRect, mirrored: bool },
    /// The kind-specific shot sprite
    Shot { mirrored: bool },
}

/// One screen-bound flying target
#[derive(Debug, Clone)]
pub struct Duck {
    pub kind: DuckKind,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// px per tick
    pub vel: Vec2,
    pub facing_right: bool,
    pub state: LifeState,
    pub flying_off: bool,
    pub anim: FrameCycler,
    /// Flying-window bounds for the top-left corner
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub window_width: f32,
    pub frame_size: Vec2,
    /// Start of the current appearance, for the fly-off timeout
    pub spawn_ms: u64,
    pub shot_ms: u64,
    pub respawn_started_ms: u64,
}

impl Duck {
    /// Create a duck and perform its initial spawn (alive immediately)
    pub fn new(kind: DuckKind, now_ms: u64, rng: &mut impl Rng) -> Result<Self, SimError> {
        Self::with_config(
            kind,
            WINDOW_WIDTH,
            FLIGHT_WINDOW_HEIGHT,
            Vec2::new(DEFAULT_SPEED_X, DEFAULT_SPEED_Y),
            now_ms,
            rng,
        )
    }

    /// As `new`, with explicit window geometry and starting velocity
    pub fn with_config(
        kind: DuckKind,
        window_width: f32,
        flight_height: f32,
        initial_vel: Vec2,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Result<Self, SimError> {
        let anim = FrameCycler::new(
            SheetLayout {
                width: SHEET_WIDTH,
                height: SHEET_HEIGHT,
            },
            FRAME_WIDTH,
            FRAME_HEIGHT,
            FRAME_CADENCE,
        )?;
        let frame_size = Vec2::new(FRAME_WIDTH as f32, FRAME_HEIGHT as f32);
        if window_width <= frame_size.x || flight_height <= frame_size.y {
            return Err(SimError::WindowTooSmall {
                width: window_width,
                height: flight_height,
            });
        }
        if initial_vel.x == 0.0 || initial_vel.y == 0.0 {
            return Err(SimError::ZeroVelocity);
        }

        let mut duck = Self {
            kind,
            pos: Vec2::ZERO,
            vel: initial_vel,
            facing_right: true,
            state: LifeState::WaitingToRespawn,
            flying_off: false,
            anim,
            x_min: 0.0,
            x_max: window_width - frame_size.x,
            y_min: 0.0,
            y_max: flight_height - frame_size.y,
            window_width,
            frame_size,
            spawn_ms: now_ms,
            shot_ms: 0,
            respawn_started_ms: now_ms,
        };
        duck.respawn(true, now_ms, rng);
        duck.facing_right = duck.vel.x > 0.0;
        duck.anim.set_direction(duck.facing_right);
        Ok(duck)
    }

    /// Advance one frame. Returns `Some(Despawned)` on the tick this
    /// appearance ends and the respawn cycle begins.
    pub fn tick(&mut self, now_ms: u64, rng: &mut impl Rng) -> Option<DuckEvent> {
        match self.state {
            LifeState::Shot => {
                if now_ms.saturating_sub(self.shot_ms) > SHOT_DISPLAY_MS {
                    self.respawn(false, now_ms, rng);
                    return Some(DuckEvent::Despawned);
                }
                None
            }
            LifeState::WaitingToRespawn => None,
            LifeState::Alive => self.fly(now_ms, rng),
        }
    }

    fn fly(&mut self, now_ms: u64, rng: &mut impl Rng) -> Option<DuckEvent> {
        if now_ms.saturating_sub(self.spawn_ms) > FLY_OFF_AFTER_MS {
            self.make_fly_off();
        }

        self.pos += self.vel;
        self.anim.advance();

        if self.flying_off {
            let gone = self.pos.y < -self.frame_size.y
                || self.pos.x < -self.frame_size.x
                || self.pos.x > self.window_width;
            if gone {
                self.respawn(false, now_ms, rng);
                return Some(DuckEvent::Despawned);
            }
            // No bouncing on the way out
            return None;
        }

        if rng.random_bool(ZIGZAG_CHANCE) {
            self.vel.y = -self.vel.y;
        }

        if self.pos.x <= self.x_min || self.pos.x >= self.x_max {
            self.vel.x = -self.vel.x;
            self.facing_right = !self.facing_right;
            self.anim.set_direction(self.facing_right);
        }
        if self.pos.y >= self.y_max {
            self.pos.y = self.y_max;
            self.vel.y = -self.vel.y.abs();
        }
        if self.pos.y <= self.y_min {
            self.vel.y = self.vel.y.abs();
        }
        None
    }

    /// Force the duck to leave the screen upward ahead of a scripted respawn
    pub fn make_fly_off(&mut self) {
        self.flying_off = true;
        self.vel.y = -self.vel.y.abs();
    }

    /// Start the respawn cycle. Non-initial respawns park the duck
    /// off-screen, grow its speed, and normalize direction up-and-right.
    pub fn respawn(&mut self, initial_spawn: bool, now_ms: u64, rng: &mut impl Rng) {
        self.state = LifeState::WaitingToRespawn;
        self.respawn_started_ms = now_ms;
        self.flying_off = false;

        if initial_spawn {
            self.pos = Vec2::new(rng.random_range(self.x_min..=self.x_max), self.y_max);
            self.state = LifeState::Alive;
        } else {
            self.pos = Vec2::new(PARK_X, PARK_Y);
            self.vel *= SPEED_GROWTH;
        }

        // A fresh appearance always opens moving up and to the right
        self.vel.x = self.vel.x.abs();
        self.vel.y = -self.vel.y.abs();
        self.spawn_ms = now_ms;
    }

    /// Poll the respawn-delay timer; brings the duck back once it expires
    pub fn handle_respawn(&mut self, now_ms: u64, rng: &mut impl Rng) {
        if self.state != LifeState::WaitingToRespawn {
            return;
        }
        if now_ms.saturating_sub(self.respawn_started_ms) >= RESPAWN_DELAY_MS {
            self.state = LifeState::Alive;
            self.pos = Vec2::new(rng.random_range(self.x_min..=self.x_max), self.y_max);
            self.vel.x = self.vel.x.abs();
            self.vel.y = -self.vel.y.abs();
            self.facing_right = true;
            self.anim.set_direction(true);
        }
    }

    /// Record a hit; the shot sprite stays up for the display window
    pub fn mark_shot(&mut self, now_ms: u64) {
        self.state = LifeState::Shot;
        self.shot_ms = now_ms;
    }

    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    pub fn is_waiting(&self) -> bool {
        self.state == LifeState::WaitingToRespawn
    }

    /// Current bounding box, derived from the frame size
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.frame_size.x, self.frame_size.y)
    }

    /// What to draw for this duck right now
    pub fn sprite(&self) -> SpriteView {
        match self.state {
            LifeState::Shot => SpriteView::Shot {
                mirrored: !self.facing_right,
            },
            _ => SpriteView::Flight {
                frame: self.anim.frame(),
                mirrored: self.anim.mirrored(),
            },
        }
    }
}
