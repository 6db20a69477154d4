//! Sound triggering
//!
//! The core only *requests* sounds; decoding and mixing belong to the
//! presentation layer. A sink receives discrete events and does whatever the
//! platform supports - or nothing at all.

use std::cell::RefCell;
use std::rc::Rc;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Trigger pulled on a live duck
    Gunshot,
    /// Every fifth cumulative hit
    Combo,
    /// Round terminated
    GameOver,
}

/// Receiver for sound trigger requests
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Discards every trigger
pub struct NullAudio;

impl SoundSink for NullAudio {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Logs triggers instead of playing them; used by the headless binary
pub struct LogAudio {
    sfx_volume: f32,
}

impl LogAudio {
    pub fn new(sfx_volume: f32) -> Self {
        Self { sfx_volume }
    }
}

impl SoundSink for LogAudio {
    fn play(&mut self, event: SoundEvent) {
        if self.sfx_volume > 0.0 {
            log::debug!("sfx {event:?} at volume {:.2}", self.sfx_volume);
        }
    }
}

/// Records triggers for assertions. The event log is shared so a test can
/// keep a handle after the sink is boxed into a `Context`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAudio {
    pub played: Rc<RefCell<Vec<SoundEvent>>>,
}

impl MemoryAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundSink for MemoryAudio {
    fn play(&mut self, event: SoundEvent) {
        self.played.borrow_mut().push(event);
    }
}
