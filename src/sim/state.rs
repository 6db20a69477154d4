//! Round state and game modes
//!
//! Everything that must be identical across two runs with the same seed and
//! input sequence lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::SimError;
use super::duck::{Duck, DuckKind};
use crate::consts::*;

/// Which rule set terminates the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Finite shots and lives, unbounded time
    Standard,
    /// Unlimited shots, fixed time budget
    Timed,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Standard => "standard",
            GameMode::Timed => "time",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(GameMode::Standard),
            "time" | "timed" => Some(GameMode::Timed),
            _ => None,
        }
    }
}

/// Mode-specific runtime state; the variant also answers which HUD fields
/// apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Standard { lives: u8, shots_left: u8 },
    Timed { started_ms: u64, budget_ms: u64 },
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Playing,
    /// Terminal; hands off to the game-over/name-entry collaborator
    RoundOver,
}

/// UI-facing counters for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudModel {
    Standard { score: u32, lives: u8, shots: u8 },
    Timed { score: u32, remaining_secs: u64 },
}

/// Complete round state, deterministic given seed and inputs
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: ModeState,
    pub phase: RoundPhase,
    pub score: u32,
    /// Cumulative hits this round; every fifth awards a milestone bonus
    pub duck_hits: u32,
    /// Pool of one duck per kind
    pub ducks: Vec<Duck>,
    /// Index of the one active duck
    pub active: usize,
    /// Frame counter
    pub time_ticks: u64,
    /// Armed when an appearance ends; fires the duck switch after the delay
    pub switch_started_ms: Option<u64>,
}

impl RoundState {
    /// Create a round with one duck of each kind; the first is active and
    /// spawns immediately.
    pub fn new(mode: GameMode, seed: u64, now_ms: u64) -> Result<Self, SimError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ducks = DuckKind::ALL
            .iter()
            .map(|&kind| Duck::new(kind, now_ms, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;
        let mode = match mode {
            GameMode::Standard => ModeState::Standard {
                lives: STARTING_LIVES,
                shots_left: SHOTS_PER_DUCK,
            },
            GameMode::Timed => ModeState::Timed {
                started_ms: now_ms,
                budget_ms: TIMED_BUDGET_MS,
            },
        };
        Ok(Self {
            seed,
            rng,
            mode,
            phase: RoundPhase::Playing,
            score: 0,
            duck_hits: 0,
            ducks,
            active: 0,
            time_ticks: 0,
            switch_started_ms: None,
        })
    }

    pub fn game_mode(&self) -> GameMode {
        match self.mode {
            ModeState::Standard { .. } => GameMode::Standard,
            ModeState::Timed { .. } => GameMode::Timed,
        }
    }

    pub fn active_duck(&self) -> &Duck {
        &self.ducks[self.active]
    }

    /// Split borrow so the active duck and the RNG can be used together
    pub(crate) fn duck_and_rng(&mut self) -> (&mut Duck, &mut Pcg32) {
        let RoundState {
            ducks, active, rng, ..
        } = self;
        (&mut ducks[*active], rng)
    }

    /// HUD counters for the current mode
    pub fn hud(&self, now_ms: u64) -> HudModel {
        match self.mode {
            ModeState::Standard { lives, shots_left } => HudModel::Standard {
                score: self.score,
                lives,
                shots: shots_left,
            },
            ModeState::Timed {
                started_ms,
                budget_ms,
            } => {
                let remaining = budget_ms.saturating_sub(now_ms.saturating_sub(started_ms));
                HudModel::Timed {
                    score: self.score,
                    remaining_secs: remaining / 1_000,
                }
            }
        }
    }
}
