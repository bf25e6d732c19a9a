#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use round::*;
pub use rules::*;
pub use scheduler::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod engine;
mod error;
mod grid;
mod round;
mod rules;
mod scheduler;
mod score;
mod session;
mod types;

/// Side length of the canonical square board.
pub const DEFAULT_SIDE: Coord = 5;

/// How long target cells keep flashing before the player may select.
pub const DEFAULT_MEMORIZE_MS: Millis = 10_000;

/// Period of the flash on/off toggle while memorizing.
pub const DEFAULT_FLASH_INTERVAL_MS: Millis = 600;

/// Period of the visible countdown.
pub const COUNTDOWN_PERIOD_MS: Millis = 1_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTiming {
    pub memorize_ms: Millis,
    pub flash_interval_ms: Millis,
}

impl RoundTiming {
    pub const fn new_unchecked(memorize_ms: Millis, flash_interval_ms: Millis) -> Self {
        Self {
            memorize_ms,
            flash_interval_ms,
        }
    }

    pub fn new(memorize_ms: Millis, flash_interval_ms: Millis) -> Result<Self> {
        if flash_interval_ms == 0 {
            return Err(GameError::ZeroFlashInterval);
        }
        Ok(Self::new_unchecked(memorize_ms, flash_interval_ms))
    }

    /// Whole seconds shown when a round starts, rounded up.
    pub const fn countdown_start(&self) -> u32 {
        let secs = self.memorize_ms.div_ceil(COUNTDOWN_PERIOD_MS);
        if secs > u32::MAX as Millis {
            u32::MAX
        } else {
            secs as u32
        }
    }
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_MEMORIZE_MS, DEFAULT_FLASH_INTERVAL_MS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub timing: RoundTiming,
}

impl GameConfig {
    pub const fn new_unchecked(side: Coord, timing: RoundTiming) -> Self {
        Self { side, timing }
    }

    pub fn new(side: Coord, timing: RoundTiming) -> Result<Self> {
        if side == 0 {
            return Err(GameError::InvalidSideLength);
        }
        if timing.flash_interval_ms == 0 {
            return Err(GameError::ZeroFlashInterval);
        }
        Ok(Self::new_unchecked(side, timing))
    }

    pub const fn total_cells(&self) -> CellIndex {
        cell_count(self.side)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIDE, RoundTiming::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Changed,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    NoChange,
    /// The round was resolved and contributed `delta` points.
    Scored(u32),
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Scored(_))
    }

    pub const fn delta(self) -> Option<u32> {
        match self {
            Self::NoChange => None,
            Self::Scored(delta) => Some(delta),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    NoChange,
    /// A new round was started on the level at this catalog position.
    Started(usize),
}

impl LevelOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Started(_))
    }
}
