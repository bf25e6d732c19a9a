use serde::{Deserialize, Serialize};

/// Running total for the lifetime of a session. There is no way to lower it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    total: u32,
    rounds_scored: u32,
    best_delta: u32,
}

impl Score {
    pub const fn new() -> Self {
        Self {
            total: 0,
            rounds_scored: 0,
            best_delta: 0,
        }
    }

    pub fn apply_round_result(&mut self, delta: u32) {
        self.total = self.total.saturating_add(delta);
        self.rounds_scored = self.rounds_scored.saturating_add(1);
        self.best_delta = self.best_delta.max(delta);
    }

    pub const fn total(&self) -> u32 {
        self.total
    }

    pub const fn rounds_scored(&self) -> u32 {
        self.rounds_scored
    }

    pub const fn best_delta(&self) -> u32 {
        self.best_delta
    }
}
