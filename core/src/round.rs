use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Memorizing,
    Selecting,
    Resulted,
}

impl Phase {
    pub const fn is_memorizing(self) -> bool {
        matches!(self, Self::Memorizing)
    }

    pub const fn accepts_selection(self) -> bool {
        matches!(self, Self::Selecting)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Resulted)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Memorizing
    }
}

/// Correctness sets of a submitted round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Selected cells that were targets.
    pub correct: CellSet,
    /// Selected non-targets together with targets that were never selected.
    pub incorrect: CellSet,
    pub wrong_count: u32,
    pub missed_count: u32,
}

impl RoundResult {
    fn compare(selection: &CellSet, targets: &CellSet) -> Self {
        let correct: CellSet = selection.intersection(targets).copied().collect();
        let wrong: CellSet = selection.difference(targets).copied().collect();
        let missed: CellSet = targets.difference(selection).copied().collect();
        let wrong_count = len_u32(&wrong);
        let missed_count = len_u32(&missed);

        Self {
            correct,
            incorrect: wrong.union(&missed).copied().collect(),
            wrong_count,
            missed_count,
        }
    }

    pub fn correct_count(&self) -> u32 {
        len_u32(&self.correct)
    }

    /// Points for the round: correct picks offset by wrong picks, never negative.
    /// Missed targets cost nothing.
    pub fn delta(&self) -> u32 {
        self.correct_count().saturating_sub(self.wrong_count)
    }

    pub fn is_perfect(&self) -> bool {
        self.incorrect.is_empty()
    }
}

fn len_u32(set: &CellSet) -> u32 {
    set.len().try_into().unwrap_or(u32::MAX)
}

/// State of one memorize, select, submit cycle. Only changes through its
/// transition methods, none of which know about timers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    level_id: u32,
    generation: u64,
    targets: CellSet,
    phase: Phase,
    flash_visible: bool,
    remaining_secs: u32,
    selection: CellSet,
    result: Option<RoundResult>,
}

impl Round {
    pub fn start(level: &Level, grid: &Grid, timing: RoundTiming, generation: u64) -> Self {
        Self {
            level_id: level.id,
            generation,
            targets: level.rule.target_set(grid),
            phase: Phase::Memorizing,
            flash_visible: true,
            remaining_secs: timing.countdown_start(),
            selection: CellSet::new(),
            result: None,
        }
    }

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flash_visible(&self) -> bool {
        self.flash_visible
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn selection(&self) -> &CellSet {
        &self.selection
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub(crate) fn targets(&self) -> &CellSet {
        &self.targets
    }

    /// Target cells currently lit by the memorize flash.
    pub fn flashing_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let lit = self.phase.is_memorizing() && self.flash_visible;
        self.targets.iter().copied().filter(move |_| lit)
    }

    pub fn is_flashing(&self, index: CellIndex) -> bool {
        self.phase.is_memorizing() && self.flash_visible && self.targets.contains(&index)
    }

    pub fn flash_toggle(&mut self) {
        if self.phase.is_memorizing() {
            self.flash_visible = !self.flash_visible;
        }
    }

    pub fn countdown_tick(&mut self) {
        if self.phase.is_memorizing() {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
        }
    }

    pub fn finish_memorizing(&mut self) -> bool {
        if !self.phase.is_memorizing() {
            return false;
        }
        self.flash_visible = false;
        self.phase = Phase::Selecting;
        true
    }

    pub fn toggle_selection(&mut self, index: CellIndex) -> SelectOutcome {
        if !self.phase.accepts_selection() || self.result.is_some() {
            return SelectOutcome::NoChange;
        }
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
        SelectOutcome::Changed
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.phase.accepts_selection() || self.result.is_some() {
            return SubmitOutcome::NoChange;
        }
        let result = RoundResult::compare(&self.selection, &self.targets);
        let delta = result.delta();
        self.result = Some(result);
        self.phase = Phase::Resulted;
        SubmitOutcome::Scored(delta)
    }
}
