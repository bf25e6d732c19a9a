use crate::*;

/// Drives a [`Round`] through its timed memorize phase.
///
/// Every path that replaces the round cancels the pending timers before the new
/// ones are scheduled, so two rounds never flash at the same time.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    round: Round,
    timing: RoundTiming,
    timers: TimerQueue,
}

impl RoundEngine {
    pub fn new(level: &Level, grid: &Grid, timing: RoundTiming, generation: u64) -> Self {
        let mut engine = Self {
            round: Round::start(level, grid, timing, generation),
            timing,
            timers: TimerQueue::new(),
        };
        engine.schedule_memorize_timers();
        engine
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn timing(&self) -> RoundTiming {
        self.timing
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    pub fn start(&mut self, level: &Level, grid: &Grid, timing: RoundTiming, generation: u64) {
        self.timers.cancel_all();
        self.timing = timing;
        self.round = Round::start(level, grid, timing, generation);
        log::debug!(
            "round {} started on level {} with {} targets",
            generation,
            level.id,
            self.round.target_count()
        );
        self.schedule_memorize_timers();
    }

    /// Fires every timer due up to `now`, then settles the clock there.
    /// Returns whether anything observable changed.
    pub fn advance_to(&mut self, now: Millis) -> bool {
        let mut updated = false;
        while let Some(timer) = self.timers.pop_due(now) {
            updated |= self.fire(timer);
        }
        self.timers.settle(now);
        updated
    }

    pub fn advance_by(&mut self, elapsed: Millis) -> bool {
        self.advance_to(self.timers.now().saturating_add(elapsed))
    }

    pub fn toggle_selection(&mut self, index: CellIndex) -> SelectOutcome {
        self.round.toggle_selection(index)
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.round.submit();
        if let SubmitOutcome::Scored(delta) = outcome {
            log::debug!("round {} submitted, delta {}", self.round.generation(), delta);
        }
        outcome
    }

    fn schedule_memorize_timers(&mut self) {
        let generation = self.round.generation();
        self.timers
            .schedule_repeating(TimerKind::FlashToggle, self.timing.flash_interval_ms, generation);
        self.timers
            .schedule_repeating(TimerKind::CountdownTick, COUNTDOWN_PERIOD_MS, generation);
        self.timers
            .schedule_once(TimerKind::MemorizeDeadline, self.timing.memorize_ms, generation);
    }

    fn fire(&mut self, timer: Timer) -> bool {
        if timer.generation != self.round.generation() {
            log::warn!(
                "dropping {:?} from round {}, current round is {}",
                timer.kind,
                timer.generation,
                self.round.generation()
            );
            self.timers.cancel(timer.id);
            return false;
        }

        log::trace!("timer {:?} fired at {}", timer.kind, timer.deadline);
        match timer.kind {
            TimerKind::FlashToggle => {
                self.round.flash_toggle();
                true
            }
            TimerKind::CountdownTick => {
                let before = self.round.remaining_secs();
                self.round.countdown_tick();
                before != self.round.remaining_secs()
            }
            TimerKind::MemorizeDeadline => {
                self.timers.cancel_all();
                let changed = self.round.finish_memorizing();
                if changed {
                    log::debug!("round {} now accepting selections", self.round.generation());
                }
                changed
            }
        }
    }
}
