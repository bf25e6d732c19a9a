use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    FlashToggle,
    CountdownTick,
    MemorizeDeadline,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub deadline: Millis,
    pub period: Option<Millis>,
    /// Round generation that scheduled this timer.
    pub generation: u64,
}

/// Cooperative single-threaded timer queue over a virtual clock.
///
/// Nothing fires on its own: the owner pulls due timers with [`TimerQueue::pop_due`]
/// while advancing time. Timers sharing a deadline fire in the order they were
/// first scheduled, repeating timers keep that position when re-armed.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Millis,
    next_id: u64,
    pending: BTreeMap<(Millis, TimerId), Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.first_key_value().map(|(&(deadline, _), _)| deadline)
    }

    pub fn schedule_once(&mut self, kind: TimerKind, delay: Millis, generation: u64) -> TimerId {
        self.insert(kind, delay, None, generation)
    }

    /// First firing happens one `period` from now. A zero period is bumped to 1ms
    /// so virtual time always moves forward.
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        period: Millis,
        generation: u64,
    ) -> TimerId {
        let period = period.max(1);
        self.insert(kind, period, Some(period), generation)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&(_, timer_id), _| timer_id != id);
        before != self.pending.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        if cancelled > 0 {
            log::trace!("cancelled {} pending timers", cancelled);
        }
        cancelled
    }

    /// Removes and returns the earliest timer due at or before `until`, moving the
    /// clock to its deadline.
    pub fn pop_due(&mut self, until: Millis) -> Option<Timer> {
        let (&key, _) = self.pending.first_key_value()?;
        if key.0 > until {
            return None;
        }
        let timer = self.pending.remove(&key)?;
        self.now = self.now.max(timer.deadline);

        if let Some(period) = timer.period {
            let deadline = timer.deadline.saturating_add(period);
            self.pending.insert(
                (deadline, timer.id),
                Timer {
                    deadline,
                    ..timer
                },
            );
        }

        Some(timer)
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn settle(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    fn insert(
        &mut self,
        kind: TimerKind,
        delay: Millis,
        period: Option<Millis>,
        generation: u64,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay);
        self.pending.insert(
            (deadline, id),
            Timer {
                id,
                kind,
                deadline,
                period,
                generation,
            },
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn drain(queue: &mut TimerQueue, until: Millis) -> Vec<(Millis, TimerKind)> {
        let mut fired = Vec::new();
        while let Some(timer) = queue.pop_due(until) {
            fired.push((timer.deadline, timer.kind));
        }
        queue.settle(until);
        fired
    }

    #[test]
    fn repeating_timer_rearms_until_cancelled() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(TimerKind::CountdownTick, 1_000, 0);

        let fired = drain(&mut queue, 3_500);

        assert_eq!(fired.len(), 3);
        assert_eq!(queue.now(), 3_500);
        assert_eq!(queue.next_deadline(), Some(4_000));

        assert_eq!(queue.cancel_all(), 1);
        assert!(drain(&mut queue, 10_000).is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(TimerKind::CountdownTick, 1_000, 0);
        queue.schedule_once(TimerKind::MemorizeDeadline, 2_000, 0);

        let fired = drain(&mut queue, 2_000);

        assert_eq!(
            fired,
            [
                (1_000, TimerKind::CountdownTick),
                (2_000, TimerKind::CountdownTick),
                (2_000, TimerKind::MemorizeDeadline),
            ]
        );
    }

    #[test]
    fn cancel_removes_a_single_timer() {
        let mut queue = TimerQueue::new();
        let flash = queue.schedule_repeating(TimerKind::FlashToggle, 600, 0);
        queue.schedule_once(TimerKind::MemorizeDeadline, 1_000, 0);

        assert!(queue.cancel(flash));
        assert!(!queue.cancel(flash));
        assert_eq!(queue.pending_count(), 1);
        assert_eq!(drain(&mut queue, 1_000), [(1_000, TimerKind::MemorizeDeadline)]);
        assert!(queue.is_idle());
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut queue = TimerQueue::new();
        queue.settle(5_000);
        queue.settle(1_000);
        queue.schedule_once(TimerKind::MemorizeDeadline, 250, 3);

        assert_eq!(queue.now(), 5_000);
        let timer = queue.pop_due(Millis::MAX).unwrap();
        assert_eq!(timer.deadline, 5_250);
        assert_eq!(timer.generation, 3);
    }

    #[test]
    fn zero_period_still_advances() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(TimerKind::FlashToggle, 0, 0);

        assert_eq!(drain(&mut queue, 3).len(), 3);
    }
}
