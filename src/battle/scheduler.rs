//! Virtual-clock task queue driving the timed steps of a turn.

use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Tasks ordered by due time; tasks due at the same instant fire in scheduling order.
///
/// The clock only moves when the owner advances it, so every transition can be
/// stepped through synchronously.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: VecDeque<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `task` to fire `delay` after the current clock.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        let position = self
            .pending
            .iter()
            .position(|entry| entry.due > due)
            .unwrap_or(self.pending.len());
        self.pending.insert(position, Scheduled { id, due, task });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    /// Drops every pending task. Nothing scheduled before this call will fire.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.front().map(|entry| entry.due)
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        if self.pending.front()?.due > until {
            return None;
        }
        let entry = self.pending.pop_front()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Moves the clock forward without firing anything. The clock never goes back.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_tasks_fire_in_due_order_then_fifo() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), "late");
        scheduler.schedule(ms(100), "first");
        scheduler.schedule(ms(100), "second");

        assert_eq!(scheduler.pop_due(ms(1_000)), Some("first"));
        assert_eq!(scheduler.now(), ms(100));
        assert_eq!(scheduler.pop_due(ms(1_000)), Some("second"));
        assert_eq!(scheduler.pop_due(ms(1_000)), Some("late"));
        assert_eq!(scheduler.now(), ms(500));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_nothing_fires_before_it_is_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), ());

        assert_eq!(scheduler.pop_due(ms(499)), None);
        assert_eq!(scheduler.next_due(), Some(ms(500)));
        assert_eq!(scheduler.pending.len(), 1);
    }

    #[test]
    fn test_delays_are_relative_to_the_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(ms(1_000));
        scheduler.schedule(ms(250), ());
        assert_eq!(scheduler.next_due(), Some(ms(1_250)));

        scheduler.advance_to(ms(10));
        assert_eq!(scheduler.now(), ms(1_000));
    }

    #[test]
    fn test_cancelled_tasks_never_fire() {
        let mut scheduler = Scheduler::new();
        let doomed = scheduler.schedule(ms(10), "doomed");
        scheduler.schedule(ms(20), "kept");

        assert!(scheduler.cancel(doomed));
        assert!(!scheduler.cancel(doomed));
        assert_eq!(scheduler.pop_due(ms(100)), Some("kept"));

        scheduler.schedule(ms(10), "a");
        scheduler.schedule(ms(10), "b");
        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.pop_due(ms(10_000)), None);
    }
}
