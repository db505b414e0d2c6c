use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Handle to a pending timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    deadline: Instant,
    seq: u64,
}

impl TimerId {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Deadline queue for a single-threaded event loop.
///
/// Nothing fires on its own: the owner calls [`TimerQueue::advance`] with the
/// current time and handles whatever came due, which keeps every timer on the
/// same clock as the input that scheduled it.
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: BTreeMap<TimerId, T>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TimerId {
        let id = TimerId {
            deadline: now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(id, payload);
        id
    }

    /// Removes a pending timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.pending.remove(&id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(TimerId::deadline)
    }

    /// Pops every timer whose deadline is at or before `now`, earliest first.
    /// Timers sharing a deadline fire in scheduling order.
    pub fn advance(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().deadline > now {
                break;
            }
            let id = *entry.key();
            due.push((id, entry.remove()));
        }
        due
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
