//! Logical-clock task scheduler.
//!
//! Replaces wall-clock timers: tasks become due when the host advances the
//! clock, so tests can step through delays without sleeping. Tasks due at
//! the same instant fire in the order they were scheduled.

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TaskId,
    due: u64,
    period: Option<u64>,
    task: T,
}

/// Pending one-shot and periodic tasks against a millisecond clock.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create a scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.insert(delay_ms, None, task)
    }

    /// Run `task` every `period_ms`, first at `now + period_ms`.
    /// A zero period is treated as one millisecond.
    pub fn schedule_every(&mut self, period_ms: u64, task: T) -> TaskId {
        let period = period_ms.max(1);
        self.insert(period, Some(period), task)
    }

    /// Cancel a task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Whether a task is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due time of the earliest pending one-shot task.
    pub fn next_one_shot_due(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| e.period.is_none())
            .map(|e| e.due)
            .min()
    }

    /// Take the earliest task due at or before `deadline`, moving the clock
    /// to its due time. Periodic tasks are re-armed for their next period.
    pub fn pop_due(&mut self, deadline: u64) -> Option<T> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= deadline)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let due = self.entries[index].due;
        self.now = self.now.max(due);
        match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.due += period;
                Some(entry.task.clone())
            }
            None => Some(self.entries.remove(index).task),
        }
    }

    /// Move the clock forward to `deadline` without firing anything.
    /// Call after draining [`Scheduler::pop_due`].
    pub fn advance_to(&mut self, deadline: u64) {
        self.now = self.now.max(deadline);
    }

    fn insert(&mut self, delay_ms: u64, period: Option<u64>, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay_ms,
            period,
            task,
        });
        id
    }
}
