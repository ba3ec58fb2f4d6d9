//! Virtual-clock scheduler for delayed follow-ups.
//!
//! Nothing here sleeps. The owner moves the clock forward explicitly with
//! [`Scheduler::pop_due`] or [`Scheduler::advance_to`], which keeps timer
//! behaviour deterministic under test. Tasks are keyed by the match that
//! scheduled them so a match can drop everything it still has in flight.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, time::Duration};
use uuid::Uuid;

/// Identifies one match instance.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TaskId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled<T> {
    pub id: TaskId,
    pub owner: MatchId,
    pub due: Duration,
    pub task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    /// Ordered by due time, then by scheduling order.
    tasks: BTreeMap<(Duration, TaskId), Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, owner: MatchId, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        self.tasks.insert(
            (due, id),
            Scheduled {
                id,
                owner,
                due,
                task,
            },
        );
        id
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.tasks.keys().find(|(_, task_id)| *task_id == id).copied();
        key.and_then(|key| self.tasks.remove(&key)).is_some()
    }

    /// Drop every pending task of `owner`, returning how many were dropped.
    pub fn cancel_owner(&mut self, owner: MatchId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, scheduled| scheduled.owner != owner);
        before - self.tasks.len()
    }

    /// Take the earliest task due at or before `until`, moving the clock to
    /// its due time. Tasks scheduled from the returned one are visible to
    /// the next call.
    pub fn pop_due(&mut self, until: Duration) -> Option<Scheduled<T>> {
        let (&(due, _), _) = self.tasks.first_key_value()?;
        if due > until {
            return None;
        }
        let (_, scheduled) = self.tasks.pop_first()?;
        self.now = self.now.max(scheduled.due);
        Some(scheduled)
    }

    /// Move the clock forward without firing anything. Call after draining
    /// [`Self::pop_due`] for the same instant.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|(due, _)| *due)
    }

    #[must_use]
    pub fn pending(&self, owner: MatchId) -> usize {
        self.tasks.values().filter(|s| s.owner == owner).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
