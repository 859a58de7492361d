/// Virtual-clock timer scheduler.
///
/// The frame loop feeds elapsed milliseconds in; timers whose deadline has
/// passed are handed back one at a time, earliest first, ties broken by
/// issue order. Handing them out singly matters: a handler that cancels
/// other timers (e.g. a screen transition) must see those cancellations take
/// effect before the next timer is considered.
///
/// Every timer belongs to a `Scope`. Leaving a screen cancels that screen's
/// whole scope in one call.

/// Ownership of a timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Scope {
    /// Owned by one visit to a screen, identified by its entry epoch.
    Screen(u64),
    /// The pending interstitial settle.
    Transition,
    /// Overlays that outlive screens (easter egg).
    Overlay,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
pub struct Fired<T> {
    pub id: TimerId,
    pub scope: Scope,
    /// Virtual time the timer was due at.
    pub at: u64,
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Task<T> {
    id: TimerId,
    scope: Scope,
    due: u64,
    period: Option<u64>,
    payload: T,
}

pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler { now: 0, next_id: 0, tasks: Vec::new() }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fire once, `delay_ms` from now.
    pub fn after(&mut self, scope: Scope, delay_ms: u64, payload: T) -> TimerId {
        self.push(scope, delay_ms, None, payload)
    }

    /// Fire every `period_ms` (minimum 1) until cancelled.
    pub fn every(&mut self, scope: Scope, period_ms: u64, payload: T) -> TimerId {
        let period = period_ms.max(1);
        self.push(scope, period, Some(period), payload)
    }

    fn push(&mut self, scope: Scope, delay: u64, period: Option<u64>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task { id, scope, due: self.now + delay, period, payload });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every timer in `scope`. Returns how many were dropped.
    pub fn cancel_scope(&mut self, scope: Scope) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.scope != scope);
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Next timer due at or before `until`, advancing the clock to its
    /// deadline. Repeating timers are rescheduled before being returned.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<T>> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[idx];
        let fired = Fired {
            id: task.id,
            scope: task.scope,
            at: task.due,
            payload: task.payload.clone(),
        };
        let period = task.period;
        if let Some(p) = period {
            task.due += p;
        }
        self.now = self.now.max(fired.at);
        if period.is_none() {
            self.tasks.swap_remove(idx);
        }
        Some(fired)
    }

    /// Move the clock to `until` once everything due has been popped.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
