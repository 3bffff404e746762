//! Cancellable one-shot timers driven by an explicit clock.
//!
//! Nothing here sleeps. The host loop calls the manager's `process_timers`
//! periodically and due timers fire in deadline order.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::host::AnchorId;
use crate::tooltip::TooltipId;

/// Time source. `now` is the time elapsed since the clock's epoch.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock, epoch at construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    CommitShow,
    CommitHide,
    Dispose,
}

/// A scheduled timer.
#[derive(Debug, Clone)]
pub struct PendingTimer {
    pub id: TimerId,
    /// When this timer should fire.
    pub fire_at: Duration,
    pub kind: TimerKind,
    pub anchor: AnchorId,
    pub tooltip: TooltipId,
    /// Whether this timer has been cancelled.
    pub cancelled: bool,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: VecDeque<PendingTimer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        fire_at: Duration,
        kind: TimerKind,
        anchor: AnchorId,
        tooltip: TooltipId,
    ) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push_back(PendingTimer {
            id,
            fire_at,
            kind,
            anchor,
            tooltip,
            cancelled: false,
        });
        id
    }

    /// Cancel a timer by ID. Unknown or already fired timers are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        for timer in self.timers.iter_mut() {
            if timer.id == id {
                timer.cancelled = true;
                break;
            }
        }
    }

    /// Remove and return the earliest due timer. Cancelled timers are purged
    /// on the way. Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<PendingTimer> {
        self.timers.retain(|t| !t.cancelled);
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.fire_at <= now)
            .min_by_key(|(_, t)| (t.fire_at, t.id))
            .map(|(i, _)| i)?;
        self.timers.remove(index)
    }

    /// Number of live (not cancelled) timers.
    pub fn pending(&self) -> usize {
        self.timers.iter().filter(|t| !t.cancelled).count()
    }

    /// Earliest deadline among live timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .iter()
            .filter(|t| !t.cancelled)
            .map(|t| t.fire_at)
            .min()
    }
}
