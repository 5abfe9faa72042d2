//! Fire-and-forget cosmetic timers.
//!
//! Callbacks hold `Weak` handles to the visual state they touch. When the grid
//! is rebuilt the strong handles are dropped, so a late callback finds nothing
//! to upgrade and does nothing.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Transient look of a single day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pulse {
    #[default]
    Rest,
    Raised,
}

/// Transient look of the whole grid after a month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Settled,
    /// Hidden and offset toward the side the month is arriving from.
    /// `from_right` is true when moving forward.
    Entering { from_right: bool },
    Settling,
}

pub type Visual<T> = Rc<Cell<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

struct Pending {
    id: TimerId,
    due: Instant,
    action: Box<dyn FnOnce()>,
}

#[derive(Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, action: impl FnOnce() + 'static) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due,
            action: Box::new(action),
        });
        id
    }

    /// Schedules a write of `value` into `target`, if it is still alive at `due`.
    pub fn set_later<T: Copy + 'static>(
        &mut self,
        due: Instant,
        target: &Visual<T>,
        value: T,
    ) -> TimerId {
        let weak: Weak<Cell<T>> = Rc::downgrade(target);
        self.schedule(due, move || {
            if let Some(cell) = weak.upgrade() {
                cell.set(value);
            }
        })
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Runs every callback due at or before `now`, oldest deadline first.
    /// Returns how many ran.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by_key(|p| (p.due, p.id));
        let count = due.len();
        for p in due {
            (p.action)();
        }
        count
    }

}

/// Starts a pulse on `target` and schedules its reset after `length`.
pub fn pulse(
    scheduler: &mut Scheduler,
    target: &Visual<Pulse>,
    now: Instant,
    length: Duration,
) -> TimerId {
    target.set(Pulse::Raised);
    scheduler.set_later(now + length, target, Pulse::Rest)
}

/// Puts `target` in its entering position and schedules the settle steps.
pub fn slide_in(
    scheduler: &mut Scheduler,
    target: &Visual<Motion>,
    from_right: bool,
    now: Instant,
    delay: Duration,
    length: Duration,
) -> [TimerId; 2] {
    target.set(Motion::Entering { from_right });
    [
        scheduler.set_later(now + delay, target, Motion::Settling),
        scheduler.set_later(now + delay + length, target, Motion::Settled),
    ]
}
