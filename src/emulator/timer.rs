//! Wall-clock time sources and the two 60 Hz countdown timers.

use super::TIMER_PERIOD;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source, measured from an arbitrary fixed point.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real time, measured from when the clock was created.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {
            start: Instant::now(),
        }
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

/// A clock that only moves when told to.
/// Clones share the same time, so one can be handed to the
/// interpreter while another is kept to advance it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// The delay and sound timers. Both count down by one every
/// [`TIMER_PERIOD`] while they are non-zero.
#[derive(Debug)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    next_due: Duration,
}

impl Timers {
    pub fn new(now: Duration) -> Timers {
        Timers {
            delay: 0,
            sound: 0,
            next_due: now + TIMER_PERIOD,
        }
    }

    /// Apply every period that has fully elapsed by `now`.
    /// The deadline advances in whole periods so no time is lost to rounding.
    pub fn update(&mut self, now: Duration) {
        if now < self.next_due {
            return;
        }

        let periods = 1 + (now - self.next_due).as_micros() / TIMER_PERIOD.as_micros();
        let periods = periods.min(u128::from(u32::MAX)) as u32;
        self.next_due += TIMER_PERIOD * periods;

        let ticks = periods.min(u32::from(u8::MAX)) as u8;
        self.delay = self.delay.saturating_sub(ticks);
        self.sound = self.sound.saturating_sub(ticks);
    }
}
