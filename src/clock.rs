//! Suspension points for the dispatcher.
//!
//! The dispatcher never sleeps directly; it asks its [`Clock`]. Production
//! code uses [`SystemClock`], tests and dry runs use [`ManualClock`] to record
//! the requested pauses without waiting.

use std::cell::RefCell;
use std::time::Duration;

pub trait Clock {
    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Wall-clock sleeps via `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Records sleeps instead of performing them
#[derive(Debug, Default)]
pub struct ManualClock {
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested pause, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// Sum of all requested pauses.
    pub fn elapsed(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }
}

impl Clock for ManualClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn manual_clock_records() {
        let clock = ManualClock::new();
        clock.sleep(Duration::from_millis(10));
        clock.sleep(Duration::from_millis(5));
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_millis(10), Duration::from_millis(5)]
        );
        assert_eq!(clock.elapsed(), Duration::from_millis(15));
    }

    #[test]
    fn system_clock_waits() {
        let start = Instant::now();
        SystemClock.sleep(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn clock_by_reference() {
        fn pause<C: Clock>(clock: C) {
            clock.sleep(Duration::from_millis(1));
        }
        let clock = ManualClock::new();
        pause(&clock);
        assert_eq!(clock.sleeps().len(), 1);
    }
}
