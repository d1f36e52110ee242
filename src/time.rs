//! Time abstraction traits for platform-agnostic timing, plus the rate gate
//! every phase uses to run "once per N milliseconds".

/// Trait for abstracting monotonic time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;

    /// Subtracts duration from instant, returns None on underflow.
    fn checked_sub(self, duration: Self::Duration) -> Option<Self>;
}

/// A scheduled task that becomes eligible once per period.
///
/// The interval remembers the instant it last fired. Each firing advances
/// that reference by exactly one period, so a caller polling at a coarse
/// frame rate does not accumulate drift. If the caller fell behind by more
/// than a full period, the reference snaps to `now` instead of firing a
/// burst of catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct Interval<I: TimeInstant> {
    period: I::Duration,
    last: Option<I>,
}

impl<I: TimeInstant> Interval<I> {
    /// Creates an interval whose first poll fires immediately.
    pub fn new(period: I::Duration) -> Self {
        Self { period, last: None }
    }

    /// Creates an interval whose first firing is one period after `now`.
    pub fn starting_at(period: I::Duration, now: I) -> Self {
        Self {
            period,
            last: Some(now),
        }
    }

    /// Returns true if the interval is due at `now`, and schedules the next firing.
    pub fn poll(&mut self, now: I) -> bool {
        let period_millis = self.period.as_millis();

        let last = match self.last {
            None => {
                self.last = Some(now);
                return true;
            }
            Some(last) => last,
        };

        if now.duration_since(last).as_millis() < period_millis {
            return false;
        }

        let next = match last.checked_add(self.period) {
            Some(next) if now.duration_since(next).as_millis() < period_millis => next,
            _ => now,
        };
        self.last = Some(next);
        true
    }

    /// Makes the next poll fire immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Makes the next firing happen one period after `now`.
    pub fn restart(&mut self, now: I) {
        self.last = Some(now);
    }

    /// Returns the configured period.
    pub fn period(&self) -> I::Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Millis(u64);

    impl TimeDuration for Millis {
        const ZERO: Self = Millis(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Millis(millis)
        }

        fn saturating_sub(self, other: Self) -> Self {
            Millis(self.0.saturating_sub(other.0))
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Millis;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            Millis(self.0 - earlier.0)
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            self.0.checked_add(duration.0).map(At)
        }

        fn checked_sub(self, duration: Self::Duration) -> Option<Self> {
            self.0.checked_sub(duration.0).map(At)
        }
    }

    #[test]
    fn new_interval_fires_on_first_poll() {
        let mut interval = Interval::<At>::new(Millis(1000));
        assert!(interval.poll(At(5)));
        assert!(!interval.poll(At(5)));
        assert!(!interval.poll(At(1004)));
        assert!(interval.poll(At(1005)));
    }

    #[test]
    fn starting_at_waits_one_period() {
        let mut interval = Interval::starting_at(Millis(1000), At(0));
        assert!(!interval.poll(At(999)));
        assert!(interval.poll(At(1000)));
    }

    #[test]
    fn late_polls_do_not_accumulate_drift() {
        let mut interval = Interval::starting_at(Millis(1000), At(0));
        // Polled at a coarse 110 ms cadence the reference stays on whole seconds.
        assert!(interval.poll(At(1100)));
        assert!(!interval.poll(At(1990)));
        assert!(interval.poll(At(2090)));
    }

    #[test]
    fn long_stall_fires_once_then_snaps() {
        let mut interval = Interval::starting_at(Millis(100), At(0));
        assert!(interval.poll(At(1000)));
        assert!(!interval.poll(At(1050)));
        assert!(interval.poll(At(1100)));
    }

    #[test]
    fn reset_makes_next_poll_fire() {
        let mut interval = Interval::starting_at(Millis(1000), At(0));
        interval.reset();
        assert!(interval.poll(At(1)));
    }
}
