//! Locally ticking time of day, periodically replaced by network time.

use crate::time::{Interval, TimeDuration, TimeInstant};
use crate::types::TimeOfDay;

/// A time reading from the authoritative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

/// Trait for abstracting the network time source.
pub trait WallClockSource {
    /// Queries the current time. Returns `None` if the source could not
    /// deliver a valid reading.
    fn fetch(&mut self) -> Option<WallTime>;
}

/// Maintains the time of day.
///
/// Once per second the time advances locally. Once per resync interval the
/// wall clock source is queried; a valid reading replaces the local time
/// wholesale, an invalid one only downgrades the authoritative flag.
pub struct ClockSynchronizer<I: TimeInstant> {
    time: TimeOfDay,
    second_tick: Interval<I>,
    resync: Interval<I>,
}

impl<I: TimeInstant> ClockSynchronizer<I> {
    /// Creates a clock at 00:00:00 whose first local tick is one second after `now`.
    pub fn new(now: I, resync_interval: I::Duration) -> Self {
        Self {
            time: TimeOfDay::default(),
            second_tick: Interval::starting_at(I::Duration::from_millis(1000), now),
            resync: Interval::starting_at(resync_interval, now),
        }
    }

    /// Returns the current time of day.
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Queries the source immediately, as done once during setup.
    pub fn sync_now<W: WallClockSource>(&mut self, source: &mut W) -> bool {
        match source.fetch() {
            Some(wall) => {
                self.time = TimeOfDay {
                    hour: wall.hour,
                    minute: wall.minute,
                    second: wall.second,
                    is_authoritative: true,
                };
                debug!(
                    "clock synchronized to {}:{}:{}",
                    wall.hour,
                    wall.minute,
                    wall.second
                );
                true
            }
            None => {
                if self.time.is_authoritative {
                    warn!("time source invalid, continuing on local clock");
                }
                self.time.is_authoritative = false;
                false
            }
        }
    }

    /// Advances the clock. Call once per loop iteration.
    pub fn tick<W: WallClockSource>(&mut self, now: I, source: &mut W) {
        if self.second_tick.poll(now) {
            self.time.advance_second();
        }

        if self.resync.poll(now) {
            self.sync_now(source);
        }
    }
}
