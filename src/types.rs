//! Core value types shared by the clock, the alarm and the wakeup sequence.

/// The locally maintained time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    /// Hour, 0-23.
    pub hour: u8,

    /// Minute, 0-59.
    pub minute: u8,

    /// Second, 0-59.
    pub second: u8,

    /// True if the last resynchronization delivered a valid network time.
    pub is_authoritative: bool,
}

impl TimeOfDay {
    /// Creates a locally ticked (non-authoritative) time of day.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            is_authoritative: false,
        }
    }

    /// Advances the time by one second with 60/60/24 carry.
    pub fn advance_second(&mut self) {
        self.second = (self.second + 1) % 60;
        if self.second == 0 {
            self.minute = (self.minute + 1) % 60;
            if self.minute == 0 {
                self.hour = (self.hour + 1) % 24;
            }
        }
    }

    /// Returns true if hour and minute equal the alarm time.
    pub fn matches(&self, alarm: AlarmTime) -> bool {
        self.hour == alarm.hour && self.minute == alarm.minute
    }
}

/// The configured wake-up time.
///
/// Values are stored exactly as received from the control endpoint; an
/// out-of-range hour simply never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTime {
    /// Hour, stored as received.
    pub hour: u8,
    /// Minute, stored as received.
    pub minute: u8,
}

impl AlarmTime {
    /// Creates an alarm time without range checks.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

/// The phase of the wakeup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeupState {
    /// Waiting for the alarm or a manual start.
    #[default]
    Idle,

    /// Rising sun with the first track.
    Sunrise,

    /// Countdown from 10 to 1 with the second track.
    Countdown,

    /// Flame texture while the remaining tracks play one after another.
    Ember,

    /// A stop request was just honored. Returns to `Idle` on the next advance.
    Stopped,
}

impl WakeupState {
    /// Returns true while a phase of the sequence is active.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            WakeupState::Sunrise | WakeupState::Countdown | WakeupState::Ember
        )
    }

    /// Short human-readable name for diagnostics and the status page.
    pub fn as_str(&self) -> &'static str {
        match self {
            WakeupState::Idle => "idle",
            WakeupState::Sunrise => "sunrise",
            WakeupState::Countdown => "countdown",
            WakeupState::Ember => "ember",
            WakeupState::Stopped => "stopped",
        }
    }
}

/// Unrecoverable errors raised while bringing the system up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError<E> {
    /// The audio module did not answer during initialization.
    AudioInit(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for SetupError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetupError::AudioInit(err) => {
                write!(f, "unable to communicate with audio module: {:?}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for SetupError<E> {}
