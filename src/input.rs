//! Button sampling.

/// Levels of the three front buttons, sampled once per loop iteration.
///
/// Buttons are level-triggered: holding one repeats its request every
/// iteration, which is harmless because every request is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSample {
    /// Green button: start the wakeup sequence.
    pub start: bool,

    /// Red button: stop the wakeup sequence.
    pub stop: bool,

    /// Yellow button: scroll the current time.
    pub show_time: bool,
}

/// Trait for abstracting the digital inputs.
pub trait ButtonInputs {
    /// Reads the current button levels.
    fn read(&mut self) -> ButtonSample;
}
