//! Tunables for the alarm clock, with the defaults the hardware was tuned for.

use crate::time::TimeDuration;
use crate::types::AlarmTime;
use palette::Srgb;

/// Default wake-up time until the control page sets another one.
pub const DEFAULT_ALARM: AlarmTime = AlarmTime::new(16, 58);

/// Audio module volume, 0-30.
pub const DEFAULT_VOLUME: u8 = 20;

/// Global LED brightness, 0-255.
pub const DEFAULT_BRIGHTNESS: u8 = 20;

/// Main loop rate.
pub const DEFAULT_FPS: u64 = 10;

/// Upper bound of the random heat drop per row in the ember animation, 0-255.
pub const DEFAULT_MAX_COOLDOWN: u8 = 120;

/// Seconds between two queries of the network time source.
pub const DEFAULT_RESYNC_SECS: u64 = 10;

/// Color used for scrolled text.
pub const DEFAULT_TEXT_COLOR: Srgb<u8> = Srgb::new(0xff, 0x00, 0xff);

/// Runtime configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config<D: TimeDuration> {
    /// Alarm time loaded at startup.
    pub alarm: AlarmTime,

    /// Audio module volume.
    pub volume: u8,

    /// Brightness applied when a frame is flushed.
    pub brightness: u8,

    /// Delay between two loop iterations.
    pub frame_period: D,

    /// Interval between network time queries.
    pub resync_interval: D,

    /// Maximum random cooldown per ember row.
    pub max_cooldown: u8,

    /// Color of the show-time and countdown text.
    pub text_color: Srgb<u8>,

    /// Seed for the ember flame generator.
    pub seed: u64,
}

impl<D: TimeDuration> Config<D> {
    /// Overrides the startup alarm time.
    pub fn with_alarm(mut self, alarm: AlarmTime) -> Self {
        self.alarm = alarm;
        self
    }

    /// Overrides the audio volume, clamped to the module's 0-30 range.
    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume.min(30);
        self
    }

    /// Overrides the global LED brightness.
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Overrides the loop rate. A zero rate is treated as one frame per second.
    pub fn with_fps(mut self, fps: u64) -> Self {
        self.frame_period = D::from_millis(1000 / fps.max(1));
        self
    }

    /// Overrides the interval between network time queries.
    pub fn with_resync_interval(mut self, interval: D) -> Self {
        self.resync_interval = interval;
        self
    }

    /// Overrides the maximum ember cooldown; 0 disables cooling.
    pub fn with_max_cooldown(mut self, max_cooldown: u8) -> Self {
        self.max_cooldown = max_cooldown;
        self
    }

    /// Overrides the color of scrolled text.
    pub fn with_text_color(mut self, color: Srgb<u8>) -> Self {
        self.text_color = color;
        self
    }

    /// Seeds the flame generator, e.g. from a hardware RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl<D: TimeDuration> Default for Config<D> {
    fn default() -> Self {
        Self {
            alarm: DEFAULT_ALARM,
            volume: DEFAULT_VOLUME,
            brightness: DEFAULT_BRIGHTNESS,
            frame_period: D::from_millis(1000 / DEFAULT_FPS),
            resync_interval: D::from_millis(DEFAULT_RESYNC_SECS * 1000),
            max_cooldown: DEFAULT_MAX_COOLDOWN,
            text_color: DEFAULT_TEXT_COLOR,
            seed: 0x5eed_cafe,
        }
    }
}
