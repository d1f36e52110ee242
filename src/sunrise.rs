//! Rising sun animation.
//!
//! Two regimes keyed off the sun position. Below the top position the frame
//! is cleared and the sun moves up one row per second while its color warms
//! in steps of five. At the top the sun stays put and brightens by one
//! palette step every 30 ms until the palette index reaches its terminal
//! value, which completes the phase.

use crate::colors::heat_color;
use crate::frame::{Frame, MATRIX_HEIGHT, to_rgb888};
use crate::time::{Interval, TimeDuration, TimeInstant};
use embedded_graphics::Drawable;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::{Circle, Primitive, PrimitiveStyle};
use palette::Srgb;

/// Starting row of the sun center, below the visible area.
pub const SUN_START_POSITION: i8 = -6;

/// Row at which the sun stops rising.
pub const SUN_TOP_POSITION: i8 = 4;

/// Terminal palette index of the glow.
pub const SUN_MAX_HEAT: u8 = 254;

/// Sun radius in pixels.
pub const SUN_RADIUS: u32 = 3;

/// Column of the sun center.
pub const SUN_COLUMN: i32 = 3;

const RISE_HEAT_STEP: u8 = 5;
const RISE_PERIOD_MS: u64 = 1000;
const GLOW_PERIOD_MS: u64 = 30;

/// Progress of the sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SunriseProgress {
    /// Row of the sun center, counted upwards from the bottom edge.
    pub vertical_position: i8,

    /// Heat palette index of the sun color.
    pub heat_index: u8,

    /// Set once the glow reached [`SUN_MAX_HEAT`].
    pub reached_top: bool,
}

impl Default for SunriseProgress {
    fn default() -> Self {
        Self {
            vertical_position: SUN_START_POSITION,
            heat_index: 0,
            reached_top: false,
        }
    }
}

/// Frame generator for the sunrise phase.
pub struct SunriseAnimation<I: TimeInstant> {
    progress: SunriseProgress,
    rise_tick: Interval<I>,
    glow_tick: Interval<I>,
}

impl<I: TimeInstant> SunriseAnimation<I> {
    /// Creates a sunrise with the sun below the matrix.
    pub fn new() -> Self {
        Self {
            progress: SunriseProgress::default(),
            rise_tick: Interval::new(I::Duration::from_millis(RISE_PERIOD_MS)),
            glow_tick: Interval::new(I::Duration::from_millis(GLOW_PERIOD_MS)),
        }
    }

    /// Returns the sun position and glow.
    pub fn progress(&self) -> SunriseProgress {
        self.progress
    }

    /// Returns true once the glow has finished.
    pub fn reached_top(&self) -> bool {
        self.progress.reached_top
    }

    /// Restores the initial position and color.
    pub fn reset(&mut self) {
        self.progress = SunriseProgress::default();
        self.rise_tick.reset();
        self.glow_tick.reset();
    }

    /// Advances the animation if its current regime is due.
    pub fn advance(&mut self, now: I, frame: &mut Frame) {
        let color = heat_color(self.progress.heat_index);

        if self.progress.vertical_position < SUN_TOP_POSITION {
            if self.rise_tick.poll(now) {
                frame.clear();
                self.progress.vertical_position += 1;
                draw_sun(frame, self.progress.vertical_position, color);
                self.progress.heat_index =
                    self.progress.heat_index.saturating_add(RISE_HEAT_STEP);
            }
        } else if self.glow_tick.poll(now) {
            draw_sun(frame, self.progress.vertical_position, color);
            self.progress.heat_index = self
                .progress
                .heat_index
                .saturating_add(1)
                .min(SUN_MAX_HEAT);
            if self.progress.heat_index >= SUN_MAX_HEAT {
                self.progress.reached_top = true;
            }
        }
    }
}

impl<I: TimeInstant> Default for SunriseAnimation<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a sun row (counted from the bottom) onto a frame row.
fn screen_row(vertical_position: i8) -> i32 {
    (MATRIX_HEIGHT as i32 - 1) - vertical_position as i32
}

/// Draws a solid disc centered on the sun column at `vertical_position`.
///
/// Parts of the disc outside the matrix are clipped by the frame.
pub fn draw_sun(frame: &mut Frame, vertical_position: i8, color: Srgb<u8>) {
    let center = Point::new(SUN_COLUMN, screen_row(vertical_position));
    let _ = Circle::with_center(center, 2 * SUN_RADIUS + 1)
        .into_styled(PrimitiveStyle::with_fill(to_rgb888(color)))
        .draw(frame);
}
