//! Countdown animation from 10 to 1, one digit per second.

use crate::frame::{Frame, to_rgb888};
use crate::text::ScrollingText;
use crate::time::{Interval, TimeDuration, TimeInstant};
use embedded_graphics::Drawable;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle, Rectangle};
use palette::Srgb;

/// First digit shown.
pub const COUNTDOWN_START: u8 = 10;

/// Last digit shown; the countdown never goes below it.
pub const COUNTDOWN_END: u8 = 1;

/// Columns a digit is scrolled in from the right edge before it is shown.
pub const DIGIT_SCROLL_STEPS: usize = 7;

const TEN_COLOR: Srgb<u8> = Srgb::new(0xff, 0x00, 0x00);
const DIGIT_PERIOD_MS: u64 = 1000;

/// Progress of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownProgress {
    /// Digit drawn on the next tick.
    pub remaining: u8,

    /// Set once the final digit has been drawn.
    pub animation_done: bool,
}

impl Default for CountdownProgress {
    fn default() -> Self {
        Self {
            remaining: COUNTDOWN_START,
            animation_done: false,
        }
    }
}

/// Frame generator for the countdown phase.
pub struct CountdownAnimation<I: TimeInstant> {
    progress: CountdownProgress,
    tick: Interval<I>,
    text: ScrollingText,
}

impl<I: TimeInstant> CountdownAnimation<I> {
    /// Creates a countdown at 10 drawing single digits in `text_color`.
    pub fn new(text_color: Srgb<u8>) -> Self {
        Self {
            progress: CountdownProgress::default(),
            tick: Interval::new(I::Duration::from_millis(DIGIT_PERIOD_MS)),
            text: ScrollingText::new(text_color),
        }
    }

    /// Returns the digit and completion flag.
    pub fn progress(&self) -> CountdownProgress {
        self.progress
    }

    /// Returns true once the last digit has been drawn.
    pub fn animation_done(&self) -> bool {
        self.progress.animation_done
    }

    /// Restarts at 10; the next advance draws immediately.
    pub fn reset(&mut self) {
        self.progress = CountdownProgress::default();
        self.tick.reset();
    }

    /// Draws the current digit once per second and counts down.
    pub fn advance(&mut self, now: I, frame: &mut Frame) {
        if !self.tick.poll(now) {
            return;
        }

        frame.clear();
        let digit = self.progress.remaining;
        if digit >= COUNTDOWN_START {
            draw_ten(frame);
        } else {
            let mut buf = [0u8; 4];
            let glyph = char::from(b'0' + digit).encode_utf8(&mut buf);
            self.text.set_text(glyph);
            for _ in 0..DIGIT_SCROLL_STEPS {
                self.text.update(frame);
            }
        }

        if digit <= COUNTDOWN_END {
            self.progress.animation_done = true;
        } else {
            self.progress.remaining = digit - 1;
        }
    }
}

/// Draws "10" from primitives; two glyphs of the font do not fit eight columns.
fn draw_ten(frame: &mut Frame) {
    let style = PrimitiveStyle::with_stroke(to_rgb888(TEN_COLOR), 1);
    let _ = Line::new(Point::new(1, 0), Point::new(1, 7))
        .into_styled(style)
        .draw(frame);
    let _ = Rectangle::with_corners(Point::new(3, 0), Point::new(6, 7))
        .into_styled(style)
        .draw(frame);
}
