//! Text rendering: the clock string and a right-to-left scroller.

use crate::frame::{Frame, MATRIX_WIDTH, to_rgb888};
use crate::types::TimeOfDay;
use core::fmt::Write;
use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use palette::Srgb;

/// Longest text the scroller holds.
pub const MAX_TEXT_LEN: usize = 16;

/// Width of one glyph of the scroller font, in columns.
pub const GLYPH_WIDTH: i32 = 5;

/// Formats the time as zero-padded `HH:MM:SS`.
pub fn format_time_text(time: &TimeOfDay) -> String<8> {
    let mut text = String::new();
    // Eight characters always fit for values below 100.
    let _ = write!(
        text,
        "{:02}:{:02}:{:02}",
        time.hour % 100,
        time.minute % 100,
        time.second % 100
    );
    text
}

/// Outcome of one scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollStatus {
    /// The text is still (partly) visible.
    Scrolling,

    /// The text has completely left the display.
    Done,
}

/// A short text that enters at the right edge and moves one column left per update.
#[derive(Debug, Clone)]
pub struct ScrollingText {
    text: String<MAX_TEXT_LEN>,
    cursor: i32,
    color: Srgb<u8>,
}

impl ScrollingText {
    /// Creates an empty scroller drawing in `color`.
    pub fn new(color: Srgb<u8>) -> Self {
        Self {
            text: String::new(),
            cursor: MATRIX_WIDTH as i32,
            color,
        }
    }

    /// Replaces the text and rewinds the cursor to the right edge.
    ///
    /// Characters beyond [`MAX_TEXT_LEN`] are dropped.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.rewind();
    }

    /// Moves the cursor back to the right edge.
    pub fn rewind(&mut self) {
        self.cursor = MATRIX_WIDTH as i32;
    }

    /// Returns the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Column where the first glyph will be drawn by the next update.
    pub fn cursor(&self) -> i32 {
        self.cursor
    }

    /// Width of the whole text in columns.
    pub fn width(&self) -> i32 {
        self.text.chars().count() as i32 * GLYPH_WIDTH
    }

    /// Clears the frame, draws the text at the cursor and moves it one column left.
    pub fn update(&mut self, frame: &mut Frame) -> ScrollStatus {
        frame.clear();

        let style = MonoTextStyle::new(&FONT_5X8, to_rgb888(self.color));
        let _ = Text::with_baseline(
            &self.text,
            Point::new(self.cursor, 0),
            style,
            Baseline::Top,
        )
        .draw(frame);

        self.cursor -= 1;
        if self.cursor <= -self.width() {
            ScrollStatus::Done
        } else {
            ScrollStatus::Scrolling
        }
    }
}
