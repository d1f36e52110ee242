//! On-demand display of the current time.
//!
//! Independent of the wakeup sequence. A button press assembles the time
//! text once; the text then scrolls one column per loop iteration until it
//! has left the display, after which the mode goes dormant again.

use crate::frame::Frame;
use crate::text::{ScrollStatus, ScrollingText, format_time_text};
use crate::types::TimeOfDay;
use palette::Srgb;

/// Scrolls the current time once per request.
pub struct ShowTimeSequence {
    active: bool,
    text_assembled: bool,
    text: ScrollingText,
}

impl ShowTimeSequence {
    /// Creates a dormant show-time mode drawing in `color`.
    pub fn new(color: Srgb<u8>) -> Self {
        Self {
            active: false,
            text_assembled: false,
            text: ScrollingText::new(color),
        }
    }

    /// Starts a pass. A request during a running pass has no effect.
    pub fn request(&mut self) {
        self.active = true;
    }

    /// Returns true while a pass is scrolling.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The text of the current pass, empty before the first press.
    pub fn text(&self) -> &str {
        self.text.text()
    }

    /// Column the next scroll step draws at.
    pub fn scroll_cursor(&self) -> i32 {
        self.text.cursor()
    }

    /// Draws one scroll step over whatever the frame holds.
    pub fn advance(&mut self, time: &TimeOfDay, frame: &mut Frame) {
        if !self.active {
            return;
        }

        if !self.text_assembled {
            self.text.set_text(&format_time_text(time));
            self.text_assembled = true;
        }

        if self.text.update(frame) == ScrollStatus::Done {
            self.active = false;
            self.text_assembled = false;
        }
    }
}
