//! Network control endpoint: request parsing and the status page.
//!
//! Requests are free text (typically the first line of an HTTP request).
//! Recognized tokens are `/ALARM_ON`, `/ALARM_OFF`, `HOUR=` and `MINUTE=`.
//! The hour and minute values are the two characters following their
//! token; anything that does not parse as a number reads as 0.

use crate::types::{AlarmTime, TimeOfDay, WakeupState};
use core::fmt::{self, Write};
use heapless::String;

/// Longest request line kept by a [`ControlPort`].
pub const REQUEST_CAPACITY: usize = 256;

/// Buffer size for the rendered status page.
pub const PAGE_CAPACITY: usize = 2048;

const START_TOKEN: &str = "/ALARM_ON";
const STOP_TOKEN: &str = "/ALARM_OFF";
const HOUR_TOKEN: &str = "HOUR=";
const MINUTE_TOKEN: &str = "MINUTE=";
const FIELD_WIDTH: usize = 2;

/// Trait for abstracting the web server.
pub trait ControlPort {
    /// Returns the request of a connected client, if any.
    fn poll_request(&mut self) -> Option<String<REQUEST_CAPACITY>>;

    /// Sends the response to the client of the last request.
    fn respond(&mut self, response: &str);
}

/// Commands found in one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRequest {
    /// `/ALARM_ON` was requested.
    pub start: bool,
    /// `/ALARM_OFF` was requested.
    pub stop: bool,
    /// Value of the `HOUR=` field, if present.
    pub hour: Option<u8>,
    /// Value of the `MINUTE=` field, if present.
    pub minute: Option<u8>,
}

impl ControlRequest {
    /// Applies the hour and minute fields to `alarm`.
    pub fn apply_to(&self, alarm: &mut AlarmTime) {
        if let Some(hour) = self.hour {
            alarm.hour = hour;
        }
        if let Some(minute) = self.minute {
            alarm.minute = minute;
        }
    }
}

/// Extracts the commands of a request line.
pub fn parse_request(request: &str) -> ControlRequest {
    ControlRequest {
        start: request.contains(START_TOKEN),
        stop: request.contains(STOP_TOKEN),
        hour: field_value(request, HOUR_TOKEN),
        minute: field_value(request, MINUTE_TOKEN),
    }
}

/// Parses the fixed-width field following `token`, if the token is present.
fn field_value(request: &str, token: &str) -> Option<u8> {
    let index = request.find(token)?;
    let bytes = request.as_bytes();
    let begin = (index + token.len()).min(bytes.len());
    let end = (begin + FIELD_WIDTH).min(bytes.len());
    Some(parse_leading_int(&bytes[begin..end]))
}

/// Parses a leading, optionally signed decimal number. Yields 0 when no
/// digits are found; the result is truncated to `u8` without range checks.
fn parse_leading_int(field: &[u8]) -> u8 {
    let mut iter = field.iter().skip_while(|b| b.is_ascii_whitespace()).peekable();

    let negative = match iter.peek() {
        Some(b'-') => {
            iter.next();
            true
        }
        Some(b'+') => {
            iter.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for b in iter.take_while(|b| b.is_ascii_digit()) {
        value = value * 10 + (b - b'0') as i32;
    }

    if negative {
        value = -value;
    }
    value as u8
}

/// Everything the status page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Alarm time prefilled in the form.
    pub alarm: AlarmTime,
    /// Current time of day.
    pub time: TimeOfDay,
    /// Current wakeup phase.
    pub state: WakeupState,
    /// Any track command has been issued.
    pub music_started: bool,
    /// The countdown track has been issued.
    pub countdown_started: bool,
}

/// Writes the HTTP response with the control page.
pub fn render_status_page<W: Write>(out: &mut W, status: &StatusSnapshot) -> fmt::Result {
    out.write_str("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n")?;
    out.write_str("<!DOCTYPE HTML>\n<html>\n<head>\n<title>Wakeup Light</title>\n")?;
    out.write_str("<style>\nbutton {width:150px;height:50px;}\n")?;
    out.write_str(".stop{color: white;background-color:#f44336;}\n")?;
    out.write_str(".start{color: white;background-color:#4caf50;}\n")?;
    out.write_str("</style>\n</head>\n<body>\n<h1>Wakeup Light</h1>\n")?;
    out.write_str("<p><a href=\"/ALARM_OFF\"><button class=\"stop\">Stop alarm</button></a>\n")?;
    out.write_str("<a href=\"/ALARM_ON\"><button class=\"start\">Start alarm</button></a></p>\n")?;
    out.write_str("<br/>\n<form method=GET>\n<h2>Set wake up time:</h2>\n")?;
    write!(
        out,
        "hour: <input type=\"text\" name=\"HOUR\" maxlength=\"2\" size=\"2\" value=\"{}\">\n",
        status.alarm.hour
    )?;
    write!(
        out,
        "minute: <input type=\"text\" name=\"MINUTE\" maxlength=\"2\" size=\"2\" value=\"{}\">\n",
        status.alarm.minute
    )?;
    out.write_str("<input type=\"submit\" value=\"set\">\n</form>\n<br/><br/>\n")?;
    write!(
        out,
        "The current time is: {:02}:{:02}:{:02}{}\n",
        status.time.hour,
        status.time.minute,
        status.time.second,
        if status.time.is_authoritative {
            ""
        } else {
            " (local)"
        }
    )?;
    write!(out, "<br/><br/>\nstate: {}<br/>\n", status.state.as_str())?;
    write!(out, "musicStarted: {}<br/>\n", status.music_started as u8)?;
    write!(out, "countdownStarted: {}\n", status.countdown_started as u8)?;
    out.write_str("</body>\n</html>\n")
}
