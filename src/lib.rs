#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`WakeupLight`**: The owned context; one call to `tick` is one loop iteration
//! - **`WakeupSequence`**: State machine `Idle -> Sunrise -> Countdown -> Ember`, stoppable at any time
//! - **`SunriseAnimation`**, **`CountdownAnimation`**, **`EmberAnimation`**: Self rate-limiting frame generators
//! - **`AudioSequencer`**: Issues track commands per phase and detects completion from the busy signal
//! - **`ClockSynchronizer`**: Local time of day, periodically replaced by network time
//! - **`ShowTimeSequence`**: Scrolls the current time on demand
//! - **`Interval`**: "Once per N milliseconds" gate against a monotonic clock
//! - **`MatrixDisplay`**, **`AudioPlayer`**, **`WallClockSource`**, **`ButtonInputs`**, **`ControlPort`**:
//!   Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! The library never blocks. Every phase is called once per loop iteration
//! and decides on its own whether it is due.

#[macro_use]
mod fmt;

pub mod app;
pub mod audio;
pub mod clock;
pub mod colors;
pub mod config;
pub mod control;
pub mod countdown;
pub mod ember;
pub mod frame;
pub mod input;
pub mod showtime;
pub mod sunrise;
pub mod text;
pub mod time;
pub mod types;
pub mod wakeup;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub use app::{Peripherals, WakeupLight};
pub use audio::{AudioPlayer, AudioSequencer, AudioStage, BusyEdge, BusyLatch};
pub use clock::{ClockSynchronizer, WallClockSource, WallTime};
pub use config::Config;
pub use control::{ControlPort, ControlRequest, StatusSnapshot, parse_request, render_status_page};
pub use countdown::{CountdownAnimation, CountdownProgress};
pub use ember::EmberAnimation;
pub use frame::{Frame, MATRIX_HEIGHT, MATRIX_WIDTH, MatrixDisplay};
pub use input::{ButtonInputs, ButtonSample};
pub use showtime::ShowTimeSequence;
pub use sunrise::{SunriseAnimation, SunriseProgress};
pub use text::{ScrollStatus, ScrollingText, format_time_text};
pub use time::{Interval, TimeDuration, TimeInstant, TimeSource};
pub use types::{AlarmTime, SetupError, TimeOfDay, WakeupState};
pub use wakeup::{Request, WakeupSequence};
