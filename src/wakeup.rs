//! The wakeup sequence state machine.
//!
//! Composes the three animations, the audio sequencer, the alarm trigger
//! and manual start/stop requests into phase transitions:
//!
//! ```text
//! Idle -> Sunrise -> Countdown -> Ember
//!   ^                                |
//!   +---------- Stopped <------------+  (stop, from any state)
//! ```
//!
//! A phase only advances once both its animation and its audio track have
//! finished; whichever finishes first holds its terminal frame or silence
//! until the other catches up.

use crate::audio::{AudioPlayer, AudioSequencer, AudioStage};
use crate::config::Config;
use crate::countdown::{CountdownAnimation, CountdownProgress};
use crate::ember::EmberAnimation;
use crate::frame::Frame;
use crate::sunrise::{SunriseAnimation, SunriseProgress};
use crate::time::TimeInstant;
use crate::types::{AlarmTime, TimeOfDay, WakeupState};

/// A manual request waiting to be honored on the next advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    Start,
    Stop,
}

/// Owns the wakeup state and every piece of phase progress.
pub struct WakeupSequence<I: TimeInstant> {
    state: WakeupState,
    sunrise: SunriseAnimation<I>,
    countdown: CountdownAnimation<I>,
    ember: EmberAnimation,
    audio: AudioSequencer<I>,
    pending: Option<Request>,
    alarm_latched: bool,
}

impl<I: TimeInstant> WakeupSequence<I> {
    /// Creates an idle sequence using the ember and text settings of `config`.
    pub fn new(config: &Config<I::Duration>) -> Self {
        Self {
            state: WakeupState::Idle,
            sunrise: SunriseAnimation::new(),
            countdown: CountdownAnimation::new(config.text_color),
            ember: EmberAnimation::new(config.seed, config.max_cooldown),
            audio: AudioSequencer::new(),
            pending: None,
            alarm_latched: false,
        }
    }

    /// Returns the current phase.
    pub fn state(&self) -> WakeupState {
        self.state
    }

    /// Returns true while Sunrise, Countdown or Ember is active.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Returns the sun position and glow.
    pub fn sunrise_progress(&self) -> SunriseProgress {
        self.sunrise.progress()
    }

    /// Returns the countdown digit and completion flag.
    pub fn countdown_progress(&self) -> CountdownProgress {
        self.countdown.progress()
    }

    /// Returns the stage of the audio sequencer.
    pub fn audio_stage(&self) -> AudioStage {
        self.audio.stage()
    }

    /// Returns the audio sequencer for completion flags and diagnostics.
    pub fn audio(&self) -> &AudioSequencer<I> {
        &self.audio
    }

    /// Returns the request the next advance will honor, if any.
    pub fn pending_request(&self) -> Option<Request> {
        self.pending
    }

    /// Asks for the sequence to start. Ignored while running; a stop
    /// requested in the same iteration takes precedence.
    pub fn request_start(&mut self) {
        if self.pending != Some(Request::Stop) {
            self.pending = Some(Request::Start);
        }
    }

    /// Asks for the sequence to stop from whatever state it is in.
    pub fn request_stop(&mut self) {
        self.pending = Some(Request::Stop);
    }

    /// Raises a start request when the time reaches the alarm.
    ///
    /// Never fires while a sequence is running. Once it has raised a request
    /// the trigger stays latched until the time no longer matches, so a stop
    /// during the alarm minute is not undone on the next iteration. A match
    /// seen only while running does not latch: stopping that sequence within
    /// the alarm minute lets the alarm start a fresh one.
    pub fn check_alarm(&mut self, time: TimeOfDay, alarm: AlarmTime) {
        if !time.matches(alarm) {
            self.alarm_latched = false;
            return;
        }

        if self.alarm_latched || self.state.is_running() {
            return;
        }
        self.alarm_latched = true;

        info!("!! alarm started at {}:{} !!", alarm.hour, alarm.minute);
        self.request_start();
    }

    /// Runs one step of the sequence. Call once per loop iteration.
    pub fn advance<A: AudioPlayer>(&mut self, now: I, frame: &mut Frame, audio: &mut A) {
        match self.pending.take() {
            Some(Request::Stop) => {
                self.stop(frame, audio);
                return;
            }
            Some(Request::Start) if !self.state.is_running() => self.begin(),
            _ => {}
        }

        match self.state {
            WakeupState::Idle => {}
            WakeupState::Stopped => self.transition(WakeupState::Idle),
            WakeupState::Sunrise => {
                self.audio.play_first_song(audio);
                self.sunrise.advance(now, frame);
                if self.sunrise.reached_top() && self.audio.first_done() {
                    self.transition(WakeupState::Countdown);
                }
            }
            WakeupState::Countdown => {
                self.countdown.advance(now, frame);
                self.audio.play_countdown(audio);
                if self.countdown.animation_done() && self.audio.countdown_done() {
                    self.transition(WakeupState::Ember);
                }
            }
            WakeupState::Ember => {
                self.ember.advance(frame);
                self.audio.play_next_when_finished(now, audio);
            }
        }
    }

    fn begin(&mut self) {
        self.sunrise.reset();
        self.countdown.reset();
        self.audio = AudioSequencer::new();
        self.transition(WakeupState::Sunrise);
    }

    fn stop<A: AudioPlayer>(&mut self, frame: &mut Frame, audio: &mut A) {
        self.audio.stop(audio);
        self.sunrise.reset();
        self.countdown.reset();
        frame.clear();
        self.transition(WakeupState::Stopped);
        info!("alarm stopped");
    }

    fn transition(&mut self, next: WakeupState) {
        if self.state != next {
            info!("wakeup {} -> {}", self.state.as_str(), next.as_str());
        }
        self.state = next;
    }
}
