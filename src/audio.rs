//! Audio sequencing for the wakeup phases.
//!
//! The MP3 module only tells us whether it is busy. Right after a command
//! the signal still reads "not busy", which looks exactly like a finished
//! track, so completion is tracked with a [`BusyLatch`]: a command counts as
//! started once the busy signal rises, and as finished on the falling edge
//! after that.

use crate::time::{Interval, TimeDuration, TimeInstant};

/// Track played during the sunrise.
pub const SUNRISE_TRACK: u16 = 1;

/// Track played during the countdown.
pub const COUNTDOWN_TRACK: u16 = 2;

/// Time the module gets to go busy after a "next" before it is re-issued.
pub const NEXT_RETRY_MS: u64 = 1000;

/// Trait for abstracting the MP3 playback module.
///
/// Playback commands cannot fail; implementations handle transport errors
/// internally. Any short settle delay the module needs after a command
/// belongs in the implementation.
pub trait AudioPlayer {
    /// Error reported when the module does not come up.
    type Error: core::fmt::Debug;

    /// Brings the module up and sets the volume (0-30).
    fn init(&mut self, volume: u8) -> Result<(), Self::Error>;

    /// Starts the track with the given 1-based index.
    fn play(&mut self, track: u16);

    /// Stops playback.
    fn stop(&mut self);

    /// Skips to the next track on the medium.
    fn next(&mut self);

    /// Returns true while a track is playing.
    fn is_busy(&mut self) -> bool;
}

/// Change of the busy signal between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusyEdge {
    /// Was idle, now busy.
    Rising,
    /// Was busy, now idle.
    Falling,
    /// Busy on both samples.
    High,
    /// Idle on both samples.
    Low,
}

impl BusyEdge {
    /// Returns true if the latest sample was busy.
    pub fn is_busy(&self) -> bool {
        matches!(self, BusyEdge::Rising | BusyEdge::High)
    }
}

/// Edge detector over the busy signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyLatch {
    previous: bool,
}

impl BusyLatch {
    /// Creates a latch that assumes the module was idle.
    pub const fn new() -> Self {
        Self { previous: false }
    }

    /// Compares `busy` with the previous sample and stores it.
    pub fn sample(&mut self, busy: bool) -> BusyEdge {
        let edge = match (self.previous, busy) {
            (false, true) => BusyEdge::Rising,
            (true, false) => BusyEdge::Falling,
            (true, true) => BusyEdge::High,
            (false, false) => BusyEdge::Low,
        };
        self.previous = busy;
        edge
    }

    /// Forgets the previous sample.
    pub fn reset(&mut self) {
        self.previous = false;
    }
}

/// Logical audio stage of the wakeup sequence.
///
/// `confirmed` records that the module has gone busy since the command of
/// that stage was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioStage {
    /// Nothing issued yet.
    #[default]
    Idle,
    /// Sunrise track issued.
    PlayingFirst { confirmed: bool },
    /// Sunrise track finished.
    FirstDone,
    /// Countdown track issued.
    PlayingCountdown { confirmed: bool },
    /// Countdown track finished.
    CountdownDone,
    /// Jukebox mode: a "next" command was issued.
    Advancing { confirmed: bool },
}

/// Issues the audio commands of each phase and reports completion.
pub struct AudioSequencer<I: TimeInstant> {
    stage: AudioStage,
    latch: BusyLatch,
    song_counter: u8,
    next_retry: Interval<I>,
}

impl<I: TimeInstant> AudioSequencer<I> {
    /// Creates a sequencer with nothing issued yet.
    pub fn new() -> Self {
        Self {
            stage: AudioStage::Idle,
            latch: BusyLatch::new(),
            song_counter: 0,
            next_retry: Interval::new(I::Duration::from_millis(NEXT_RETRY_MS)),
        }
    }

    /// Returns the current audio stage.
    pub fn stage(&self) -> AudioStage {
        self.stage
    }

    /// Returns true once any command of the sequence has been issued.
    pub fn started(&self) -> bool {
        self.stage != AudioStage::Idle
    }

    /// Returns true once the sunrise track has finished.
    pub fn first_done(&self) -> bool {
        !matches!(
            self.stage,
            AudioStage::Idle | AudioStage::PlayingFirst { .. }
        )
    }

    /// Returns true once the countdown track has been issued.
    pub fn countdown_started(&self) -> bool {
        matches!(
            self.stage,
            AudioStage::PlayingCountdown { .. }
                | AudioStage::CountdownDone
                | AudioStage::Advancing { .. }
        )
    }

    /// Returns true once the countdown track has finished.
    pub fn countdown_done(&self) -> bool {
        matches!(
            self.stage,
            AudioStage::CountdownDone | AudioStage::Advancing { .. }
        )
    }

    /// Count of playback commands issued since the first song, for diagnostics.
    ///
    /// Reset to 0 when the first song is issued and incremented by every
    /// later play or next command, retries included.
    pub fn song_counter(&self) -> u8 {
        self.song_counter
    }

    /// Sunrise phase: starts the first track once and detects its end.
    pub fn play_first_song<A: AudioPlayer>(&mut self, audio: &mut A) {
        let edge = self.latch.sample(audio.is_busy());

        match self.stage {
            AudioStage::Idle if !edge.is_busy() => {
                self.song_counter = 0;
                info!("playing first song [{}]", self.song_counter);
                audio.play(SUNRISE_TRACK);
                self.stage = AudioStage::PlayingFirst { confirmed: false };
            }
            AudioStage::PlayingFirst { confirmed } => {
                if let Some(confirmed) = track_progress(confirmed, edge) {
                    self.stage = AudioStage::PlayingFirst { confirmed };
                } else {
                    debug!("first song finished");
                    self.stage = AudioStage::FirstDone;
                }
            }
            _ => {}
        }
    }

    /// Countdown phase: starts the countdown track once and detects its end.
    pub fn play_countdown<A: AudioPlayer>(&mut self, audio: &mut A) {
        let edge = self.latch.sample(audio.is_busy());

        match self.stage {
            AudioStage::FirstDone if !edge.is_busy() => {
                self.song_counter = self.song_counter.wrapping_add(1);
                info!("playing countdown [{}]", self.song_counter);
                audio.play(COUNTDOWN_TRACK);
                self.stage = AudioStage::PlayingCountdown { confirmed: false };
            }
            AudioStage::PlayingCountdown { confirmed } => {
                if let Some(confirmed) = track_progress(confirmed, edge) {
                    self.stage = AudioStage::PlayingCountdown { confirmed };
                } else {
                    debug!("countdown track finished");
                    self.stage = AudioStage::CountdownDone;
                }
            }
            _ => {}
        }
    }

    /// Ember phase: skips to the next track every time one finishes.
    ///
    /// There is no last track; the module is asked for the next one until
    /// the sequence is stopped. A "next" that has not made the module busy
    /// within [`NEXT_RETRY_MS`] is issued again.
    pub fn play_next_when_finished<A: AudioPlayer>(&mut self, now: I, audio: &mut A) {
        let edge = self.latch.sample(audio.is_busy());

        let advance = match self.stage {
            AudioStage::CountdownDone => !edge.is_busy(),
            AudioStage::Advancing { confirmed } => match track_progress(confirmed, edge) {
                None => true,
                Some(false) if self.next_retry.poll(now) => {
                    warn!("next song did not start, retrying");
                    true
                }
                Some(confirmed) => {
                    self.stage = AudioStage::Advancing { confirmed };
                    false
                }
            },
            _ => false,
        };

        if advance {
            self.song_counter = self.song_counter.wrapping_add(1);
            info!("playing next song [{}]", self.song_counter);
            audio.next();
            self.next_retry.restart(now);
            self.stage = AudioStage::Advancing { confirmed: false };
        }
    }

    /// Stops playback if anything was issued and returns to `Idle`.
    pub fn stop<A: AudioPlayer>(&mut self, audio: &mut A) {
        if self.started() {
            info!("stopping music");
            audio.stop();
        }
        self.stage = AudioStage::Idle;
        self.latch.reset();
        self.next_retry.reset();
    }
}

impl<I: TimeInstant> Default for AudioSequencer<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the updated `confirmed` flag, or `None` once the track finished.
fn track_progress(confirmed: bool, edge: BusyEdge) -> Option<bool> {
    match edge {
        BusyEdge::Rising | BusyEdge::High => Some(true),
        BusyEdge::Falling if confirmed => None,
        BusyEdge::Falling | BusyEdge::Low => Some(confirmed),
    }
}
