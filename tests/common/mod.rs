//! Shared test infrastructure for wakeup-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use heapless::{String, Vec};
use wakeup_light::control::{PAGE_CAPACITY, REQUEST_CAPACITY};
use wakeup_light::{
    AudioPlayer, ButtonInputs, ButtonSample, ControlPort, MATRIX_HEIGHT, MATRIX_WIDTH,
    MatrixDisplay, Srgb, TimeDuration, TimeInstant, TimeSource, WallClockSource, WallTime,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TestInstant(self.0 + duration.0))
    }

    fn checked_sub(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_sub(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that keeps the last presented image
pub struct MockDisplay {
    staged: [[Srgb<u8>; MATRIX_WIDTH]; MATRIX_HEIGHT],
    presented: [[Srgb<u8>; MATRIX_WIDTH]; MATRIX_HEIGHT],
    pub present_count: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            staged: [[Srgb::new(0, 0, 0); MATRIX_WIDTH]; MATRIX_HEIGHT],
            presented: [[Srgb::new(0, 0, 0); MATRIX_WIDTH]; MATRIX_HEIGHT],
            present_count: 0,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Srgb<u8> {
        self.presented[y][x]
    }

    pub fn lit_count(&self) -> usize {
        self.presented
            .iter()
            .flatten()
            .filter(|p| **p != Srgb::new(0, 0, 0))
            .count()
    }
}

impl MatrixDisplay for MockDisplay {
    fn set_pixel(&mut self, x: u8, y: u8, color: Srgb<u8>) {
        self.staged[y as usize][x as usize] = color;
    }

    fn present(&mut self) {
        self.presented = self.staged;
        self.present_count += 1;
    }
}

// ============================================================================
// Mock Audio
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play(u16),
    Stop,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAudioError;

/// Mock MP3 module with a manually driven busy signal
pub struct MockAudio {
    pub busy: bool,
    pub fail_init: bool,
    pub volume: Option<u8>,
    commands: Vec<AudioCommand, 64>,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            busy: false,
            fail_init: false,
            volume: None,
            commands: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    pub fn commands(&self) -> &[AudioCommand] {
        &self.commands
    }

    pub fn last_command(&self) -> Option<AudioCommand> {
        self.commands.last().copied()
    }

    pub fn count(&self, command: AudioCommand) -> usize {
        self.commands.iter().filter(|c| **c == command).count()
    }
}

impl AudioPlayer for MockAudio {
    type Error = MockAudioError;

    fn init(&mut self, volume: u8) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err(MockAudioError);
        }
        self.volume = Some(volume);
        Ok(())
    }

    fn play(&mut self, track: u16) {
        let _ = self.commands.push(AudioCommand::Play(track));
    }

    fn stop(&mut self) {
        self.busy = false;
        let _ = self.commands.push(AudioCommand::Stop);
    }

    fn next(&mut self) {
        let _ = self.commands.push(AudioCommand::Next);
    }

    fn is_busy(&mut self) -> bool {
        self.busy
    }
}

// ============================================================================
// Mock Wall Clock
// ============================================================================

/// Mock network time source returning a settable reading
pub struct MockWallClock {
    pub reading: Option<WallTime>,
    pub fetch_count: u32,
}

impl MockWallClock {
    pub fn new(reading: Option<WallTime>) -> Self {
        Self {
            reading,
            fetch_count: 0,
        }
    }

    pub fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self::new(Some(WallTime {
            hour,
            minute,
            second,
        }))
    }
}

impl WallClockSource for MockWallClock {
    fn fetch(&mut self) -> Option<WallTime> {
        self.fetch_count += 1;
        self.reading
    }
}

// ============================================================================
// Mock Buttons
// ============================================================================

/// Mock buttons whose levels persist until changed
pub struct MockButtons {
    pub sample: ButtonSample,
}

impl MockButtons {
    pub fn new() -> Self {
        Self {
            sample: ButtonSample::default(),
        }
    }
}

impl ButtonInputs for MockButtons {
    fn read(&mut self) -> ButtonSample {
        self.sample
    }
}

// ============================================================================
// Mock Control Port
// ============================================================================

/// Mock web server delivering one queued request at a time
pub struct MockControl {
    pending: Option<String<REQUEST_CAPACITY>>,
    pub last_response: Option<String<PAGE_CAPACITY>>,
}

impl MockControl {
    pub fn new() -> Self {
        Self {
            pending: None,
            last_response: None,
        }
    }

    pub fn send(&mut self, request: &str) {
        let mut line = String::new();
        let _ = line.push_str(request);
        self.pending = Some(line);
    }
}

impl ControlPort for MockControl {
    fn poll_request(&mut self) -> Option<String<REQUEST_CAPACITY>> {
        self.pending.take()
    }

    fn respond(&mut self, response: &str) {
        let mut page = String::new();
        let _ = page.push_str(response);
        self.last_response = Some(page);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);

/// Sum of the channels, as a rough brightness measure
pub fn brightness(color: Srgb<u8>) -> u32 {
    color.red as u32 + color.green as u32 + color.blue as u32
}
