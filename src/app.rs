//! The alarm clock as one owned context running a cooperative loop.
//!
//! Each [`WakeupLight::tick`] performs, in fixed order: input sampling,
//! clock update, web request service, wakeup sequence, show-time sequence,
//! alarm check and frame present. It returns the delay the caller waits
//! before the next iteration.

use crate::audio::AudioPlayer;
use crate::clock::{ClockSynchronizer, WallClockSource};
use crate::config::Config;
use crate::control::{ControlPort, PAGE_CAPACITY, StatusSnapshot, parse_request, render_status_page};
use crate::frame::{Frame, MatrixDisplay};
use crate::input::ButtonInputs;
use crate::showtime::ShowTimeSequence;
use crate::time::{Interval, TimeDuration, TimeInstant, TimeSource};
use crate::types::{AlarmTime, SetupError, TimeOfDay, WakeupState};
use crate::wakeup::WakeupSequence;
use heapless::String;

const STATUS_DUMP_PERIOD_MS: u64 = 1000;

/// The hardware collaborators of the clock.
pub struct Peripherals<D, A, W, B, C> {
    /// LED matrix.
    pub display: D,
    /// MP3 module.
    pub audio: A,
    /// Network time source.
    pub wall_clock: W,
    /// Front buttons.
    pub buttons: B,
    /// Web control server.
    pub control: C,
}

/// Owns all state of the alarm clock.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Monotonic time source
/// * `D`, `A`, `W`, `B`, `C` - Display, audio, wall clock, buttons and control port
pub struct WakeupLight<'t, I, T, D, A, W, B, C>
where
    I: TimeInstant,
    T: TimeSource<I>,
{
    config: Config<I::Duration>,
    time_source: &'t T,
    peripherals: Peripherals<D, A, W, B, C>,
    clock: ClockSynchronizer<I>,
    alarm: AlarmTime,
    wakeup: WakeupSequence<I>,
    show_time: ShowTimeSequence,
    frame: Frame,
    status_dump: Interval<I>,
}

impl<'t, I, T, D, A, W, B, C> WakeupLight<'t, I, T, D, A, W, B, C>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: MatrixDisplay,
    A: AudioPlayer,
    W: WallClockSource,
    B: ButtonInputs,
    C: ControlPort,
{
    /// Brings the system up.
    ///
    /// Fails if the audio module does not answer; without audio the wakeup
    /// sequence cannot run, so the firmware is expected to halt on error.
    pub fn setup(
        config: Config<I::Duration>,
        mut peripherals: Peripherals<D, A, W, B, C>,
        time_source: &'t T,
    ) -> Result<Self, SetupError<A::Error>> {
        info!("initializing audio module");
        if let Err(err) = peripherals.audio.init(config.volume) {
            error!("unable to communicate with audio module");
            return Err(SetupError::AudioInit(err));
        }

        let frame = Frame::new();
        frame.flush(&mut peripherals.display, config.brightness);

        let now = time_source.now();
        let mut clock = ClockSynchronizer::new(now, config.resync_interval);
        clock.sync_now(&mut peripherals.wall_clock);

        info!("finished initializing");

        Ok(Self {
            alarm: config.alarm,
            wakeup: WakeupSequence::new(&config),
            show_time: ShowTimeSequence::new(config.text_color),
            status_dump: Interval::starting_at(
                I::Duration::from_millis(STATUS_DUMP_PERIOD_MS),
                now,
            ),
            config,
            time_source,
            peripherals,
            clock,
            frame,
        })
    }

    /// Runs one loop iteration and returns the frame delay.
    pub fn tick(&mut self) -> I::Duration {
        let now = self.time_source.now();

        self.read_inputs();
        self.clock.tick(now, &mut self.peripherals.wall_clock);
        self.service_control();
        self.wakeup
            .advance(now, &mut self.frame, &mut self.peripherals.audio);
        self.show_time.advance(&self.clock.time(), &mut self.frame);
        self.wakeup.check_alarm(self.clock.time(), self.alarm);
        self.frame
            .flush(&mut self.peripherals.display, self.config.brightness);

        if self.status_dump.poll(now) {
            self.dump_status();
        }

        self.config.frame_period
    }

    fn read_inputs(&mut self) {
        let buttons = self.peripherals.buttons.read();
        if buttons.start {
            self.wakeup.request_start();
        }
        if buttons.stop {
            self.wakeup.request_stop();
        }
        if buttons.show_time {
            self.show_time.request();
        }
    }

    fn service_control(&mut self) {
        let Some(request) = self.peripherals.control.poll_request() else {
            return;
        };
        info!("request: {}", request.as_str());

        let command = parse_request(&request);
        if command.start {
            self.wakeup.request_start();
        }
        if command.stop {
            self.wakeup.request_stop();
        }
        if command.hour.is_some() || command.minute.is_some() {
            command.apply_to(&mut self.alarm);
            info!("new alarm time {}:{}", self.alarm.hour, self.alarm.minute);
        }

        let mut page: String<PAGE_CAPACITY> = String::new();
        if render_status_page(&mut page, &self.status()).is_err() {
            warn!("status page truncated");
        }
        self.peripherals.control.respond(&page);
    }

    fn dump_status(&self) {
        let sunrise = self.wakeup.sunrise_progress();
        let countdown = self.wakeup.countdown_progress();
        debug!(
            "state={} sun={} heat={} top={} first_done={} remaining={} countdown_done={}",
            self.wakeup.state().as_str(),
            sunrise.vertical_position,
            sunrise.heat_index,
            sunrise.reached_top,
            self.wakeup.audio().first_done(),
            countdown.remaining,
            self.wakeup.audio().countdown_done()
        );
    }

    /// Snapshot of what the control page shows.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            alarm: self.alarm,
            time: self.clock.time(),
            state: self.wakeup.state(),
            music_started: self.wakeup.audio().started(),
            countdown_started: self.wakeup.audio().countdown_started(),
        }
    }

    /// Returns the current wakeup phase.
    pub fn state(&self) -> WakeupState {
        self.wakeup.state()
    }

    /// Returns the current time of day.
    pub fn time(&self) -> TimeOfDay {
        self.clock.time()
    }

    /// Returns the configured alarm time.
    pub fn alarm(&self) -> AlarmTime {
        self.alarm
    }

    /// Replaces the alarm time, as the control page does.
    pub fn set_alarm(&mut self, alarm: AlarmTime) {
        self.alarm = alarm;
    }

    /// Returns the wakeup state machine.
    pub fn wakeup(&self) -> &WakeupSequence<I> {
        &self.wakeup
    }

    /// Returns the show-time mode.
    pub fn show_time(&self) -> &ShowTimeSequence {
        &self.show_time
    }

    /// Returns the frame presented by the last tick.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns the configuration the clock was set up with.
    pub fn config(&self) -> &Config<I::Duration> {
        &self.config
    }

    /// Returns the hardware collaborators.
    pub fn peripherals(&self) -> &Peripherals<D, A, W, B, C> {
        &self.peripherals
    }

    /// Returns the hardware collaborators mutably.
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, A, W, B, C> {
        &mut self.peripherals
    }
}
