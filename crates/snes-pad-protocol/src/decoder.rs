//! Latch/clock/data polling loop.

use crate::config::ProtocolConfig;
use crate::input::{DecodeOptions, LogicalInput, MouseAccumulator, MouseMotion, decode};
use crate::mode::{DeviceMode, has_mouse_signature};
use crate::report::RawReport;
use crate::{MOUSE_REPORT_BITS, ProtocolResult, SNES_REPORT_BITS};
use joybridge_hal::{Clock, DigitalIo, Direction, Level};
use tracing::{debug, trace};

/// Snapshot produced by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollResult {
    pub raw: RawReport,
    pub mode: DeviceMode,
    pub input: LogicalInput,
}

/// Drives the controller port and turns its bitstream into a
/// [`PollResult`].
///
/// There is no error path: a missing or non-conforming controller reads as
/// a released pattern and decodes to idle input.
#[derive(Debug, Clone)]
pub struct ControllerDecoder {
    config: ProtocolConfig,
    last_mode: Option<DeviceMode>,
    mouse: MouseAccumulator,
}

impl ControllerDecoder {
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ProtocolConfig) -> ProtocolResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_mode: None,
            mouse: MouseAccumulator::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Mode seen on the most recent poll, if any.
    #[must_use]
    pub fn last_mode(&self) -> Option<DeviceMode> {
        self.last_mode
    }

    /// Mouse motion carried over from earlier polls.
    #[must_use]
    pub fn pending_motion(&self) -> (i16, i16) {
        self.mouse.pending()
    }

    /// Put the serial lines in their idle state: latch low, clock high,
    /// data pulled up.
    pub fn init<I: DigitalIo + ?Sized>(&self, io: &mut I) {
        let pins = self.config.pins;
        io.write_level(pins.latch, Level::Low);
        io.set_direction(pins.latch, Direction::Output);
        io.write_level(pins.clock, Level::High);
        io.set_direction(pins.clock, Direction::Output);
        io.set_direction(pins.data, Direction::InputPullUp);
    }

    /// Read and decode one report.
    pub fn poll<I, C>(&mut self, io: &mut I, clock: &mut C, fire_reversed: bool) -> PollResult
    where
        I: DigitalIo + ?Sized,
        C: Clock + ?Sized,
    {
        let raw = self.read_report(io, clock);
        let options = DecodeOptions {
            fire_reversed,
            shoulder_policy: self.config.shoulder_policy,
            mouse_threshold: self.config.mouse_threshold,
        };
        let (mode, mut input) = decode(&raw, &options);
        if mode == DeviceMode::SnesMouse {
            let motion = MouseMotion::from_report(&raw);
            self.mouse.apply(&motion, options.mouse_threshold, &mut input);
        } else {
            self.mouse.reset();
        }

        if self.last_mode != Some(mode) {
            debug!(
                previous = ?self.last_mode,
                current = %mode,
                "Controller mode changed"
            );
            self.last_mode = Some(mode);
        }
        trace!(bits = raw.bits(), len = raw.len(), ?input, "Polled controller");

        PollResult { raw, mode, input }
    }

    /// Latch, then clock out 16 bits, or 32 when the mouse signature shows
    /// up in the first 16.
    pub fn read_report<I, C>(&self, io: &mut I, clock: &mut C) -> RawReport
    where
        I: DigitalIo + ?Sized,
        C: Clock + ?Sized,
    {
        let pins = self.config.pins;
        let timing = self.config.timing;

        io.write_level(pins.latch, Level::High);
        clock.delay_micros(timing.latch_pulse_us);
        io.write_level(pins.latch, Level::Low);
        clock.delay_micros(timing.latch_setup_us);

        let mut raw = RawReport::new();
        self.shift_in(io, clock, &mut raw, SNES_REPORT_BITS);
        if has_mouse_signature(&raw) {
            self.shift_in(io, clock, &mut raw, MOUSE_REPORT_BITS - SNES_REPORT_BITS);
        }

        clock.delay_micros(timing.settle_us);
        raw
    }

    fn shift_in<I, C>(&self, io: &mut I, clock: &mut C, raw: &mut RawReport, count: usize)
    where
        I: DigitalIo + ?Sized,
        C: Clock + ?Sized,
    {
        let pins = self.config.pins;
        let half_period = self.config.timing.clock_half_period_us;
        for _ in 0..count {
            let pressed = io.read_level(pins.data).is_low();
            raw.push(pressed);
            io.write_level(pins.clock, Level::Low);
            clock.delay_micros(half_period);
            io.write_level(pins.clock, Level::High);
            clock.delay_micros(half_period);
        }
    }
}
