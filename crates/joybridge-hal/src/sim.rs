//! Software implementation of [`DigitalIo`] for tests and host runs.
//!
//! `SimulatedIo` keeps per-line bookkeeping and can carry a model of the
//! controller's parallel-in/serial-out shift register, so the protocol
//! decoder can be exercised against the real latch/clock/data handshake.

use crate::io::{DigitalIo, Direction, Level, PinId};
use std::collections::BTreeMap;

/// Observable state of one simulated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    pub direction: Direction,
    /// Last level written through [`DigitalIo::write_level`].
    pub output: Level,
    /// Level imposed from outside the board, if any.
    pub external: Option<Level>,
}

impl LineState {
    #[must_use]
    pub fn sensed_level(&self) -> Level {
        match self.direction {
            Direction::Output => self.output,
            Direction::InputPullUp => self.external.unwrap_or(Level::High),
            Direction::Input => self.external.unwrap_or(Level::Low),
        }
    }
}

/// Shift-register model of an NES/SNES controller or SNES mouse.
///
/// A latch rising edge reloads the register; while the latch is high the
/// first bit stays presented. Each clock rising edge with the latch low
/// shifts one bit out. A pressed bit reads as `Low` on the data line and
/// reads past the end of the sequence return `High`, like a released button.
#[derive(Debug, Clone)]
pub struct SimulatedController {
    latch: PinId,
    clock: PinId,
    data: PinId,
    pressed: Vec<bool>,
    cursor: usize,
    latched: bool,
    latch_pulses: u64,
    clock_pulses: u64,
}

impl SimulatedController {
    #[must_use]
    pub fn new(latch: PinId, clock: PinId, data: PinId) -> Self {
        Self {
            latch,
            clock,
            data,
            pressed: Vec::new(),
            cursor: 0,
            latched: false,
            latch_pulses: 0,
            clock_pulses: 0,
        }
    }

    /// Replace the bit sequence shifted out after the next latch.
    pub fn set_bits(&mut self, pressed: impl IntoIterator<Item = bool>) {
        self.pressed = pressed.into_iter().collect();
    }

    #[must_use]
    pub fn latch_pulses(&self) -> u64 {
        self.latch_pulses
    }

    #[must_use]
    pub fn clock_pulses(&self) -> u64 {
        self.clock_pulses
    }

    fn on_latch(&mut self, previous: Level, level: Level) {
        if previous.is_low() && level.is_high() {
            self.latch_pulses = self.latch_pulses.saturating_add(1);
        }
        self.latched = level.is_high();
        if self.latched {
            self.cursor = 0;
        }
    }

    fn on_clock(&mut self, previous: Level, level: Level) {
        if previous.is_low() && level.is_high() && !self.latched {
            self.cursor = self.cursor.saturating_add(1);
            self.clock_pulses = self.clock_pulses.saturating_add(1);
        }
    }

    fn data_level(&self) -> Level {
        match self.pressed.get(self.cursor) {
            Some(true) => Level::Low,
            Some(false) => Level::High,
            None => Level::High,
        }
    }
}

/// Simulated board I/O.
#[derive(Debug, Clone, Default)]
pub struct SimulatedIo {
    lines: BTreeMap<PinId, LineState>,
    controller: Option<SimulatedController>,
    direction_changes: u64,
}

impl SimulatedIo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a controller model to the given serial lines.
    pub fn attach_controller(&mut self, latch: PinId, clock: PinId, data: PinId) {
        self.controller = Some(SimulatedController::new(latch, clock, data));
    }

    /// Unplug the controller; the data line then reads its pull-up level.
    pub fn detach_controller(&mut self) -> Option<SimulatedController> {
        self.controller.take()
    }

    /// Set the bits the attached controller reports. No-op when nothing is
    /// attached.
    pub fn set_controller_bits(&mut self, pressed: impl IntoIterator<Item = bool>) {
        if let Some(controller) = self.controller.as_mut() {
            controller.set_bits(pressed);
        }
    }

    #[must_use]
    pub fn controller(&self) -> Option<&SimulatedController> {
        self.controller.as_ref()
    }

    /// Impose a level on a line from outside the board.
    pub fn set_external_level(&mut self, pin: PinId, level: Option<Level>) {
        self.lines.entry(pin).or_default().external = level;
    }

    #[must_use]
    pub fn line(&self, pin: PinId) -> LineState {
        self.lines.get(&pin).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn direction(&self, pin: PinId) -> Direction {
        self.line(pin).direction
    }

    #[must_use]
    pub fn output_level(&self, pin: PinId) -> Level {
        self.line(pin).output
    }

    /// True when the line is an output driven low (an asserted
    /// open-collector line).
    #[must_use]
    pub fn is_pulled_low(&self, pin: PinId) -> bool {
        let line = self.line(pin);
        line.direction == Direction::Output && line.output.is_low()
    }

    /// True when the line is an output driven high (a lit indicator).
    #[must_use]
    pub fn is_driven_high(&self, pin: PinId) -> bool {
        let line = self.line(pin);
        line.direction == Direction::Output && line.output.is_high()
    }

    #[must_use]
    pub fn is_floating(&self, pin: PinId) -> bool {
        self.line(pin).direction.is_input()
    }

    #[must_use]
    pub fn direction_changes(&self) -> u64 {
        self.direction_changes
    }
}

impl DigitalIo for SimulatedIo {
    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        self.lines.entry(pin).or_default().direction = direction;
        self.direction_changes = self.direction_changes.saturating_add(1);
    }

    fn write_level(&mut self, pin: PinId, level: Level) {
        let line = self.lines.entry(pin).or_default();
        let previous = line.output;
        line.output = level;

        if let Some(controller) = self.controller.as_mut() {
            if pin == controller.latch {
                controller.on_latch(previous, level);
            } else if pin == controller.clock {
                controller.on_clock(previous, level);
            }
        }
    }

    fn read_level(&mut self, pin: PinId) -> Level {
        if let Some(controller) = self.controller.as_ref() {
            if pin == controller.data {
                return controller.data_level();
            }
        }
        self.line(pin).sensed_level()
    }
}
