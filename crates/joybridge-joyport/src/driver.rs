//! Drives the active joystick port from decoded input.

use crate::JoyPortResult;
use crate::config::{JoyLine, JoyPortConfig, JoyPortPinSet};
use joybridge_hal::{DigitalIo, Direction, Level};
use joybridge_settings::{FireButtonId, JoyPort, SettingsState};
use snes_pad_protocol::LogicalInput;
use tracing::{debug, trace};

/// Output side of the adapter.
///
/// Remembers the last state driven on each line of the active port and
/// only touches lines whose state changes. The indicator is lit whenever
/// either fire output rises and put out once the pulse has elapsed,
/// checked against the clock on every call rather than slept for.
#[derive(Debug, Clone)]
pub struct JoystickDriver {
    config: JoyPortConfig,
    active_port: JoyPort,
    /// `None` forces the next apply to write the line.
    driven: [Option<bool>; 6],
    /// Fire output per button on the previous cycle.
    firing: [bool; 2],
    indicator_since: Option<u64>,
}

impl JoystickDriver {
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: JoyPortConfig) -> JoyPortResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active_port: JoyPort::Port0,
            driven: [None; 6],
            firing: [false; 2],
            indicator_since: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &JoyPortConfig {
        &self.config
    }

    #[must_use]
    pub fn active_port(&self) -> JoyPort {
        self.active_port
    }

    /// Last state driven on `line` of the active port.
    #[must_use]
    pub fn driven(&self, line: JoyLine) -> Option<bool> {
        self.driven[line.index()]
    }

    #[must_use]
    pub fn indicator_lit(&self) -> bool {
        self.indicator_since.is_some()
    }

    fn active_pins(&self) -> JoyPortPinSet {
        *self.config.pins(self.active_port)
    }

    /// Release every joystick line on both ports and set up the indicators
    /// as unlit outputs, then make `port` active.
    pub fn init<I: DigitalIo + ?Sized>(&mut self, io: &mut I, port: JoyPort) {
        for pins in &self.config.ports {
            for pin in pins.lines() {
                io.float(pin);
            }
            io.write_level(pins.indicator, Level::Low);
            io.set_direction(pins.indicator, Direction::Output);
        }
        self.active_port = port;
        self.driven = [Some(false); 6];
        self.firing = [false; 2];
        self.indicator_since = None;
        debug!(%port, "Joystick ports initialised");
    }

    /// Drive one cycle of output.
    ///
    /// A fire button mapped to Up leaves its own line released and presses
    /// Up instead. Other fire buttons go through their autofire oscillator.
    pub fn apply<I: DigitalIo + ?Sized>(
        &mut self,
        io: &mut I,
        input: &LogicalInput,
        settings: &mut SettingsState,
        now_ms: u64,
    ) {
        let port = settings.active_port();
        if port != self.active_port {
            self.switch_port(io, port);
        }

        let mut up = input.up;
        let mut fire = [false; 2];
        for id in FireButtonId::ALL {
            let pressed = match id {
                FireButtonId::Fire1 => input.fire1,
                FireButtonId::Fire2 => input.fire2,
            };
            if settings.fire_button(id).mapped_to_up() {
                up |= pressed;
            } else {
                fire[id.index()] = settings.fire_output(id, pressed, now_ms);
            }
        }

        let [fire1, fire2] = fire;
        let states = [up, input.down, input.left, input.right, fire1, fire2];
        for (line, asserted) in JoyLine::ALL.into_iter().zip(states) {
            self.drive(io, line, asserted);
        }
        trace!(?states, "Joystick lines driven");

        self.update_indicator(io, fire, now_ms);
    }

    /// Release the six lines of the active port while a configuration chord
    /// is held, leaving a running indicator pulse to expire on its own.
    ///
    /// Lines already released are not touched again.
    pub fn hold_released<I: DigitalIo + ?Sized>(&mut self, io: &mut I, now_ms: u64) {
        for line in JoyLine::ALL {
            self.drive(io, line, false);
        }
        self.firing = [false; 2];
        self.expire_indicator(io, now_ms);
    }

    /// Put the indicator out if its pulse has run its course.
    pub fn expire_indicator<I: DigitalIo + ?Sized>(&mut self, io: &mut I, now_ms: u64) {
        if let Some(since) = self.indicator_since
            && now_ms.saturating_sub(since) >= u64::from(self.config.indicator_pulse_ms)
        {
            io.write_level(self.active_pins().indicator, Level::Low);
            self.indicator_since = None;
        }
    }

    /// Force a fire line of the active port to released.
    pub fn release_fire<I: DigitalIo + ?Sized>(&mut self, io: &mut I, id: FireButtonId) {
        let line = JoyLine::fire(id);
        io.float(self.active_pins().pin(line));
        self.driven[line.index()] = Some(false);
    }

    /// Release every line of the active port and put its indicator out.
    pub fn release_all<I: DigitalIo + ?Sized>(&mut self, io: &mut I) {
        let pins = self.active_pins();
        for pin in pins.lines() {
            io.float(pin);
        }
        io.write_level(pins.indicator, Level::Low);
        self.driven = [Some(false); 6];
        self.firing = [false; 2];
        self.indicator_since = None;
    }

    fn switch_port<I: DigitalIo + ?Sized>(&mut self, io: &mut I, port: JoyPort) {
        debug!(from = %self.active_port, to = %port, "Switching joystick port");
        self.release_all(io);
        self.active_port = port;
        self.driven = [None; 6];
    }

    fn drive<I: DigitalIo + ?Sized>(&mut self, io: &mut I, line: JoyLine, asserted: bool) {
        let slot = &mut self.driven[line.index()];
        if *slot == Some(asserted) {
            return;
        }
        io.drive_open_collector(self.config.pins(self.active_port).pin(line), asserted);
        *slot = Some(asserted);
    }

    fn update_indicator<I: DigitalIo + ?Sized>(
        &mut self,
        io: &mut I,
        firing: [bool; 2],
        now_ms: u64,
    ) {
        self.expire_indicator(io, now_ms);
        let rising = firing
            .iter()
            .zip(self.firing)
            .any(|(&now, before)| now && !before);
        if rising {
            io.write_level(self.active_pins().indicator, Level::High);
            self.indicator_since = Some(now_ms);
        }
        self.firing = firing;
    }
}
