//! Joystick port wiring.

use crate::{JoyPortConfigError, JoyPortResult};
use joybridge_hal::PinId;
use joybridge_settings::{FireButtonId, JoyPort};
use serde::{Deserialize, Serialize};

/// One of the six open-collector lines of a joystick port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoyLine {
    Up,
    Down,
    Left,
    Right,
    Fire1,
    Fire2,
}

impl JoyLine {
    pub const ALL: [Self; 6] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Fire1,
        Self::Fire2,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::Fire1 => 4,
            Self::Fire2 => 5,
        }
    }

    #[must_use]
    pub const fn fire(id: FireButtonId) -> Self {
        match id {
            FireButtonId::Fire1 => Self::Fire1,
            FireButtonId::Fire2 => Self::Fire2,
        }
    }
}

/// Pins of one joystick port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoyPortPinSet {
    pub up: PinId,
    pub down: PinId,
    pub left: PinId,
    pub right: PinId,
    pub fire1: PinId,
    pub fire2: PinId,
    /// Push-pull LED output, high = lit.
    pub indicator: PinId,
}

impl JoyPortPinSet {
    #[must_use]
    pub const fn pin(&self, line: JoyLine) -> PinId {
        match line {
            JoyLine::Up => self.up,
            JoyLine::Down => self.down,
            JoyLine::Left => self.left,
            JoyLine::Right => self.right,
            JoyLine::Fire1 => self.fire1,
            JoyLine::Fire2 => self.fire2,
        }
    }

    /// The six joystick lines in [`JoyLine::ALL`] order.
    #[must_use]
    pub fn lines(&self) -> [PinId; 6] {
        JoyLine::ALL.map(|line| self.pin(line))
    }

    #[must_use]
    pub fn all(&self) -> [PinId; 7] {
        [
            self.up,
            self.down,
            self.left,
            self.right,
            self.fire1,
            self.fire2,
            self.indicator,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoyPortConfig {
    /// Indexed by [`JoyPort::index`].
    pub ports: [JoyPortPinSet; 2],
    /// How long the indicator stays lit after fire starts.
    pub indicator_pulse_ms: u32,
}

impl Default for JoyPortConfig {
    fn default() -> Self {
        Self {
            ports: [
                JoyPortPinSet {
                    up: PinId(4),
                    down: PinId(5),
                    left: PinId(6),
                    right: PinId(7),
                    fire1: PinId(8),
                    fire2: PinId(9),
                    indicator: PinId(13),
                },
                JoyPortPinSet {
                    up: PinId(14),
                    down: PinId(15),
                    left: PinId(16),
                    right: PinId(17),
                    fire1: PinId(18),
                    fire2: PinId(19),
                    indicator: PinId(12),
                },
            ],
            indicator_pulse_ms: 40,
        }
    }
}

impl JoyPortConfig {
    #[must_use]
    pub fn pins(&self, port: JoyPort) -> &JoyPortPinSet {
        &self.ports[port.index()]
    }

    /// Every pin of both ports.
    pub fn all_pins(&self) -> impl Iterator<Item = PinId> + '_ {
        self.ports.iter().flat_map(JoyPortPinSet::all)
    }

    /// # Errors
    ///
    /// Returns an error if a pin is shared between lines or the indicator
    /// pulse is zero.
    pub fn validate(&self) -> JoyPortResult<()> {
        let pins: Vec<PinId> = self.all_pins().collect();
        for (index, pin) in pins.iter().enumerate() {
            if pins.iter().skip(index + 1).any(|other| other == pin) {
                return Err(JoyPortConfigError::DuplicatePin(*pin));
            }
        }
        if self.indicator_pulse_ms == 0 {
            return Err(JoyPortConfigError::ZeroIndicatorPulse);
        }
        Ok(())
    }
}
