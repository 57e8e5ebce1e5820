//! Digital line abstraction.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of a physical digital line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub u8);

impl PinId {
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Electrical level of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    #[must_use]
    pub const fn from_high(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }

    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }

    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl core::ops::Not for Level {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Line direction.
///
/// `Input` leaves the line floating so an external pull-up sets its idle
/// level; `InputPullUp` enables the internal pull-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Input,
    InputPullUp,
    Output,
}

impl Direction {
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input | Self::InputPullUp)
    }
}

/// Direction and level control of named lines.
///
/// Implementations are infallible: a pin write on a microcontroller has no
/// failure path worth reporting to the control loop.
pub trait DigitalIo {
    fn set_direction(&mut self, pin: PinId, direction: Direction);

    fn write_level(&mut self, pin: PinId, level: Level);

    fn read_level(&mut self, pin: PinId) -> Level;

    /// Assert an open-collector line: drive it low as an output.
    ///
    /// The level is written before the direction flips so the line never
    /// glitches high.
    fn pull_low(&mut self, pin: PinId) {
        self.write_level(pin, Level::Low);
        self.set_direction(pin, Direction::Output);
    }

    /// Release an open-collector line: leave it floating so the external
    /// pull-up restores the idle high level.
    fn float(&mut self, pin: PinId) {
        self.set_direction(pin, Direction::Input);
    }

    fn drive_open_collector(&mut self, pin: PinId, asserted: bool) {
        if asserted {
            self.pull_low(pin);
        } else {
            self.float(pin);
        }
    }
}

impl<T: DigitalIo + ?Sized> DigitalIo for &mut T {
    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        (**self).set_direction(pin, direction);
    }

    fn write_level(&mut self, pin: PinId, level: Level) {
        (**self).write_level(pin, level);
    }

    fn read_level(&mut self, pin: PinId) -> Level {
        (**self).read_level(pin)
    }
}
