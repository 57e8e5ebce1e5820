//! Atari-style joystick port driver for the JoyBridge adapter
//!
//! Two selectable DE-9 ports, each with Up/Down/Left/Right/Fire1/Fire2
//! lines and a fire indicator LED. Joystick lines follow the open-collector
//! convention: asserted means driven low, released means floating so the
//! computer's pull-up restores the idle high level.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod driver;
pub mod prelude;

pub use config::{JoyLine, JoyPortConfig, JoyPortPinSet};
pub use driver::JoystickDriver;

use joybridge_hal::PinId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoyPortConfigError {
    #[error("Pin {0} assigned to more than one joystick line")]
    DuplicatePin(PinId),

    #[error("Indicator pulse duration must be non-zero")]
    ZeroIndicatorPulse,
}

pub type JoyPortResult<T> = Result<T, JoyPortConfigError>;
