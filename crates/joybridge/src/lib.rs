//! JoyBridge: NES/SNES controller to Atari joystick port adapter
//!
//! Ties the pieces together into one poll, evaluate, drive cycle:
//!
//! 1. [`snes_pad_protocol::ControllerDecoder`] reads the controller and
//!    works out what is plugged in
//! 2. [`joybridge_settings::ComboEngine`] watches for Start/Select
//!    configuration chords and applies them to the persisted settings
//! 3. [`joybridge_joyport::JoystickDriver`] drives the selected joystick
//!    port, unless a chord is being held
//!
//! All state lives in one [`Adapter`] value that owns the board
//! capabilities, so tests can build as many independent adapters as they
//! like over simulated hardware.
//!
//! ```rust
//! use joybridge::prelude::*;
//!
//! # fn main() -> Result<(), AdapterError> {
//! let mut adapter = Adapter::new(
//!     SimulatedIo::new(),
//!     MemoryStore::default(),
//!     ManualClock::new(),
//!     AdapterConfig::default(),
//! )?;
//! let report = adapter.run_cycle();
//! assert!(!report.suppressed);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod adapter;
pub mod config;
pub mod prelude;

pub use adapter::{Adapter, CycleReport};
pub use config::AdapterConfig;

use joybridge_hal::PinId;
use joybridge_joyport::JoyPortConfigError;
use joybridge_settings::SettingsConfigError;
use snes_pad_protocol::ProtocolConfigError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Controller port configuration: {0}")]
    Protocol(#[from] ProtocolConfigError),

    #[error("Settings configuration: {0}")]
    Settings(#[from] SettingsConfigError),

    #[error("Joystick port configuration: {0}")]
    JoyPort(#[from] JoyPortConfigError),

    #[error("Pin {0} is used by both the controller and a joystick port")]
    PinConflict(PinId),
}

pub type AdapterResult<T> = Result<T, AdapterError>;
