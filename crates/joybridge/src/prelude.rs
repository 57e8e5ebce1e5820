//! Prelude for joybridge.
//!
//! Re-exports everything needed to build and drive an adapter, including
//! the software board capabilities.

pub use crate::adapter::{Adapter, CycleReport};
pub use crate::config::AdapterConfig;
pub use crate::{AdapterError, AdapterResult};

pub use joybridge_hal::prelude::*;
pub use joybridge_joyport::{JoyLine, JoyPortConfig, JoyPortPinSet, JoystickDriver};
pub use joybridge_settings::{
    AutoFireConfig, ComboAction, ComboOutcome, FireButtonId, JoyPort, PersistedSettings,
    SettingsState,
};
pub use snes_pad_protocol::{
    ControllerPins, DeviceMode, LogicalInput, PollResult, ProtocolConfig, ShoulderPolicy,
};
