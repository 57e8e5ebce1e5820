//! Prelude for joybridge-joyport.

pub use crate::config::{JoyLine, JoyPortConfig, JoyPortPinSet};
pub use crate::driver::JoystickDriver;
pub use crate::{JoyPortConfigError, JoyPortResult};
