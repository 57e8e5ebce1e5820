//! Prelude for snes-pad-protocol.

pub use crate::config::{ControllerPins, ProtocolConfig, ProtocolTiming};
pub use crate::decoder::{ControllerDecoder, PollResult};
pub use crate::input::{
    DecodeOptions, LogicalInput, MouseAccumulator, MouseMotion, ShoulderPolicy, decode,
};
pub use crate::mode::{DeviceMode, has_mouse_signature};
pub use crate::report::RawReport;
pub use crate::{ProtocolConfigError, ProtocolResult};
