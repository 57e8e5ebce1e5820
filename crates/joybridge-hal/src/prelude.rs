//! Prelude for joybridge-hal.
//!
//! ```rust
//! use joybridge_hal::prelude::*;
//!
//! let mut io = SimulatedIo::new();
//! io.pull_low(PinId(4));
//! assert!(io.is_pulled_low(PinId(4)));
//! ```

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::io::{DigitalIo, Direction, Level, PinId};
pub use crate::sim::{LineState, SimulatedController, SimulatedIo};
pub use crate::store::{ERASED_BYTE, MemoryStore, SettingsStore, StoreError, StoreResult};
