//! Hardware capabilities consumed by the JoyBridge controller adapter
//!
//! The adapter never touches registers directly. Everything it needs from
//! the board is expressed as three small traits:
//!
//! - [`DigitalIo`] - direction/level control of named lines, including the
//!   open-collector convention used on joystick ports
//! - [`SettingsStore`] - byte-addressed, power-cycle durable storage
//! - [`Clock`] - monotonic milliseconds plus short busy-wait delays
//!
//! Software implementations ([`SimulatedIo`], [`MemoryStore`],
//! [`ManualClock`], [`SystemClock`]) back the test suites and host runs.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod clock;
pub mod io;
pub mod prelude;
pub mod sim;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use io::{DigitalIo, Direction, Level, PinId};
pub use sim::{LineState, SimulatedController, SimulatedIo};
pub use store::{ERASED_BYTE, MemoryStore, SettingsStore, StoreError, StoreResult};
