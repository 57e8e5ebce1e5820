//! Shared test utilities for JoyBridge.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`fixtures`] - Wire-level bit sequences for NES/SNES pads and the SNES mouse
//! - [`logging`] - Tracing subscriber setup for tests
//!
//! The fixtures deliberately restate the controller wire layout instead of
//! importing it from the protocol crate, so decoder tests check against an
//! independent description of the hardware.
//!
//! ```toml
//! [dev-dependencies]
//! joybridge-test-helpers = { workspace = true }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod fixtures;
pub mod logging;
pub mod must;

pub use fixtures::*;
pub use logging::init_test_tracing;
pub use must::*;
