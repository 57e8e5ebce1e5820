//! Settings and gesture state machine for the JoyBridge adapter
//!
//! Holds everything that survives a power cycle (active joystick port,
//! autofire flags and rate, fire reversal, Fire2-as-Up) plus the per-button
//! autofire oscillators, and interprets Start/Select chords as one-shot
//! configuration gestures.
//!
//! ## Features
//! - Byte-addressed persistence over [`joybridge_hal::SettingsStore`] with
//!   repair of corrupt or erased cells at load time
//! - Non-blocking autofire driven by elapsed milliseconds
//! - Edge-on-release gesture table that suppresses joystick output while a
//!   chord is held
//!
//! Every store write happens only when a value actually changes.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod autofire;
pub mod combo;
pub mod persisted;
pub mod prelude;
pub mod state;

pub use autofire::{AutoFireConfig, FireButton};
pub use combo::{ComboAction, ComboEngine, ComboGesture, ComboOutcome, CoButton, SpecialButton};
pub use persisted::{FireButtonId, JoyPort, PersistedSettings, address};
pub use state::SettingsState;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsConfigError {
    #[error("Minimum autofire rate must be non-zero")]
    ZeroMinimumRate,

    #[error("Autofire rate range is inverted: min {min} ms > max {max} ms")]
    InvertedRateRange { min: u8, max: u8 },

    #[error("Autofire rate step must be non-zero")]
    ZeroStep,
}

pub type SettingsResult<T> = Result<T, SettingsConfigError>;
