//! Prelude for joybridge-settings.

pub use crate::autofire::{AutoFireConfig, FireButton};
pub use crate::combo::{
    ComboAction, ComboEngine, ComboGesture, ComboOutcome, CoButton, SpecialButton,
};
pub use crate::persisted::{FireButtonId, JoyPort, PersistedSettings, address};
pub use crate::state::SettingsState;
pub use crate::{SettingsConfigError, SettingsResult};
