//! Autofire timing.

use crate::{SettingsConfigError, SettingsResult};
use serde::{Deserialize, Serialize};

/// Bounds and step of the adjustable autofire rate, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFireConfig {
    pub min_rate_ms: u8,
    pub max_rate_ms: u8,
    /// Change applied by one faster/slower gesture.
    pub step_ms: u8,
}

impl Default for AutoFireConfig {
    fn default() -> Self {
        Self {
            min_rate_ms: 20,
            max_rate_ms: 200,
            step_ms: 10,
        }
    }
}

impl AutoFireConfig {
    /// # Errors
    ///
    /// Returns an error if the minimum or step is zero, or the range is
    /// inverted.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.min_rate_ms == 0 {
            return Err(SettingsConfigError::ZeroMinimumRate);
        }
        if self.min_rate_ms > self.max_rate_ms {
            return Err(SettingsConfigError::InvertedRateRange {
                min: self.min_rate_ms,
                max: self.max_rate_ms,
            });
        }
        if self.step_ms == 0 {
            return Err(SettingsConfigError::ZeroStep);
        }
        Ok(())
    }

    #[must_use]
    pub fn clamp(&self, rate_ms: u8) -> u8 {
        rate_ms.clamp(self.min_rate_ms, self.max_rate_ms.max(self.min_rate_ms))
    }

    /// Rate after one "faster" gesture.
    #[must_use]
    pub fn faster(&self, rate_ms: u8) -> u8 {
        self.clamp(rate_ms.saturating_sub(self.step_ms))
    }

    /// Rate after one "slower" gesture.
    #[must_use]
    pub fn slower(&self, rate_ms: u8) -> u8 {
        self.clamp(rate_ms.saturating_add(self.step_ms))
    }
}

/// Runtime state of one logical fire button.
///
/// `mapped_to_up` and `auto_fire_enabled` mirror the persisted settings;
/// the phase and timer only live for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FireButton {
    pub(crate) mapped_to_up: bool,
    pub(crate) auto_fire_enabled: bool,
    phase: bool,
    last_toggle_ms: Option<u64>,
}

impl FireButton {
    #[must_use]
    pub fn new(mapped_to_up: bool, auto_fire_enabled: bool) -> Self {
        Self {
            mapped_to_up,
            auto_fire_enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mapped_to_up(&self) -> bool {
        self.mapped_to_up
    }

    #[must_use]
    pub fn auto_fire_enabled(&self) -> bool {
        self.auto_fire_enabled
    }

    #[must_use]
    pub fn phase(&self) -> bool {
        self.phase
    }

    /// Timestamp of the last phase change; `None` while the button is up.
    #[must_use]
    pub fn last_toggle_ms(&self) -> Option<u64> {
        self.last_toggle_ms
    }

    /// Whether the output line should be asserted this cycle.
    ///
    /// With autofire off the output mirrors `pressed`. With autofire on, the
    /// first pressed cycle asserts immediately and starts the timer; after
    /// that the phase flips each time `rate_ms` has elapsed. Releasing the
    /// button stops the timer so the next press starts over.
    pub fn output(&mut self, pressed: bool, now_ms: u64, rate_ms: u8) -> bool {
        if !pressed {
            self.reset();
            return false;
        }
        if !self.auto_fire_enabled {
            return true;
        }
        match self.last_toggle_ms {
            None => {
                self.phase = true;
                self.last_toggle_ms = Some(now_ms);
            }
            Some(last) if now_ms.saturating_sub(last) >= u64::from(rate_ms) => {
                self.phase = !self.phase;
                self.last_toggle_ms = Some(now_ms);
            }
            Some(_) => {}
        }
        self.phase
    }

    /// Drop the phase and stop the timer.
    pub fn reset(&mut self) {
        self.phase = false;
        self.last_toggle_ms = None;
    }
}
