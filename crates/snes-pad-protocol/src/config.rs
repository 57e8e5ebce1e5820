//! Wiring and timing of the controller port.

use crate::input::ShoulderPolicy;
use crate::{MAX_MOTION_MAGNITUDE, ProtocolConfigError, ProtocolResult};
use joybridge_hal::PinId;
use serde::{Deserialize, Serialize};

/// The three serial lines of the controller port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerPins {
    pub latch: PinId,
    pub clock: PinId,
    pub data: PinId,
}

impl Default for ControllerPins {
    fn default() -> Self {
        Self {
            latch: PinId(2),
            clock: PinId(3),
            data: PinId(10),
        }
    }
}

impl ControllerPins {
    #[must_use]
    pub fn all(&self) -> [PinId; 3] {
        [self.latch, self.clock, self.data]
    }
}

/// Busy-wait widths of the serial handshake, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolTiming {
    /// How long the latch is held high.
    pub latch_pulse_us: u32,
    /// Gap between latch release and the first sample.
    pub latch_setup_us: u32,
    /// Each half of a clock pulse.
    pub clock_half_period_us: u32,
    /// Pause after the last bit before the port is used again.
    pub settle_us: u32,
}

impl Default for ProtocolTiming {
    fn default() -> Self {
        Self {
            latch_pulse_us: 12,
            latch_setup_us: 6,
            clock_half_period_us: 6,
            settle_us: 1000,
        }
    }
}

/// Everything the decoder needs to know about its port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub pins: ControllerPins,
    pub timing: ProtocolTiming,
    /// Mouse motion magnitude that must be exceeded to assert a direction.
    pub mouse_threshold: u8,
    pub shoulder_policy: ShoulderPolicy,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            pins: ControllerPins::default(),
            timing: ProtocolTiming::default(),
            mouse_threshold: 1,
            shoulder_policy: ShoulderPolicy::Ignore,
        }
    }
}

impl ProtocolConfig {
    #[must_use]
    pub fn builder() -> ProtocolConfigBuilder {
        ProtocolConfigBuilder::default()
    }

    /// # Errors
    ///
    /// Returns an error if two serial lines share a pin, a pulse width is
    /// zero, or the mouse threshold cannot be exceeded by a 7-bit field.
    pub fn validate(&self) -> ProtocolResult<()> {
        let pins = self.pins.all();
        for (index, pin) in pins.iter().enumerate() {
            if pins.iter().skip(index + 1).any(|other| other == pin) {
                return Err(ProtocolConfigError::DuplicatePin(*pin));
            }
        }
        if self.timing.latch_pulse_us == 0 {
            return Err(ProtocolConfigError::ZeroTiming("latch_pulse_us"));
        }
        if self.timing.clock_half_period_us == 0 {
            return Err(ProtocolConfigError::ZeroTiming("clock_half_period_us"));
        }
        if self.mouse_threshold >= MAX_MOTION_MAGNITUDE {
            return Err(ProtocolConfigError::ThresholdOutOfRange(self.mouse_threshold));
        }
        Ok(())
    }
}

/// Builder for [`ProtocolConfig`].
#[derive(Debug, Default)]
pub struct ProtocolConfigBuilder {
    config: ProtocolConfig,
}

impl ProtocolConfigBuilder {
    #[must_use]
    pub fn timing(mut self, timing: ProtocolTiming) -> Self {
        self.config.timing = timing;
        self
    }

    #[must_use]
    pub fn mouse_threshold(mut self, threshold: u8) -> Self {
        self.config.mouse_threshold = threshold;
        self
    }

    #[must_use]
    pub fn shoulder_policy(mut self, policy: ShoulderPolicy) -> Self {
        self.config.shoulder_policy = policy;
        self
    }

    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> ProtocolResult<ProtocolConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
