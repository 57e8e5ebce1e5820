//! Whole-adapter configuration.

use crate::{AdapterError, AdapterResult};
use joybridge_joyport::JoyPortConfig;
use joybridge_settings::AutoFireConfig;
use serde::{Deserialize, Serialize};
use snes_pad_protocol::ProtocolConfig;

/// Everything needed to build an [`Adapter`](crate::Adapter).
///
/// Every section has defaults, so a JSON document only needs to name what
/// differs from the stock wiring:
///
/// ```rust
/// use joybridge::AdapterConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config: AdapterConfig = serde_json::from_str(r#"{ "auto_fire": { "step_ms": 5 } }"#)?;
/// assert_eq!(config.auto_fire.step_ms, 5);
/// config.validate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub protocol: ProtocolConfig,
    pub auto_fire: AutoFireConfig,
    pub joyport: JoyPortConfig,
}

impl AdapterConfig {
    /// # Errors
    ///
    /// Returns an error if any section is invalid or a controller line
    /// shares a pin with a joystick port.
    pub fn validate(&self) -> AdapterResult<()> {
        self.protocol.validate()?;
        self.auto_fire.validate()?;
        self.joyport.validate()?;

        let controller = self.protocol.pins.all();
        if let Some(pin) = self.joyport.all_pins().find(|pin| controller.contains(pin)) {
            return Err(AdapterError::PinConflict(pin));
        }
        Ok(())
    }
}
