//! Settings that survive a power cycle.

use crate::autofire::AutoFireConfig;
use joybridge_hal::{ERASED_BYTE, SettingsStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Store addresses, one byte each.
pub mod address {
    pub const ACTIVE_PORT: u16 = 0;
    pub const FIRE2_MAPPED_TO_UP: u16 = 1;
    pub const AUTO_FIRE_1: u16 = 2;
    pub const AUTO_FIRE_2: u16 = 3;
    pub const AUTO_FIRE_RATE: u16 = 4;
    pub const FIRE_REVERSED: u16 = 5;

    /// Number of bytes the settings occupy.
    pub const SPAN: u16 = 6;
}

/// One of the two joystick output ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JoyPort {
    #[default]
    Port0,
    Port1,
}

impl JoyPort {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Port0 => 0,
            Self::Port1 => 1,
        }
    }

    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Port0),
            1 => Some(Self::Port1),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Port0 => 0,
            Self::Port1 => 1,
        }
    }
}

impl core::fmt::Display for JoyPort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "port {}", self.index())
    }
}

/// Logical fire button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireButtonId {
    Fire1,
    Fire2,
}

impl FireButtonId {
    pub const ALL: [Self; 2] = [Self::Fire1, Self::Fire2];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fire1 => 0,
            Self::Fire2 => 1,
        }
    }

    #[must_use]
    pub const fn auto_fire_address(self) -> u16 {
        match self {
            Self::Fire1 => address::AUTO_FIRE_1,
            Self::Fire2 => address::AUTO_FIRE_2,
        }
    }
}

/// Durable adapter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub active_port: JoyPort,
    pub fire2_mapped_to_up: bool,
    /// Indexed by [`FireButtonId::index`].
    pub auto_fire: [bool; 2],
    /// Half period of the autofire square wave.
    pub auto_fire_rate_ms: u8,
    pub fire_reversed: bool,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            active_port: JoyPort::Port0,
            fire2_mapped_to_up: false,
            auto_fire: [false; 2],
            auto_fire_rate_ms: 100,
            fire_reversed: false,
        }
    }
}

impl PersistedSettings {
    /// Read every setting from `store`, repairing what is out of range.
    ///
    /// Flags and the port must read 0 or 1; anything else, including an
    /// erased cell or a failed read, becomes 0. The rate is clamped into
    /// the configured range. Repaired values are written back right away.
    pub fn load<S: SettingsStore + ?Sized>(store: &mut S, limits: &AutoFireConfig) -> Self {
        let port = read_flag(store, address::ACTIVE_PORT);
        let settings = Self {
            active_port: if port { JoyPort::Port1 } else { JoyPort::Port0 },
            fire2_mapped_to_up: read_flag(store, address::FIRE2_MAPPED_TO_UP),
            auto_fire: [
                read_flag(store, address::AUTO_FIRE_1),
                read_flag(store, address::AUTO_FIRE_2),
            ],
            auto_fire_rate_ms: read_rate(store, limits),
            fire_reversed: read_flag(store, address::FIRE_REVERSED),
        };
        debug!(?settings, "Loaded persisted settings");
        settings
    }

    #[must_use]
    pub fn auto_fire_enabled(&self, id: FireButtonId) -> bool {
        self.auto_fire[id.index()]
    }

    /// Byte image in address order.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; address::SPAN as usize] {
        [
            self.active_port.as_byte(),
            u8::from(self.fire2_mapped_to_up),
            u8::from(self.auto_fire[0]),
            u8::from(self.auto_fire[1]),
            self.auto_fire_rate_ms,
            u8::from(self.fire_reversed),
        ]
    }
}

fn read_byte<S: SettingsStore + ?Sized>(store: &mut S, address: u16) -> u8 {
    match store.read_byte(address) {
        Ok(byte) => byte,
        Err(error) => {
            warn!(address, %error, "Settings read failed; treating cell as erased");
            ERASED_BYTE
        }
    }
}

fn read_flag<S: SettingsStore + ?Sized>(store: &mut S, address: u16) -> bool {
    match read_byte(store, address) {
        0 => false,
        1 => true,
        raw => {
            warn!(address, raw, "Repairing out-of-range setting to 0");
            write_setting(store, address, 0);
            false
        }
    }
}

fn read_rate<S: SettingsStore + ?Sized>(store: &mut S, limits: &AutoFireConfig) -> u8 {
    let raw = read_byte(store, address::AUTO_FIRE_RATE);
    let rate = limits.clamp(raw);
    if rate != raw {
        warn!(raw, clamped = rate, "Repairing out-of-range autofire rate");
        write_setting(store, address::AUTO_FIRE_RATE, rate);
    }
    rate
}

/// Write one byte, logging instead of failing: the in-memory value stays
/// authoritative for the rest of the session.
pub(crate) fn write_setting<S: SettingsStore + ?Sized>(store: &mut S, address: u16, value: u8) {
    if let Err(error) = store.write_byte(address, value) {
        warn!(address, value, %error, "Settings write failed; keeping in-memory value");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joybridge_hal::MemoryStore;

    #[test]
    fn test_load_valid_store_writes_nothing() {
        let mut store = MemoryStore::from_bytes(&[1, 1, 0, 1, 60, 1]);
        let settings = PersistedSettings::load(&mut store, &AutoFireConfig::default());

        assert_eq!(settings.active_port, JoyPort::Port1);
        assert!(settings.fire2_mapped_to_up);
        assert_eq!(settings.auto_fire, [false, true]);
        assert_eq!(settings.auto_fire_rate_ms, 60);
        assert!(settings.fire_reversed);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_load_erased_store_repairs_everything() {
        let mut store = MemoryStore::new(16);
        let settings = PersistedSettings::load(&mut store, &AutoFireConfig::default());

        assert_eq!(settings.active_port, JoyPort::Port0);
        assert!(!settings.fire2_mapped_to_up);
        assert_eq!(settings.auto_fire, [false, false]);
        assert_eq!(settings.auto_fire_rate_ms, 200);
        assert!(!settings.fire_reversed);
        assert_eq!(store.write_count(), 6);
        assert_eq!(store.get(address::AUTO_FIRE_RATE), Some(200));
        assert_eq!(store.get(address::ACTIVE_PORT), Some(0));
    }

    #[test]
    fn test_load_clamps_low_rate() {
        let mut store = MemoryStore::from_bytes(&[0, 0, 0, 0, 5, 0]);
        let settings = PersistedSettings::load(&mut store, &AutoFireConfig::default());
        assert_eq!(settings.auto_fire_rate_ms, 20);
        assert_eq!(store.writes(), &[(address::AUTO_FIRE_RATE, 20)]);
    }

    #[test]
    fn test_load_from_short_store_treats_missing_cells_as_erased() {
        let mut store = MemoryStore::from_bytes(&[1, 0]);
        let settings = PersistedSettings::load(&mut store, &AutoFireConfig::default());
        assert_eq!(settings.active_port, JoyPort::Port1);
        assert!(!settings.auto_fire[0]);
        assert_eq!(settings.auto_fire_rate_ms, 200);
    }

    #[test]
    fn test_to_bytes_matches_addresses() {
        let settings = PersistedSettings {
            active_port: JoyPort::Port1,
            auto_fire: [true, false],
            ..PersistedSettings::default()
        };
        let bytes = settings.to_bytes();
        assert_eq!(bytes[usize::from(address::ACTIVE_PORT)], 1);
        assert_eq!(bytes[usize::from(address::AUTO_FIRE_1)], 1);
        assert_eq!(bytes[usize::from(address::AUTO_FIRE_RATE)], 100);
    }

    #[test]
    fn test_joy_port_bytes() {
        assert_eq!(JoyPort::from_byte(1), Some(JoyPort::Port1));
        assert_eq!(JoyPort::from_byte(2), None);
        assert_eq!(JoyPort::Port1.to_string(), "port 1");
    }
}
