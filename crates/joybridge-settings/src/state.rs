//! Live settings: persisted values plus per-button runtime state.

use crate::SettingsResult;
use crate::autofire::{AutoFireConfig, FireButton};
use crate::combo::ComboAction;
use crate::persisted::{FireButtonId, JoyPort, PersistedSettings, address, write_setting};
use joybridge_hal::SettingsStore;
use tracing::info;

/// Owns the adapter's settings for the session.
///
/// Every mutation writes the store first and then updates memory. A failed
/// write is logged and the in-memory value still changes.
#[derive(Debug, Clone)]
pub struct SettingsState {
    persisted: PersistedSettings,
    fire: [FireButton; 2],
    limits: AutoFireConfig,
}

impl SettingsState {
    /// Build from already-loaded settings, clamping the rate into `limits`.
    ///
    /// # Errors
    ///
    /// Returns an error if `limits` is invalid.
    pub fn new(persisted: PersistedSettings, limits: AutoFireConfig) -> SettingsResult<Self> {
        limits.validate()?;
        let persisted = PersistedSettings {
            auto_fire_rate_ms: limits.clamp(persisted.auto_fire_rate_ms),
            ..persisted
        };
        let fire = FireButtonId::ALL.map(|id| {
            FireButton::new(
                id == FireButtonId::Fire2 && persisted.fire2_mapped_to_up,
                persisted.auto_fire_enabled(id),
            )
        });
        Ok(Self {
            persisted,
            fire,
            limits,
        })
    }

    /// Load and repair the settings from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if `limits` is invalid; nothing is read in that case.
    pub fn load<S: SettingsStore + ?Sized>(
        store: &mut S,
        limits: AutoFireConfig,
    ) -> SettingsResult<Self> {
        limits.validate()?;
        let persisted = PersistedSettings::load(store, &limits);
        Self::new(persisted, limits)
    }

    #[must_use]
    pub fn persisted(&self) -> &PersistedSettings {
        &self.persisted
    }

    #[must_use]
    pub fn limits(&self) -> &AutoFireConfig {
        &self.limits
    }

    #[must_use]
    pub fn active_port(&self) -> JoyPort {
        self.persisted.active_port
    }

    #[must_use]
    pub fn fire_reversed(&self) -> bool {
        self.persisted.fire_reversed
    }

    #[must_use]
    pub fn fire2_mapped_to_up(&self) -> bool {
        self.persisted.fire2_mapped_to_up
    }

    #[must_use]
    pub fn auto_fire_rate_ms(&self) -> u8 {
        self.persisted.auto_fire_rate_ms
    }

    #[must_use]
    pub fn auto_fire_enabled(&self, id: FireButtonId) -> bool {
        self.persisted.auto_fire_enabled(id)
    }

    #[must_use]
    pub fn fire_button(&self, id: FireButtonId) -> &FireButton {
        &self.fire[id.index()]
    }

    /// Output level for fire button `id` this cycle, advancing its autofire
    /// oscillator.
    pub fn fire_output(&mut self, id: FireButtonId, pressed: bool, now_ms: u64) -> bool {
        let rate = self.persisted.auto_fire_rate_ms;
        self.fire[id.index()].output(pressed, now_ms, rate)
    }

    /// Apply one gesture action. Returns `true` if a setting changed.
    ///
    /// Toggles always change and always write. Port selection and rate
    /// steps write only when the value actually moves.
    pub fn apply<S: SettingsStore + ?Sized>(&mut self, action: ComboAction, store: &mut S) -> bool {
        match action {
            ComboAction::ToggleAutoFire(id) => {
                let enabled = !self.persisted.auto_fire_enabled(id);
                write_setting(store, id.auto_fire_address(), u8::from(enabled));
                self.persisted.auto_fire[id.index()] = enabled;
                let button = &mut self.fire[id.index()];
                button.auto_fire_enabled = enabled;
                button.reset();
                info!(button = ?id, enabled, "Autofire toggled");
                true
            }
            ComboAction::AutoFireFaster => {
                let rate = self.limits.faster(self.auto_fire_rate_ms());
                self.set_rate(rate, store)
            }
            ComboAction::AutoFireSlower => {
                let rate = self.limits.slower(self.auto_fire_rate_ms());
                self.set_rate(rate, store)
            }
            ComboAction::SelectPort(port) => {
                if port == self.persisted.active_port {
                    return false;
                }
                write_setting(store, address::ACTIVE_PORT, port.as_byte());
                self.persisted.active_port = port;
                info!(%port, "Joystick port selected");
                true
            }
            ComboAction::ToggleFire2MappedToUp => {
                let mapped = !self.persisted.fire2_mapped_to_up;
                write_setting(store, address::FIRE2_MAPPED_TO_UP, u8::from(mapped));
                self.persisted.fire2_mapped_to_up = mapped;
                let button = &mut self.fire[FireButtonId::Fire2.index()];
                button.mapped_to_up = mapped;
                button.reset();
                info!(mapped, "Fire2 mapped to Up toggled");
                true
            }
            ComboAction::ToggleFireReversal => {
                let reversed = !self.persisted.fire_reversed;
                write_setting(store, address::FIRE_REVERSED, u8::from(reversed));
                self.persisted.fire_reversed = reversed;
                info!(reversed, "Fire button reversal toggled");
                true
            }
        }
    }

    fn set_rate<S: SettingsStore + ?Sized>(&mut self, rate_ms: u8, store: &mut S) -> bool {
        let previous = self.persisted.auto_fire_rate_ms;
        if rate_ms == previous {
            return false;
        }
        write_setting(store, address::AUTO_FIRE_RATE, rate_ms);
        self.persisted.auto_fire_rate_ms = rate_ms;
        info!(previous, rate_ms, "Autofire rate changed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joybridge_hal::MemoryStore;

    fn state(persisted: PersistedSettings) -> SettingsState {
        SettingsState::new(persisted, AutoFireConfig::default())
            .unwrap_or_else(|e| panic!("limits: {e}"))
    }

    #[test]
    fn test_new_clamps_rate_and_mirrors_flags() {
        let s = state(PersistedSettings {
            auto_fire_rate_ms: 250,
            fire2_mapped_to_up: true,
            auto_fire: [true, false],
            ..PersistedSettings::default()
        });
        assert_eq!(s.auto_fire_rate_ms(), 200);
        assert!(s.fire_button(FireButtonId::Fire2).mapped_to_up());
        assert!(!s.fire_button(FireButtonId::Fire1).mapped_to_up());
        assert!(s.fire_button(FireButtonId::Fire1).auto_fire_enabled());
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let limits = AutoFireConfig {
            step_ms: 0,
            ..AutoFireConfig::default()
        };
        let mut store = MemoryStore::default();
        assert!(SettingsState::load(&mut store, limits).is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_toggle_autofire_writes_and_resets_phase() {
        let mut s = state(PersistedSettings::default());
        let mut store = MemoryStore::default();
        assert!(s.fire_output(FireButtonId::Fire1, true, 0));

        assert!(s.apply(ComboAction::ToggleAutoFire(FireButtonId::Fire1), &mut store));
        assert!(s.auto_fire_enabled(FireButtonId::Fire1));
        assert_eq!(store.writes(), &[(address::AUTO_FIRE_1, 1)]);
        assert_eq!(s.fire_button(FireButtonId::Fire1).last_toggle_ms(), None);

        assert!(s.apply(ComboAction::ToggleAutoFire(FireButtonId::Fire1), &mut store));
        assert!(!s.auto_fire_enabled(FireButtonId::Fire1));
        assert_eq!(store.get(address::AUTO_FIRE_1), Some(0));
    }

    #[test]
    fn test_select_current_port_writes_nothing() {
        let mut s = state(PersistedSettings::default());
        let mut store = MemoryStore::default();
        assert!(!s.apply(ComboAction::SelectPort(JoyPort::Port0), &mut store));
        assert_eq!(store.write_count(), 0);

        assert!(s.apply(ComboAction::SelectPort(JoyPort::Port1), &mut store));
        assert_eq!(s.active_port(), JoyPort::Port1);
        assert_eq!(store.writes(), &[(address::ACTIVE_PORT, 1)]);
    }

    #[test]
    fn test_rate_at_limit_writes_nothing() {
        let mut s = state(PersistedSettings {
            auto_fire_rate_ms: 20,
            ..PersistedSettings::default()
        });
        let mut store = MemoryStore::default();
        assert!(!s.apply(ComboAction::AutoFireFaster, &mut store));
        assert_eq!(store.write_count(), 0);

        assert!(s.apply(ComboAction::AutoFireSlower, &mut store));
        assert_eq!(s.auto_fire_rate_ms(), 30);
        assert_eq!(store.writes(), &[(address::AUTO_FIRE_RATE, 30)]);
    }

    #[test]
    fn test_toggle_fire2_mapping() {
        let mut s = state(PersistedSettings::default());
        let mut store = MemoryStore::default();
        assert!(s.apply(ComboAction::ToggleFire2MappedToUp, &mut store));
        assert!(s.fire2_mapped_to_up());
        assert!(s.fire_button(FireButtonId::Fire2).mapped_to_up());
        assert_eq!(store.get(address::FIRE2_MAPPED_TO_UP), Some(1));
    }

    #[test]
    fn test_write_failure_still_updates_memory() {
        let mut s = state(PersistedSettings::default());
        let mut store = MemoryStore::default();
        store.set_fail_writes(true);
        assert!(s.apply(ComboAction::ToggleFireReversal, &mut store));
        assert!(s.fire_reversed());
        assert_eq!(store.write_count(), 0);
    }
}
