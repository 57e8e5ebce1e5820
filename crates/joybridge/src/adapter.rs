//! The adapter context and its control cycle.

use crate::AdapterResult;
use crate::config::AdapterConfig;
use joybridge_hal::{Clock, DigitalIo, SettingsStore};
use joybridge_joyport::JoystickDriver;
use joybridge_settings::{ComboAction, ComboEngine, ComboOutcome, SettingsState};
use snes_pad_protocol::{ControllerDecoder, LogicalInput, PollResult};
use tracing::{debug, info, trace};

/// What one cycle saw and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub poll: PollResult,
    /// A configuration chord was held; the joystick port was released.
    pub suppressed: bool,
    /// Gesture actions that fired this cycle.
    pub fired: Vec<ComboAction>,
}

/// Owns the board capabilities and every piece of adapter state.
///
/// Nothing here is shared: one control loop drives one adapter, and the
/// running cycle has no failure path.
#[derive(Debug)]
pub struct Adapter<I, S, C> {
    io: I,
    store: S,
    clock: C,
    decoder: ControllerDecoder,
    settings: SettingsState,
    combos: ComboEngine,
    driver: JoystickDriver,
}

impl<I, S, C> Adapter<I, S, C>
where
    I: DigitalIo,
    S: SettingsStore,
    C: Clock,
{
    /// Validate `config`, load settings from `store` (repairing them as
    /// needed) and put every line in its idle state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. The store and the
    /// lines are not touched in that case.
    pub fn new(mut io: I, mut store: S, clock: C, config: AdapterConfig) -> AdapterResult<Self> {
        config.validate()?;
        let decoder = ControllerDecoder::new(config.protocol)?;
        let mut driver = JoystickDriver::new(config.joyport)?;
        let settings = SettingsState::load(&mut store, config.auto_fire)?;

        decoder.init(&mut io);
        driver.init(&mut io, settings.active_port());

        let persisted = settings.persisted();
        info!(
            port = %persisted.active_port,
            auto_fire = ?persisted.auto_fire,
            rate_ms = persisted.auto_fire_rate_ms,
            fire_reversed = persisted.fire_reversed,
            fire2_mapped_to_up = persisted.fire2_mapped_to_up,
            "JoyBridge adapter started"
        );

        Ok(Self {
            io,
            store,
            clock,
            decoder,
            settings,
            combos: ComboEngine::new(),
            driver,
        })
    }

    /// Poll the controller, run the gesture table, then drive the joystick
    /// port. While a chord is held every line of the port is released.
    pub fn run_cycle(&mut self) -> CycleReport {
        let poll = self.decoder.poll(
            &mut self.io,
            &mut self.clock,
            self.settings.fire_reversed(),
        );
        let ComboOutcome { suppress, fired } = self.evaluate(&poll.input);

        let now_ms = self.clock.now_millis();
        if suppress {
            trace!("Chord held; joystick lines released");
            self.driver.hold_released(&mut self.io, now_ms);
        } else {
            self.driver
                .apply(&mut self.io, &poll.input, &mut self.settings, now_ms);
        }

        CycleReport {
            poll,
            suppressed: suppress,
            fired,
        }
    }

    /// Feed `input` to the gesture table and apply whatever fires.
    ///
    /// Turning autofire on or off for a button also releases that button's
    /// line so a half-finished oscillation cannot stick.
    pub fn evaluate(&mut self, input: &LogicalInput) -> ComboOutcome {
        let outcome = self.combos.evaluate(input);
        for &action in &outcome.fired {
            info!(?action, "Gesture fired");
            if !self.settings.apply(action, &mut self.store) {
                debug!(?action, "Gesture left settings unchanged");
            }
            if let ComboAction::ToggleAutoFire(id) = action {
                self.driver.release_fire(&mut self.io, id);
            }
        }
        outcome
    }

    /// Cycle forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    #[must_use]
    pub fn decoder(&self) -> &ControllerDecoder {
        &self.decoder
    }

    #[must_use]
    pub fn driver(&self) -> &JoystickDriver {
        &self.driver
    }

    #[must_use]
    pub fn combos(&self) -> &ComboEngine {
        &self.combos
    }

    #[must_use]
    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Hand the capabilities back, e.g. to simulate a power cycle.
    pub fn into_parts(self) -> (I, S, C) {
        (self.io, self.store, self.clock)
    }
}
