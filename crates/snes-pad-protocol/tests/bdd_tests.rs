//! End-to-end decoding over the simulated controller port.
//!
//! Feature: controller_detection.feature

use joybridge_hal::prelude::*;
use joybridge_test_helpers::{
    MouseFixture, NesButton, SnesButton, init_test_tracing, must, nes_bits, snes_bits,
    unplugged_bits,
};
use snes_pad_protocol::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

struct Rig {
    decoder: ControllerDecoder,
    io: SimulatedIo,
    clock: ManualClock,
}

impl Rig {
    fn new(config: ProtocolConfig) -> Result<Self, ProtocolConfigError> {
        init_test_tracing();
        let decoder = ControllerDecoder::new(config)?;
        let mut io = SimulatedIo::new();
        decoder.init(&mut io);
        let pins = config.pins;
        io.attach_controller(pins.latch, pins.clock, pins.data);
        Ok(Self {
            decoder,
            io,
            clock: ManualClock::new(),
        })
    }

    fn poll(&mut self, bits: Vec<bool>, fire_reversed: bool) -> PollResult {
        self.io.set_controller_bits(bits);
        self.decoder.poll(&mut self.io, &mut self.clock, fire_reversed)
    }
}

mod controller_detection_scenarios {
    use super::*;

    /// Scenario: An NES pad is recognised from its trailing bits
    #[test]
    fn scenario_nes_pad_detected() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let result = rig.poll(nes_bits(&[NesButton::B, NesButton::Up]), false);

        assert_eq!(result.mode, DeviceMode::Nes);
        assert!(result.input.fire1);
        assert!(result.input.up);
        assert!(!result.input.fire2);
        Ok(())
    }

    /// Scenario: An idle NES pad still decodes to idle input
    #[test]
    fn scenario_idle_nes_pad() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let result = rig.poll(nes_bits(&[]), false);

        assert_eq!(result.mode, DeviceMode::Nes);
        assert!(result.input.is_idle());
        Ok(())
    }

    /// Scenario: An SNES pad maps B and A to the two fire buttons
    #[test]
    fn scenario_snes_pad_fire_buttons() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let result = rig.poll(snes_bits(&[SnesButton::A, SnesButton::Down]), false);

        assert_eq!(result.mode, DeviceMode::Snes);
        assert!(result.input.fire2);
        assert!(result.input.down);
        assert!(!result.input.fire1);
        Ok(())
    }

    /// Scenario: Y and X do not fire
    #[test]
    fn scenario_snes_face_buttons_unmapped() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let result = rig.poll(snes_bits(&[SnesButton::Y, SnesButton::X]), false);
        assert!(result.input.is_idle());
        Ok(())
    }

    /// Scenario: Shoulder buttons steer when configured to
    #[test]
    fn scenario_shoulders_as_directions() -> TestResult {
        let config = must(
            ProtocolConfig::builder()
                .shoulder_policy(ShoulderPolicy::Directions)
                .build(),
        );
        let mut rig = Rig::new(config)?;
        let result = rig.poll(snes_bits(&[SnesButton::R]), false);
        assert!(result.input.right);
        assert!(!result.input.left);
        Ok(())
    }

    /// Scenario: A mouse is clocked for 32 bits and motion becomes directions
    #[test]
    fn scenario_mouse_motion_to_directions() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let bits = MouseFixture::moving(-20, 9).with_buttons(true, false).bits();
        let result = rig.poll(bits, false);

        assert_eq!(result.mode, DeviceMode::SnesMouse);
        assert_eq!(result.raw.len(), 32);
        assert!(result.input.left);
        assert!(result.input.up);
        assert!(!result.input.right && !result.input.down);
        assert!(result.input.fire1);
        assert!(!result.input.fire2);

        let motion = MouseMotion::from_report(&result.raw);
        assert_eq!(motion.dx, -20);
        assert_eq!(motion.dy, 9);
        Ok(())
    }

    /// Scenario: Small mouse jitter is ignored
    #[test]
    fn scenario_mouse_jitter_ignored() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let result = rig.poll(MouseFixture::moving(1, -1).bits(), false);

        assert_eq!(result.mode, DeviceMode::SnesMouse);
        assert!(!result.input.any_direction());
        Ok(())
    }

    /// Scenario: Slow, steady mouse motion still registers
    #[test]
    fn scenario_slow_mouse_motion_accumulates() -> TestResult {
        let config = ProtocolConfig {
            mouse_threshold: 3,
            ..ProtocolConfig::default()
        };
        let mut rig = Rig::new(config)?;
        let slow_left = MouseFixture::moving(-1, 0);

        let mut lefts = 0;
        for poll in 1..=20 {
            let result = rig.poll(slow_left.bits(), false);
            assert!(!result.input.right);
            if result.input.left {
                lefts += 1;
                assert_eq!(poll % 4, 0, "left asserted on poll {poll}");
            }
        }
        assert_eq!(lefts, 5);

        rig.poll(MouseFixture::moving(-1, 0).bits(), false);
        assert_eq!(rig.decoder.pending_motion(), (-1, 0));
        let result = rig.poll(snes_bits(&[]), false);
        assert!(!result.input.left);
        assert_eq!(rig.decoder.pending_motion(), (0, 0));
        Ok(())
    }

    /// Scenario: Fire reversal swaps the mouse buttons too
    #[test]
    fn scenario_mouse_fire_reversal() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let bits = MouseFixture::new().with_buttons(false, true).bits();
        let result = rig.poll(bits, true);
        assert!(result.input.fire1);
        assert!(!result.input.fire2);
        Ok(())
    }

    /// Scenario: Unplugging the controller reads as an idle SNES pad
    #[test]
    fn scenario_unplugged_port() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;
        let result = rig.poll(unplugged_bits(), false);

        assert_eq!(result.mode, DeviceMode::Snes);
        assert!(result.input.is_idle());
        Ok(())
    }

    /// Scenario: Hot-swapping devices changes the mode on the next poll
    #[test]
    fn scenario_hot_swap() -> TestResult {
        let mut rig = Rig::new(ProtocolConfig::default())?;

        let first = rig.poll(nes_bits(&[]), false);
        assert_eq!(first.mode, DeviceMode::Nes);

        let second = rig.poll(MouseFixture::new().bits(), false);
        assert_eq!(second.mode, DeviceMode::SnesMouse);

        let third = rig.poll(snes_bits(&[SnesButton::Start]), false);
        assert_eq!(third.mode, DeviceMode::Snes);
        assert!(third.input.start);
        assert_eq!(rig.decoder.last_mode(), Some(DeviceMode::Snes));

        let pulses = rig.io.controller().map(SimulatedController::latch_pulses);
        assert_eq!(pulses, Some(3));
        Ok(())
    }
}

mod configuration_scenarios {
    use super::*;

    /// Scenario: Configuration loads from JSON with defaults filled in
    #[test]
    fn scenario_config_from_json() -> TestResult {
        let json = r#"{ "pins": { "latch": 4, "clock": 5, "data": 6 }, "mouse_threshold": 3 }"#;
        let config: ProtocolConfig = serde_json::from_str(json)?;

        assert_eq!(config.pins.latch, PinId(4));
        assert_eq!(config.mouse_threshold, 3);
        assert_eq!(config.timing, ProtocolTiming::default());
        assert_eq!(config.shoulder_policy, ShoulderPolicy::Ignore);
        config.validate()?;
        Ok(())
    }

    /// Scenario: Shoulder policy uses snake_case names
    #[test]
    fn scenario_shoulder_policy_json() -> TestResult {
        let policy: ShoulderPolicy = serde_json::from_str("\"directions\"")?;
        assert_eq!(policy, ShoulderPolicy::Directions);
        Ok(())
    }

    /// Scenario: A decoder refuses a miswired port
    #[test]
    fn scenario_duplicate_pins_rejected() {
        let config = ProtocolConfig {
            pins: ControllerPins {
                latch: PinId(7),
                clock: PinId(7),
                data: PinId(8),
            },
            ..ProtocolConfig::default()
        };
        let result = ControllerDecoder::new(config);
        assert!(matches!(
            result,
            Err(ProtocolConfigError::DuplicatePin(PinId(7)))
        ));
    }
}
