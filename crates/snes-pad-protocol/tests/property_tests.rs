//! Property-based tests for report classification and decoding.

use joybridge_test_helpers::{MouseFixture, NesButton, nes_bits};
use proptest::prelude::*;
use snes_pad_protocol::prelude::*;

fn nes_button() -> impl Strategy<Value = NesButton> {
    prop_oneof![
        Just(NesButton::A),
        Just(NesButton::B),
        Just(NesButton::Select),
        Just(NesButton::Start),
        Just(NesButton::Up),
        Just(NesButton::Down),
        Just(NesButton::Left),
        Just(NesButton::Right),
    ]
}

fn options(fire_reversed: bool, mouse_threshold: u8) -> DecodeOptions {
    DecodeOptions {
        fire_reversed,
        shoulder_policy: ShoulderPolicy::Ignore,
        mouse_threshold,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any report whose four extension bits read pressed and which lacks the
    /// mouse signature is an NES pad.
    #[test]
    fn prop_extension_bits_mean_nes(low in 0u32..0x100, high in 0u32..0x10) {
        let bits = low | (0xF << 8) | (high << 12);
        let raw = RawReport::from_bits(bits, 16);
        prop_assume!(!has_mouse_signature(&raw));
        prop_assert_eq!(DeviceMode::classify(&raw), DeviceMode::Nes);
    }

    /// The mouse signature wins regardless of the other bits.
    #[test]
    fn prop_signature_means_mouse(bits in any::<u32>()) {
        let bits = (bits & !(0xF << 12)) | (0b1000 << 12);
        let raw = RawReport::from_bits(bits, 32);
        prop_assert_eq!(DeviceMode::classify(&raw), DeviceMode::SnesMouse);
    }

    /// NES fixtures decode back to the pressed buttons.
    #[test]
    fn prop_nes_buttons_round_trip(
        pressed in proptest::collection::vec(nes_button(), 0..8),
    ) {
        let raw = RawReport::from_pressed(&nes_bits(&pressed));
        let (mode, input) = decode(&raw, &options(false, 1));
        prop_assert_eq!(mode, DeviceMode::Nes);
        prop_assert_eq!(input.fire1, pressed.contains(&NesButton::B));
        prop_assert_eq!(input.fire2, pressed.contains(&NesButton::A));
        prop_assert_eq!(input.up, pressed.contains(&NesButton::Up));
        prop_assert_eq!(input.start, pressed.contains(&NesButton::Start));
    }

    /// Reversal is a pure swap of the two fire outputs.
    #[test]
    fn prop_reversal_swaps_fire(bits in any::<u32>(), len in 0usize..=32) {
        let raw = RawReport::from_bits(bits, len);
        let (_, straight) = decode(&raw, &options(false, 1));
        let (_, reversed) = decode(&raw, &options(true, 1));
        prop_assert_eq!(straight.fire1, reversed.fire2);
        prop_assert_eq!(straight.fire2, reversed.fire1);
        prop_assert_eq!(straight.up, reversed.up);
        prop_assert_eq!(straight.left, reversed.left);
    }

    /// A mouse axis asserts a direction exactly when its magnitude is above
    /// the threshold, and never both directions of one axis.
    #[test]
    fn prop_mouse_threshold(
        dx in -127i8..=127,
        dy in -127i8..=127,
        threshold in 0u8..127,
    ) {
        let raw = RawReport::from_pressed(&MouseFixture::moving(dx, dy).bits());
        let (mode, input) = decode(&raw, &options(false, threshold));
        prop_assert_eq!(mode, DeviceMode::SnesMouse);

        prop_assert_eq!(input.left, dx.unsigned_abs() > threshold && dx < 0);
        prop_assert_eq!(input.right, dx.unsigned_abs() > threshold && dx > 0);
        prop_assert_eq!(input.up, dy.unsigned_abs() > threshold && dy > 0);
        prop_assert_eq!(input.down, dy.unsigned_abs() > threshold && dy < 0);
        prop_assert!(!(input.left && input.right));
        prop_assert!(!(input.up && input.down));
        prop_assert!(!input.start && !input.select);
    }

    /// With nothing pending, the accumulator agrees with a single decode.
    #[test]
    fn prop_fresh_accumulator_matches_decode(
        dx in -127i8..=127,
        dy in -127i8..=127,
        threshold in 0u8..127,
    ) {
        let raw = RawReport::from_pressed(&MouseFixture::moving(dx, dy).bits());
        let (_, expected) = decode(&raw, &options(false, threshold));

        let motion = MouseMotion::from_report(&raw);
        let mut input = expected;
        MouseAccumulator::default().apply(&motion, threshold, &mut input);
        prop_assert_eq!(input, expected);
    }

    /// Motion held in one direction asserts that direction within
    /// `threshold + 1` polls, and never the opposite one.
    #[test]
    fn prop_steady_motion_registers(
        step in 1i8..=127,
        threshold in 0u8..127,
        left in any::<bool>(),
    ) {
        let dx = if left { -step } else { step };
        let motion = MouseMotion { dx, ..MouseMotion::default() };
        let mut pending = MouseAccumulator::default();
        let mut seen = false;
        for _ in 0..=threshold {
            let mut input = LogicalInput::IDLE;
            pending.apply(&motion, threshold, &mut input);
            prop_assert!(!(input.left && input.right));
            let no_opposite = if left { !input.right } else { !input.left };
            prop_assert!(no_opposite);
            seen |= input.left || input.right;
        }
        prop_assert!(seen);
    }

    /// Decoding is total: any report produces some mode without panicking.
    #[test]
    fn prop_decode_is_total(bits in any::<u32>(), len in 0usize..=40) {
        let raw = RawReport::from_bits(bits, len);
        prop_assert!(raw.len() <= 32);
        let (mode, input) = decode(&raw, &options(false, 1));
        if mode == DeviceMode::SnesMouse {
            prop_assert!(!input.start && !input.select);
        }
    }
}
