//! Logical joystick signals derived from a raw report.

use crate::mode::DeviceMode;
use crate::report::RawReport;
use crate::{mouse, nes, snes};
use serde::{Deserialize, Serialize};

/// What the SNES shoulder buttons do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoulderPolicy {
    /// L and R are not mapped.
    #[default]
    Ignore,
    /// L is OR'd into Left and R into Right.
    Directions,
}

/// Knobs that shape logical decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Swap Fire1 and Fire2 in every device mode.
    pub fire_reversed: bool,
    pub shoulder_policy: ShoulderPolicy,
    /// Mouse motion must be strictly above this magnitude to assert a
    /// direction.
    pub mouse_threshold: u8,
}

/// Joystick-level view of the controller.
///
/// Start and Select never reach the joystick port; they only feed the
/// gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire1: bool,
    pub fire2: bool,
    pub start: bool,
    pub select: bool,
}

impl LogicalInput {
    pub const IDLE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
        fire1: false,
        fire2: false,
        start: false,
        select: false,
    };

    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    #[must_use]
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    #[must_use]
    pub fn any_fire(&self) -> bool {
        self.fire1 || self.fire2
    }
}

/// Relative motion reported by an SNES mouse since its previous latch.
///
/// `dx` grows to the right, `dy` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MouseMotion {
    pub dx: i8,
    pub dy: i8,
    pub sensitivity: u8,
    pub left_button: bool,
    pub right_button: bool,
}

impl MouseMotion {
    #[must_use]
    pub fn from_report(raw: &RawReport) -> Self {
        let magnitude = |start: usize| -> i8 {
            // a 7-bit field always fits
            i8::try_from(raw.field(start, mouse::MAGNITUDE_BITS)).unwrap_or(i8::MAX)
        };
        let signed = |negative: bool, value: i8| if negative { -value } else { value };

        let y = magnitude(mouse::Y_MAGNITUDE_START);
        let x = magnitude(mouse::X_MAGNITUDE_START);
        Self {
            dx: signed(raw.bit(mouse::X_DIRECTION), x),
            dy: signed(!raw.bit(mouse::Y_DIRECTION), y),
            sensitivity: u8::try_from(
                raw.field(mouse::SENSITIVITY_START, mouse::SENSITIVITY_BITS),
            )
            .unwrap_or(0),
            left_button: raw.bit(mouse::LEFT_BUTTON),
            right_button: raw.bit(mouse::RIGHT_BUTTON),
        }
    }

    fn exceeds(value: i8, threshold: u8) -> bool {
        value.unsigned_abs() > threshold
    }
}

/// Running per-axis motion that has not yet produced a direction.
///
/// A mouse moved slowly reports a small delta on every latch, each one at or
/// below the threshold. Summing deltas of one sign lets that motion register
/// once the total is strictly above the threshold. An axis restarts from zero
/// when its sign flips and after it asserts a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseAccumulator {
    x: i16,
    y: i16,
}

impl MouseAccumulator {
    #[must_use]
    pub fn pending(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold `motion` in and overwrite the directions of `input`.
    pub fn apply(&mut self, motion: &MouseMotion, threshold: u8, input: &mut LogicalInput) {
        let horizontal = Self::step(&mut self.x, motion.dx, threshold);
        let vertical = Self::step(&mut self.y, motion.dy, threshold);
        input.left = horizontal < 0;
        input.right = horizontal > 0;
        input.up = vertical > 0;
        input.down = vertical < 0;
    }

    /// Returns the sign of the direction asserted on this axis, or 0.
    fn step(axis: &mut i16, delta: i8, threshold: u8) -> i16 {
        let delta = i16::from(delta);
        if delta.signum() * axis.signum() < 0 {
            *axis = 0;
        }
        *axis += delta;
        if axis.unsigned_abs() > u16::from(threshold) {
            let sign = axis.signum();
            *axis = 0;
            sign
        } else {
            0
        }
    }
}

/// Classify `raw` and derive the logical joystick signals.
///
/// Mouse directions come from this report's motion alone, as if no motion
/// were pending; [`MouseAccumulator`] carries motion across polls.
#[must_use]
pub fn decode(raw: &RawReport, options: &DecodeOptions) -> (DeviceMode, LogicalInput) {
    let mode = DeviceMode::classify(raw);
    let mut input = match mode {
        DeviceMode::Nes => decode_nes(raw),
        DeviceMode::Snes => decode_snes(raw, options.shoulder_policy),
        DeviceMode::SnesMouse => decode_mouse(raw, options.mouse_threshold),
    };
    if options.fire_reversed {
        core::mem::swap(&mut input.fire1, &mut input.fire2);
    }
    (mode, input)
}

fn decode_nes(raw: &RawReport) -> LogicalInput {
    LogicalInput {
        up: raw.bit(nes::UP),
        down: raw.bit(nes::DOWN),
        left: raw.bit(nes::LEFT),
        right: raw.bit(nes::RIGHT),
        fire1: raw.bit(nes::B),
        fire2: raw.bit(nes::A),
        start: raw.bit(nes::START),
        select: raw.bit(nes::SELECT),
    }
}

fn decode_snes(raw: &RawReport, policy: ShoulderPolicy) -> LogicalInput {
    let shoulders = policy == ShoulderPolicy::Directions;
    LogicalInput {
        up: raw.bit(snes::UP),
        down: raw.bit(snes::DOWN),
        left: raw.bit(snes::LEFT) || (shoulders && raw.bit(snes::L)),
        right: raw.bit(snes::RIGHT) || (shoulders && raw.bit(snes::R)),
        fire1: raw.bit(snes::B),
        fire2: raw.bit(snes::A),
        start: raw.bit(snes::START),
        select: raw.bit(snes::SELECT),
    }
}

fn decode_mouse(raw: &RawReport, threshold: u8) -> LogicalInput {
    let motion = MouseMotion::from_report(raw);
    let horizontal = MouseMotion::exceeds(motion.dx, threshold);
    let vertical = MouseMotion::exceeds(motion.dy, threshold);
    LogicalInput {
        up: vertical && motion.dy > 0,
        down: vertical && motion.dy < 0,
        left: horizontal && motion.dx < 0,
        right: horizontal && motion.dx > 0,
        fire1: motion.left_button,
        fire2: motion.right_button,
        start: false,
        select: false,
    }
}
