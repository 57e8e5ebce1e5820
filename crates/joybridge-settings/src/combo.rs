//! Start/Select configuration gestures.
//!
//! A gesture is a special button held together with a co-button. While any
//! gesture's chord is held the cycle is suppressed, so the chord never
//! reaches the joystick port. The bound action fires once, on the cycle the
//! chord stops being satisfied.

use crate::persisted::{FireButtonId, JoyPort};
use serde::{Deserialize, Serialize};
use snes_pad_protocol::LogicalInput;
use tracing::debug;

/// Button that opens a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialButton {
    Start,
    Select,
}

impl SpecialButton {
    #[must_use]
    pub fn is_held(self, input: &LogicalInput) -> bool {
        match self {
            Self::Start => input.start,
            Self::Select => input.select,
        }
    }
}

/// Second half of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoButton {
    Up,
    Down,
    Left,
    Right,
    Fire1,
    Fire2,
    /// Either fire button.
    AnyFire,
}

impl CoButton {
    #[must_use]
    pub fn is_held(self, input: &LogicalInput) -> bool {
        match self {
            Self::Up => input.up,
            Self::Down => input.down,
            Self::Left => input.left,
            Self::Right => input.right,
            Self::Fire1 => input.fire1,
            Self::Fire2 => input.fire2,
            Self::AnyFire => input.any_fire(),
        }
    }
}

/// Settings mutation bound to a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboAction {
    ToggleAutoFire(FireButtonId),
    /// Shorten the autofire period by one step.
    AutoFireFaster,
    /// Lengthen the autofire period by one step.
    AutoFireSlower,
    SelectPort(JoyPort),
    ToggleFire2MappedToUp,
    ToggleFireReversal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboGesture {
    pub special: SpecialButton,
    pub co_button: CoButton,
    pub action: ComboAction,
    armed: bool,
}

impl ComboGesture {
    #[must_use]
    pub const fn new(special: SpecialButton, co_button: CoButton, action: ComboAction) -> Self {
        Self {
            special,
            co_button,
            action,
            armed: false,
        }
    }

    #[must_use]
    pub fn is_satisfied(&self, input: &LogicalInput) -> bool {
        self.special.is_held(input) && self.co_button.is_held(input)
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// The stock gesture table, in evaluation order.
pub const DEFAULT_GESTURES: [ComboGesture; 8] = [
    ComboGesture::new(
        SpecialButton::Start,
        CoButton::Fire1,
        ComboAction::ToggleAutoFire(FireButtonId::Fire1),
    ),
    ComboGesture::new(
        SpecialButton::Start,
        CoButton::Fire2,
        ComboAction::ToggleAutoFire(FireButtonId::Fire2),
    ),
    ComboGesture::new(SpecialButton::Start, CoButton::Up, ComboAction::AutoFireFaster),
    ComboGesture::new(SpecialButton::Start, CoButton::Down, ComboAction::AutoFireSlower),
    ComboGesture::new(
        SpecialButton::Start,
        CoButton::Left,
        ComboAction::SelectPort(JoyPort::Port0),
    ),
    ComboGesture::new(
        SpecialButton::Start,
        CoButton::Right,
        ComboAction::SelectPort(JoyPort::Port1),
    ),
    ComboGesture::new(
        SpecialButton::Select,
        CoButton::Up,
        ComboAction::ToggleFire2MappedToUp,
    ),
    ComboGesture::new(
        SpecialButton::Select,
        CoButton::AnyFire,
        ComboAction::ToggleFireReversal,
    ),
];

/// Result of evaluating the gesture table for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComboOutcome {
    /// Skip joystick output this cycle.
    pub suppress: bool,
    /// Actions whose chord was released this cycle, in table order.
    pub fired: Vec<ComboAction>,
}

/// Edge-on-release gesture state machine.
#[derive(Debug, Clone)]
pub struct ComboEngine {
    gestures: Vec<ComboGesture>,
}

impl Default for ComboEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComboEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_gestures(DEFAULT_GESTURES)
    }

    #[must_use]
    pub fn with_gestures(gestures: impl IntoIterator<Item = ComboGesture>) -> Self {
        Self {
            gestures: gestures.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn gestures(&self) -> &[ComboGesture] {
        &self.gestures
    }

    /// Walk the table in order.
    ///
    /// An armed gesture whose chord is no longer held fires and disarms. The
    /// first satisfied gesture arms and ends the walk with `suppress` set;
    /// gestures after it are left untouched until a later cycle.
    pub fn evaluate(&mut self, input: &LogicalInput) -> ComboOutcome {
        let mut outcome = ComboOutcome::default();
        for gesture in &mut self.gestures {
            if gesture.is_satisfied(input) {
                if !gesture.armed {
                    debug!(action = ?gesture.action, "Gesture armed");
                }
                gesture.armed = true;
                outcome.suppress = true;
                break;
            }
            if gesture.armed {
                gesture.armed = false;
                outcome.fired.push(gesture.action);
            }
        }
        outcome
    }
}
