//! Wire-level bit sequences for simulated controllers.
//!
//! Every sequence uses the pressed convention: `true` means the data line
//! is held low for that clock.

/// Buttons of an NES pad, in shift order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NesButton {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl NesButton {
    #[must_use]
    pub fn wire_index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::Select => 2,
            Self::Start => 3,
            Self::Up => 4,
            Self::Down => 5,
            Self::Left => 6,
            Self::Right => 7,
        }
    }
}

/// Buttons of an SNES pad, in shift order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnesButton {
    B,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
}

impl SnesButton {
    #[must_use]
    pub fn wire_index(self) -> usize {
        match self {
            Self::B => 0,
            Self::Y => 1,
            Self::Select => 2,
            Self::Start => 3,
            Self::Up => 4,
            Self::Down => 5,
            Self::Left => 6,
            Self::Right => 7,
            Self::A => 8,
            Self::X => 9,
            Self::L => 10,
            Self::R => 11,
        }
    }
}

/// Sixteen clocks from an NES pad. Past its eight buttons the 4021 shift
/// register keeps shifting in ground, which reads as pressed.
#[must_use]
pub fn nes_bits(pressed: &[NesButton]) -> Vec<bool> {
    let mut bits = vec![false; 8];
    bits.extend([true; 8]);
    for button in pressed {
        if let Some(bit) = bits.get_mut(button.wire_index()) {
            *bit = true;
        }
    }
    bits
}

/// Sixteen clocks from an SNES pad; the signature nibble reads released.
#[must_use]
pub fn snes_bits(pressed: &[SnesButton]) -> Vec<bool> {
    let mut bits = vec![false; 16];
    for button in pressed {
        if let Some(bit) = bits.get_mut(button.wire_index()) {
            *bit = true;
        }
    }
    bits
}

/// An unplugged port: nothing drives the data line.
#[must_use]
pub fn unplugged_bits() -> Vec<bool> {
    Vec::new()
}

/// One SNES mouse report.
///
/// `dx` grows to the right and `dy` grows upward; magnitudes are clamped to
/// the 7-bit wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseFixture {
    pub left_button: bool,
    pub right_button: bool,
    pub sensitivity: u8,
    pub dx: i8,
    pub dy: i8,
}

impl MouseFixture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn moving(dx: i8, dy: i8) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_buttons(mut self, left: bool, right: bool) -> Self {
        self.left_button = left;
        self.right_button = right;
        self
    }

    /// The 32 clocks the mouse shifts out.
    #[must_use]
    pub fn bits(&self) -> Vec<bool> {
        let mut bits = vec![false; 32];
        bits[8] = self.right_button;
        bits[9] = self.left_button;
        bits[10] = self.sensitivity & 0b10 != 0;
        bits[11] = self.sensitivity & 0b01 != 0;
        // signature 0001
        bits[15] = true;
        bits[16] = self.dy > 0;
        write_magnitude(&mut bits[17..24], self.dy.unsigned_abs());
        bits[24] = self.dx < 0;
        write_magnitude(&mut bits[25..32], self.dx.unsigned_abs());
        bits
    }
}

fn write_magnitude(field: &mut [bool], magnitude: u8) {
    let magnitude = magnitude.min(0x7F);
    let width = field.len();
    for (offset, bit) in field.iter_mut().enumerate() {
        *bit = magnitude & (1 << (width - 1 - offset)) != 0;
    }
}
