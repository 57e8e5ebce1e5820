//! Raw bit sequence read off the data line.

use crate::MOUSE_REPORT_BITS;

/// Bits sampled during one poll, in wire order, already inverted so that
/// `true` means pressed (data line low).
///
/// Bits past [`RawReport::len`] read as released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RawReport {
    bits: u32,
    len: u8,
}

impl RawReport {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Build a report from packed bits, bit 0 being the first sampled.
    #[must_use]
    pub fn from_bits(bits: u32, len: usize) -> Self {
        let len = len.min(MOUSE_REPORT_BITS);
        let mask = if len >= MOUSE_REPORT_BITS {
            u32::MAX
        } else {
            (1u32 << len) - 1
        };
        Self {
            bits: bits & mask,
            len: u8::try_from(len).unwrap_or(u8::MAX),
        }
    }

    /// Build a report from a pressed-convention sequence. Anything past 32
    /// bits is dropped.
    #[must_use]
    pub fn from_pressed(pressed: &[bool]) -> Self {
        let mut report = Self::new();
        for &bit in pressed {
            if !report.push(bit) {
                break;
            }
        }
        report
    }

    /// Append one sampled bit. Returns `false` when the report is full.
    pub fn push(&mut self, pressed: bool) -> bool {
        let index = usize::from(self.len);
        if index >= MOUSE_REPORT_BITS {
            return false;
        }
        if pressed {
            self.bits |= 1 << index;
        }
        self.len += 1;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[must_use]
    pub fn bit(&self, index: usize) -> bool {
        index < self.len() && (self.bits >> index) & 1 != 0
    }

    /// Read `width` consecutive bits starting at `start`, first bit most
    /// significant.
    #[must_use]
    pub fn field(&self, start: usize, width: usize) -> u32 {
        (start..start.saturating_add(width))
            .fold(0, |acc, index| (acc << 1) | u32::from(self.bit(index)))
    }

    /// True when every bit in `start..start + width` is pressed.
    #[must_use]
    pub fn all_pressed(&self, start: usize, width: usize) -> bool {
        (start..start.saturating_add(width)).all(|index| self.bit(index))
    }

    #[must_use]
    pub fn pressed_count(&self) -> usize {
        self.bits.count_ones() as usize
    }
}
