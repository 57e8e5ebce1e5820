//! Peripheral auto-detection.

use crate::report::RawReport;
use crate::{SNES_REPORT_BITS, mouse, snes};
use serde::{Deserialize, Serialize};

/// Kind of peripheral behind the serial port, re-derived on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceMode {
    Nes,
    #[default]
    Snes,
    SnesMouse,
}

impl DeviceMode {
    /// Classify a report.
    ///
    /// The mouse signature wins over everything else. Otherwise an NES pad
    /// is recognised by its extension bits all reading pressed: the NES
    /// shift register keeps presenting low once its eight buttons are out.
    /// Anything else, including an unplugged port, is treated as SNES.
    #[must_use]
    pub fn classify(raw: &RawReport) -> Self {
        if has_mouse_signature(raw) {
            Self::SnesMouse
        } else if raw.all_pressed(snes::EXTENSION_START, snes::EXTENSION_BITS) {
            Self::Nes
        } else {
            Self::Snes
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nes => "NES",
            Self::Snes => "SNES",
            Self::SnesMouse => "SNES mouse",
        }
    }
}

impl core::fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when bits 12..16 carry the mouse signature.
#[must_use]
pub fn has_mouse_signature(raw: &RawReport) -> bool {
    raw.len() >= SNES_REPORT_BITS
        && mouse::SIGNATURE
            .iter()
            .enumerate()
            .all(|(offset, &expected)| raw.bit(mouse::SIGNATURE_START + offset) == expected)
}
