//! Boot-protocol keyboard report encoding.
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0:   Modifier bitfield (bit 0 = Left Ctrl .. bit 7 = Right GUI)
//! Byte 1:   Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneously held key usage ids
//! ```

use crate::keycode::{KeyChord, REPORT_KEY_SLOTS};

/// USB HID boot-protocol keyboard input report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootKeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00).
    pub reserved: u8,
    /// Held key usage ids, zero-padded.
    pub keycodes: [u8; REPORT_KEY_SLOTS],
}

impl BootKeyboardReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Report with every key released.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; REPORT_KEY_SLOTS],
        }
    }

    /// Report holding every key of the chord at once.
    #[must_use]
    pub fn from_chord(chord: &KeyChord) -> Self {
        let mut report = Self::released();
        report.modifier = chord.modifiers();
        // KeyChord guarantees at most REPORT_KEY_SLOTS regular keys
        for (slot, key) in report.keycodes.iter_mut().zip(chord.regular_keys()) {
            *slot = key.usage();
        }
        report
    }

    /// Returns `true` if no key or modifier is held.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let k = &self.keycodes;
        [
            self.modifier,
            self.reserved,
            k[0],
            k[1],
            k[2],
            k[3],
            k[4],
            k[5],
        ]
    }
}

impl From<&KeyChord> for BootKeyboardReport {
    fn from(chord: &KeyChord) -> Self {
        Self::from_chord(chord)
    }
}
