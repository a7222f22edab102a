//! Keycodes and key chords.

use core::fmt;

/// Number of non-modifier key slots in a boot-protocol keyboard report.
pub const REPORT_KEY_SLOTS: usize = 6;

/// Largest possible chord: all eight modifiers plus a full set of key slots.
pub const MAX_CHORD_LEN: usize = 8 + REPORT_KEY_SLOTS;

/// A USB HID keyboard usage id (usage page 0x07).
///
/// Treated as an opaque value by the emitter. Only the report encoder looks
/// inside it, to tell modifiers apart from ordinary keys.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Keycode(pub u8);

impl Keycode {
    /// Reserved usage, "no key".
    pub const NONE: Self = Self(0x00);

    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);

    pub const NUM_1: Self = Self(0x1E);
    pub const NUM_2: Self = Self(0x1F);
    pub const NUM_3: Self = Self(0x20);
    pub const NUM_4: Self = Self(0x21);
    pub const NUM_5: Self = Self(0x22);
    pub const NUM_6: Self = Self(0x23);
    pub const NUM_7: Self = Self(0x24);
    pub const NUM_8: Self = Self(0x25);
    pub const NUM_9: Self = Self(0x26);
    pub const NUM_0: Self = Self(0x27);

    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const BACKSPACE: Self = Self(0x2A);
    pub const TAB: Self = Self(0x2B);
    pub const SPACE: Self = Self(0x2C);

    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F6: Self = Self(0x3F);
    pub const F7: Self = Self(0x40);
    pub const F8: Self = Self(0x41);
    pub const F9: Self = Self(0x42);
    pub const F10: Self = Self(0x43);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);

    pub const RIGHT_ARROW: Self = Self(0x4F);
    pub const LEFT_ARROW: Self = Self(0x50);
    pub const DOWN_ARROW: Self = Self(0x51);
    pub const UP_ARROW: Self = Self(0x52);

    // Modifiers (0xE0..=0xE7), one report bit each
    pub const LEFT_CTRL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_GUI: Self = Self(0xE3);
    pub const RIGHT_CTRL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_GUI: Self = Self(0xE7);

    pub const CONTROL: Self = Self::LEFT_CTRL;
    pub const SHIFT: Self = Self::LEFT_SHIFT;
    pub const OPTION: Self = Self::LEFT_ALT;
    pub const ALT: Self = Self::LEFT_ALT;
    pub const COMMAND: Self = Self::LEFT_GUI;
    pub const GUI: Self = Self::LEFT_GUI;

    /// Raw usage id.
    #[inline]
    #[must_use]
    pub const fn usage(self) -> u8 {
        self.0
    }

    /// Check if this is one of the eight modifier keys.
    #[inline]
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        self.0 >= 0xE0 && self.0 <= 0xE7
    }

    /// Bit of this modifier in the report's modifier byte, or 0 for other keys.
    #[inline]
    #[must_use]
    pub const fn modifier_bit(self) -> u8 {
        if self.is_modifier() {
            1 << (self.0 - 0xE0)
        } else {
            0
        }
    }
}

/// Error returned when a key chord cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChordError {
    /// A chord needs at least one key.
    Empty,
    /// More non-modifier keys than a boot report can carry.
    TooManyKeys,
    /// The same key appears twice.
    Duplicate,
    /// `Keycode::NONE` is not a key.
    Reserved,
}

impl fmt::Display for ChordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordError::Empty => f.write_str("chord has no keys"),
            ChordError::TooManyKeys => write!(
                f,
                "chord has more than {} non-modifier keys",
                REPORT_KEY_SLOTS
            ),
            ChordError::Duplicate => f.write_str("chord repeats a key"),
            ChordError::Reserved => f.write_str("chord contains the reserved keycode 0"),
        }
    }
}

/// An immutable set of keys pressed together and released together.
///
/// Keys keep the order they were given in; the order only affects the slot
/// layout of the HID report, not what the host sees.
///
/// # Example
///
/// ```
/// use shortcut_pad_core::{chord, Keycode};
///
/// let raise_hand = chord![Keycode::CONTROL, Keycode::COMMAND, Keycode::H];
/// assert_eq!(raise_hand.len(), 3);
/// assert!(raise_hand.contains(Keycode::H));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyChord {
    keys: [Keycode; MAX_CHORD_LEN],
    len: u8,
}

impl KeyChord {
    /// Build a chord from a slice of keys.
    ///
    /// Usable in const context, see [`chord!`](crate::chord).
    pub const fn new(keys: &[Keycode]) -> Result<Self, ChordError> {
        if keys.is_empty() {
            return Err(ChordError::Empty);
        }

        let mut stored = [Keycode::NONE; MAX_CHORD_LEN];
        let mut regular = 0;
        let mut i = 0;
        while i < keys.len() {
            let key = keys[i];
            if key.0 == Keycode::NONE.0 {
                return Err(ChordError::Reserved);
            }

            let mut j = 0;
            while j < i {
                if keys[j].0 == key.0 {
                    return Err(ChordError::Duplicate);
                }
                j += 1;
            }

            if !key.is_modifier() {
                regular += 1;
                if regular > REPORT_KEY_SLOTS {
                    return Err(ChordError::TooManyKeys);
                }
            }

            // Unique modifiers plus at most six keys always fit
            stored[i] = key;
            i += 1;
        }

        Ok(Self {
            keys: stored,
            len: keys.len() as u8,
        })
    }

    /// Keys in the order they were given.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[Keycode] {
        &self.keys[..self.len as usize]
    }

    /// Number of keys in the chord (never zero).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false`; chords are non-empty by construction.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the chord contains the given key.
    #[must_use]
    pub fn contains(&self, key: Keycode) -> bool {
        self.keys().contains(&key)
    }

    /// Modifier bitfield of the chord.
    #[must_use]
    pub fn modifiers(&self) -> u8 {
        self.keys()
            .iter()
            .fold(0, |bits, key| bits | key.modifier_bit())
    }

    /// Non-modifier keys, in order.
    pub fn regular_keys(&self) -> impl Iterator<Item = Keycode> + '_ {
        self.keys().iter().copied().filter(|key| !key.is_modifier())
    }
}

/// Build a [`KeyChord`] at compile time.
///
/// An invalid chord (empty, duplicated key, too many keys) is a compile
/// error rather than a runtime failure.
#[macro_export]
macro_rules! chord {
    ($($key:expr),+ $(,)?) => {
        const {
            match $crate::KeyChord::new(&[$($key),+]) {
                Ok(chord) => chord,
                Err(_) => panic!("invalid key chord"),
            }
        }
    };
}
