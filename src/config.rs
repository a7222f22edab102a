//! Board-wide constants and compile-time configuration.
//!
//! Pin assignments, USB identity and the shortcut table live here so they
//! can be changed in one place. Timings come from [`shortcut_pad_core::config`].

use shortcut_pad_core::{chord, EmitterConfig, KeyChord, Keycode, RetryPolicy};

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "Rust Shortcut Pad";
pub const USB_PRODUCT: &str = "Meeting Shortcut Pad";
pub const USB_SERIAL_NUMBER: &str = "001";

/// Bus power requested from the host (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Boot keyboard endpoint size; one report per packet.
pub const USB_HID_PACKET_SIZE: u16 = 8;

// Buttons (Raspberry Pi Pico)
//
// Each button shorts its GPIO to ground; the internal pull-up holds the
// line high otherwise. Pins are taken in `main.rs`, in scan order:
//
//   Mute microphone  → GP15
//   Toggle camera    → GP14
//   Raise hand       → GP16
//   Close tab        → GP17

/// Number of buttons, which is also the scan length.
pub const BINDING_COUNT: usize = 4;

/// Mute / unmute the microphone.
pub const MUTE_MICROPHONE: KeyChord = chord![Keycode::COMMAND, Keycode::D];

/// Turn the camera on / off.
pub const TOGGLE_CAMERA: KeyChord = chord![Keycode::COMMAND, Keycode::E];

/// Raise / lower hand.
pub const RAISE_HAND: KeyChord = chord![Keycode::CONTROL, Keycode::COMMAND, Keycode::H];

/// Close the current tab.
pub const CLOSE_TAB: KeyChord = chord![Keycode::COMMAND, Keycode::W];

/// Emitter timings: default poll and hold, three attempts per report.
pub const EMITTER_CONFIG: EmitterConfig = EmitterConfig::new().retry(RetryPolicy::attempts(3));
