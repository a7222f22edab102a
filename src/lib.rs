//! Meeting shortcut pad for RP2040.
//!
//! This crate provides the embedded side of a four-button shortcut pad:
//! GPIO buttons read through [`gpio_input`], key chords sent to the host as
//! a USB HID boot keyboard through [`usb_output`]. The scan loop itself
//! lives in `shortcut-pad-core`.
//!
//! | Pin  | Shortcut               | Chord                  |
//! |------|------------------------|------------------------|
//! | GP15 | Mute microphone        | COMMAND + D            |
//! | GP14 | Toggle camera          | COMMAND + E            |
//! | GP16 | Raise hand             | CONTROL + COMMAND + H  |
//! | GP17 | Close tab              | COMMAND + W            |

#![no_std]

// Re-export core types for convenience
pub use shortcut_pad_core::{
    chord, Binding, BindingState, BootKeyboardReport, Cancel, EmitError, EmitterConfig,
    HidKeyboard, InputLine, KeyChord, Keycode, Never, RetryPolicy, ShortcutEmitter,
    TransportError, HOLD_MS, POLL_INTERVAL_MS,
};

pub mod config;
pub mod gpio_input;
pub mod usb_output;

pub use gpio_input::{pull_up_line, ButtonLine};
pub use usb_output::{configure_usb_hid, KeyboardRequestHandler, KeyboardWriter, UsbHidKeyboard};

/// The emitter as wired on the board: GPIO buttons, a borrowed USB
/// keyboard and the embassy timer.
pub type ShortcutPad = ShortcutEmitter<
    embassy_rp::gpio::Input<'static>,
    &'static mut UsbHidKeyboard<'static>,
    embassy_time::Delay,
    { config::BINDING_COUNT },
>;
