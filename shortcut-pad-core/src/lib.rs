//! Platform-agnostic button scanning and HID shortcut emission.
//!
//! This crate holds the control loop of a shortcut pad: a few push buttons,
//! each bound to a keyboard chord that is sent to the host over USB HID when
//! the button is pressed. It has no board or USB dependencies and runs the
//! same on the target and on the host for testing.
//!
//! # Overview
//!
//! - [`input`]: Active-low button lines ([`InputLine`])
//! - [`output`]: HID keyboard transport trait ([`HidKeyboard`])
//! - [`emitter`]: The scan loop ([`ShortcutEmitter`], [`Binding`])
//! - [`keycode`]: Keycodes and chords ([`Keycode`], [`KeyChord`], [`chord!`])
//! - [`report`]: Boot-protocol report encoding ([`BootKeyboardReport`])
//! - [`config`]: Timings and retry policy ([`EmitterConfig`])
//! - [`cancel`]: Loop cancellation ([`Cancel`], [`Never`])
//!
//! # Timing
//!
//! Buttons are sampled every [`POLL_INTERVAL_MS`]. A pressed button sends its
//! chord, holds it for [`HOLD_MS`], releases it, then blocks the scan until
//! the button reads released again.
//!
//! ```text
//! pin    ‾‾‾‾|______________________________|‾‾‾‾‾‾
//! keys       [press]--- HOLD_MS ---[release]
//! scan   ....|  blocked until release  ......|.......
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log and format via defmt (for embedded logging)
//! - **`log`**: Log via the `log` facade instead
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to the other modules
mod fmt;

pub mod cancel;
pub mod config;
pub mod emitter;
pub mod input;
pub mod keycode;
pub mod output;
pub mod report;

#[cfg(test)]
mod sim;

// Re-export main types at crate root
pub use cancel::{Cancel, Never};
pub use config::{EmitterConfig, RetryPolicy, HOLD_MS, POLL_INTERVAL_MS};
pub use emitter::{Binding, BindingState, EmitError, ShortcutEmitter};
pub use input::InputLine;
pub use keycode::{ChordError, KeyChord, Keycode, MAX_CHORD_LEN, REPORT_KEY_SLOTS};
pub use output::{HidKeyboard, TransportError};
pub use report::BootKeyboardReport;
