//! HID keyboard transport trait and error types.

use core::fmt;
use core::future::Future;

use crate::keycode::KeyChord;

/// Error type for HID transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Device not ready (e.g., USB not enumerated or bus suspended).
    NotReady,
    /// Endpoint busy with a previous report.
    Busy,
    /// Generic I/O error on the link.
    Io,
    /// Transport is gone and will not come back without a reset.
    Unavailable,
    /// Report does not fit the endpoint.
    ReportTooLarge,
}

impl TransportError {
    /// Whether the same call may succeed if tried again later.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(
            self,
            TransportError::NotReady | TransportError::Busy | TransportError::Io
        )
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotReady => f.write_str("HID device not ready"),
            TransportError::Busy => f.write_str("HID endpoint busy"),
            TransportError::Io => f.write_str("HID I/O error"),
            TransportError::Unavailable => f.write_str("HID transport unavailable"),
            TransportError::ReportTooLarge => f.write_str("HID report too large for endpoint"),
        }
    }
}

/// Async trait for HID keyboard transports.
///
/// Both operations are fire-and-forget from the caller's point of view:
/// `Ok` means the report was handed to the transport, not that the host
/// acted on it.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait HidKeyboard {
    /// Report every key of `chord` as held.
    fn press(&mut self, chord: &KeyChord) -> impl Future<Output = Result<(), TransportError>>;

    /// Report every key as released.
    fn release_all(&mut self) -> impl Future<Output = Result<(), TransportError>>;

    /// Check if the transport is ready to accept reports.
    fn is_ready(&self) -> bool;
}

/// Lets an emitter drive a transport it only borrows.
impl<T: HidKeyboard + ?Sized> HidKeyboard for &mut T {
    fn press(&mut self, chord: &KeyChord) -> impl Future<Output = Result<(), TransportError>> {
        (**self).press(chord)
    }

    fn release_all(&mut self) -> impl Future<Output = Result<(), TransportError>> {
        (**self).release_all()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
