//! Cancellation tokens for the scan loop.

use core::sync::atomic::{AtomicBool, Ordering};

/// Checked by [`ShortcutEmitter::run_until`](crate::ShortcutEmitter::run_until)
/// between scan passes.
pub trait Cancel {
    /// Returns `true` once the loop should stop.
    fn is_cancelled(&self) -> bool;
}

/// Token that never cancels. Used by the production loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancel for Never {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancel for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: Cancel + ?Sized> Cancel for &C {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
