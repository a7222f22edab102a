//! Active-low button input lines.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

/// One physical button wired active-low.
///
/// The pin must already be configured as an input with pull-up enabled, so
/// the idle line reads high and a press pulls it low. That configuration is
/// done once, by whoever turns the board pin into `P`, and `InputLine` never
/// touches it again.
///
/// There is no debounce filter on the press edge: a single low sample counts
/// as a press. Re-triggering is prevented by [`wait_for_release`] and by the
/// emitter's hold time.
///
/// [`wait_for_release`]: InputLine::wait_for_release
pub struct InputLine<P> {
    pin: P,
}

impl<P: InputPin> InputLine<P> {
    /// Wrap a pin configured as input with pull-up.
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Check if the button is currently held (line reads low).
    ///
    /// A failed read counts as not pressed.
    #[inline]
    pub fn is_pressed(&mut self) -> bool {
        matches!(self.pin.is_low(), Ok(true))
    }

    /// Wait until the button reads released, sampling every `poll_interval_ms`.
    ///
    /// No timeout: the wait lasts as long as the button reads pressed. A
    /// failed read counts as released (see [`is_pressed`]), so a pin that
    /// reports errors ends the wait early.
    ///
    /// [`is_pressed`]: InputLine::is_pressed
    pub async fn wait_for_release<D: DelayNs>(&mut self, delay: &mut D, poll_interval_ms: u32) {
        while self.is_pressed() {
            delay.delay_ms(poll_interval_ms).await;
        }
    }

    /// Give the pin back.
    pub fn into_inner(self) -> P {
        self.pin
    }
}
