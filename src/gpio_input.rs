//! RP2040 GPIO buttons.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use shortcut_pad_core::InputLine;

/// A button line backed by an RP2040 GPIO input.
pub type ButtonLine<'d> = InputLine<Input<'d>>;

/// Configure `pin` as an active-low button input.
///
/// Enables the internal pull-up so the line idles high and a press pulls
/// it to ground, and the Schmitt trigger to take the edge off contact
/// bounce. This is the only place the pin's direction and pull are set.
pub fn pull_up_line<'d>(pin: Peri<'d, impl Pin>) -> ButtonLine<'d> {
    let mut input = Input::new(pin, Pull::Up);
    input.set_schmitt(true);
    InputLine::new(input)
}
