//! ShortcutEmitter: scans button bindings and emits their key chords.

use core::fmt;

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::cancel::{Cancel, Never};
use crate::config::EmitterConfig;
use crate::input::InputLine;
use crate::keycode::KeyChord;
use crate::output::{HidKeyboard, TransportError};

/// Where a binding is in its press cycle.
///
/// `Idle → Emitting → AwaitingRelease → Idle`, forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindingState {
    /// Armed, waiting for a press.
    #[default]
    Idle,
    /// Chord is being pressed, held and released.
    Emitting,
    /// Chord sent, waiting for the button to come up.
    AwaitingRelease,
}

/// A button and the chord it sends.
pub struct Binding<P> {
    label: &'static str,
    line: InputLine<P>,
    chord: KeyChord,
    state: BindingState,
}

impl<P: InputPin> Binding<P> {
    /// Bind `line` to `chord`. The label only shows up in logs.
    #[must_use]
    pub fn new(label: &'static str, line: InputLine<P>, chord: KeyChord) -> Self {
        Self {
            label,
            line,
            chord,
            state: BindingState::Idle,
        }
    }

    /// Log label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The chord sent when this button is pressed.
    #[inline]
    #[must_use]
    pub fn chord(&self) -> &KeyChord {
        &self.chord
    }

    /// Current state of the press cycle.
    #[inline]
    #[must_use]
    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Decompose the binding into its input line and chord.
    pub fn into_parts(self) -> (InputLine<P>, KeyChord) {
        (self.line, self.chord)
    }
}

/// Error that stops the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmitError {
    /// Pressing the chord failed (a release was still attempted).
    Press(TransportError),
    /// Releasing the chord failed; keys may still be held on the host.
    Release(TransportError),
}

impl EmitError {
    /// The transport error behind this failure.
    #[must_use]
    pub const fn transport_error(self) -> TransportError {
        match self {
            EmitError::Press(e) | EmitError::Release(e) => e,
        }
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Press(e) => write!(f, "press failed: {}", e),
            EmitError::Release(e) => write!(f, "release failed: {}", e),
        }
    }
}

#[derive(Clone, Copy)]
enum Report<'a> {
    Press(&'a KeyChord),
    ReleaseAll,
}

/// Polls button bindings in a fixed order and sends their chords over HID.
///
/// Only one binding is ever active: once a button fires, the scan blocks
/// until that button is released, and the pass ends there. A second button
/// held at the same time is picked up on a later pass, so earlier bindings
/// win ties.
///
/// The keyboard may be owned or borrowed (`&mut K` is also a
/// [`HidKeyboard`]).
///
/// # Error Handling
///
/// Transient transport errors are retried per [`EmitterConfig::retry`],
/// pausing one poll interval between calls. Anything else ends the loop with
/// an [`EmitError`]; recovering from that is up to the caller.
pub struct ShortcutEmitter<P, K, D, const N: usize> {
    keyboard: K,
    delay: D,
    bindings: [Binding<P>; N],
    config: EmitterConfig,
}

impl<P, K, D, const N: usize> ShortcutEmitter<P, K, D, N>
where
    P: InputPin,
    K: HidKeyboard,
    D: DelayNs,
{
    /// Create an emitter with the default timings.
    pub fn new(keyboard: K, delay: D, bindings: [Binding<P>; N]) -> Self {
        Self::with_config(keyboard, delay, bindings, EmitterConfig::new())
    }

    /// Create an emitter with explicit timings.
    pub fn with_config(
        keyboard: K,
        delay: D,
        bindings: [Binding<P>; N],
        config: EmitterConfig,
    ) -> Self {
        Self {
            keyboard,
            delay,
            bindings,
            config,
        }
    }

    /// Run the scan loop forever.
    ///
    /// Returns only when the transport fails in a way the retry policy
    /// cannot absorb.
    pub async fn run(&mut self) -> EmitError {
        info!("scanning {} bindings", N);
        loop {
            // `Never` does not cancel, so this only comes back with an error
            if let Err(e) = self.run_until(Never).await {
                return e;
            }
        }
    }

    /// Run the scan loop until `cancel` fires.
    ///
    /// Cancellation is checked before every pass, never in the middle of an
    /// emission or a release wait.
    pub async fn run_until<C: Cancel>(&mut self, cancel: C) -> Result<(), EmitError> {
        while !cancel.is_cancelled() {
            self.scan_pass().await?;
            self.delay.delay_ms(self.config.poll_interval_ms).await;
        }
        debug!("scan loop cancelled");
        Ok(())
    }

    /// Scan the bindings once, in order.
    ///
    /// The first pressed binding emits its chord and is waited on until
    /// released; the pass stops there. Returns the index of the binding that
    /// fired, if any.
    pub async fn scan_pass(&mut self) -> Result<Option<usize>, EmitError> {
        let Some(index) = self
            .bindings
            .iter_mut()
            .position(|binding| binding.line.is_pressed())
        else {
            return Ok(None);
        };

        let chord = self.bindings[index].chord;
        info!("{} pressed", self.bindings[index].label);

        self.bindings[index].state = BindingState::Emitting;
        if let Err(e) = self.emit(&chord).await {
            self.bindings[index].state = BindingState::Idle;
            return Err(e);
        }

        let poll_interval_ms = self.config.poll_interval_ms;
        let binding = &mut self.bindings[index];
        binding.state = BindingState::AwaitingRelease;
        binding
            .line
            .wait_for_release(&mut self.delay, poll_interval_ms)
            .await;
        binding.state = BindingState::Idle;
        debug!("{} released", binding.label);

        Ok(Some(index))
    }

    /// Press the whole chord, hold it, then release every key.
    pub async fn emit(&mut self, chord: &KeyChord) -> Result<(), EmitError> {
        if let Err(e) = self.send(Report::Press(chord)).await {
            // Best effort, keys must not stay held on the host
            if let Err(release_error) = self.keyboard.release_all().await {
                warn!("release after failed press: {:?}", release_error);
            }
            return Err(EmitError::Press(e));
        }

        self.delay.delay_ms(self.config.hold_ms).await;

        self.send(Report::ReleaseAll)
            .await
            .map_err(EmitError::Release)
    }

    async fn send(&mut self, report: Report<'_>) -> Result<(), TransportError> {
        let mut attempt: u8 = 1;
        loop {
            let result = match report {
                Report::Press(chord) => self.keyboard.press(chord).await,
                Report::ReleaseAll => self.keyboard.release_all().await,
            };

            match result {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && self.config.retry.allows_retry_after(attempt) => {
                    warn!("transport error {:?} on attempt {}, retrying", e, attempt);
                    attempt += 1;
                    self.delay.delay_ms(self.config.poll_interval_ms).await;
                }
                Err(e) => {
                    error!("transport error {:?} after {} attempt(s)", e, attempt);
                    return Err(e);
                }
            }
        }
    }

    /// Current state of the binding at `index`.
    #[must_use]
    pub fn binding_state(&self, index: usize) -> Option<BindingState> {
        self.bindings.get(index).map(Binding::state)
    }

    /// Index of the binding that is mid-emission or awaiting release.
    #[must_use]
    pub fn active_binding(&self) -> Option<usize> {
        self.bindings
            .iter()
            .position(|binding| binding.state != BindingState::Idle)
    }

    /// The bindings, in scan order.
    pub fn bindings(&self) -> &[Binding<P>] {
        &self.bindings
    }

    /// Emitter timings.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Get a reference to the keyboard transport.
    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    /// Get a mutable reference to the keyboard transport.
    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// Decompose the emitter into its keyboard, delay and bindings.
    pub fn into_parts(self) -> (K, D, [Binding<P>; N]) {
        (self.keyboard, self.delay, self.bindings)
    }
}
