//! Simulated clock, pins and keyboard for host tests.
//!
//! Everything here completes immediately: delays advance a shared clock
//! instead of sleeping, so a whole scan loop runs inside one `poll`.

extern crate std;

use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use embedded_hal_async::delay::DelayNs;

use crate::cancel::Cancel;
use crate::keycode::KeyChord;
use crate::output::{HidKeyboard, TransportError};

/// Run a future to completion (simple blocking executor).
///
/// Panics if the future ever returns `Pending`; sim futures never do.
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    match f.as_mut().poll(&mut cx) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("Sim future returned Pending unexpectedly"),
    }
}

/// Shared simulated time, in nanoseconds.
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_ns(ms * 1_000_000);
    }

    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

/// Delay that advances the [`SimClock`].
pub struct SimDelay {
    clock: SimClock,
}

impl SimDelay {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
        }
    }
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(u64::from(ns));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.advance_ms(u64::from(ms));
    }
}

/// Active-low pin driven by a script.
///
/// Reads come first from a queue of explicit samples (`true` = pressed),
/// then from time windows `[start_ms, end_ms)` during which the button is
/// held. Outside both it reads released.
pub struct SimPin {
    clock: SimClock,
    held: Vec<(u64, u64)>,
    samples: RefCell<VecDeque<bool>>,
    reads: Rc<Cell<usize>>,
    failing: bool,
}

impl SimPin {
    /// A button nobody touches.
    pub fn idle(clock: &SimClock) -> Self {
        Self::held(clock, &[])
    }

    /// A button held during each `[start_ms, end_ms)` window.
    pub fn held(clock: &SimClock, windows: &[(u64, u64)]) -> Self {
        Self {
            clock: clock.clone(),
            held: windows.to_vec(),
            samples: RefCell::new(VecDeque::new()),
            reads: Rc::new(Cell::new(0)),
            failing: false,
        }
    }

    /// A button that returns `samples` read by read, then reads released.
    pub fn sequence(clock: &SimClock, samples: &[bool]) -> Self {
        let pin = Self::idle(clock);
        pin.samples.borrow_mut().extend(samples.iter().copied());
        pin
    }

    /// Make every read fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Shared read counter, usable after the pin has been moved.
    pub fn reads(&self) -> Rc<Cell<usize>> {
        self.reads.clone()
    }

    fn pressed(&self) -> bool {
        self.reads.set(self.reads.get() + 1);
        if let Some(sample) = self.samples.borrow_mut().pop_front() {
            return sample;
        }
        let now = self.clock.now_ms();
        self.held
            .iter()
            .any(|&(start, end)| start <= now && now < end)
    }
}

impl ErrorType for SimPin {
    type Error = ErrorKind;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.failing {
            self.reads.set(self.reads.get() + 1);
            return Err(ErrorKind::Other);
        }
        Ok(self.pressed())
    }
}

/// Pin that can never fail, for code that wants `Error = Infallible`.
pub struct AlwaysReleased;

impl ErrorType for AlwaysReleased {
    type Error = Infallible;
}

impl InputPin for AlwaysReleased {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// A report accepted by the [`RecordingKeyboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press(KeyChord),
    ReleaseAll,
}

/// Keyboard that records accepted reports with their timestamp (ms).
pub struct RecordingKeyboard {
    clock: SimClock,
    events: Vec<(u64, KeyEvent)>,
    press_failures: VecDeque<TransportError>,
    release_failures: VecDeque<TransportError>,
    press_attempts: usize,
    release_attempts: usize,
}

impl RecordingKeyboard {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            events: Vec::new(),
            press_failures: VecDeque::new(),
            release_failures: VecDeque::new(),
            press_attempts: 0,
            release_attempts: 0,
        }
    }

    /// Queue an error for the next `press` call.
    pub fn fail_next_press(&mut self, error: TransportError) {
        self.press_failures.push_back(error);
    }

    /// Queue an error for the next `release_all` call.
    pub fn fail_next_release(&mut self, error: TransportError) {
        self.release_failures.push_back(error);
    }

    pub fn events(&self) -> &[(u64, KeyEvent)] {
        &self.events
    }

    /// Accepted press reports, in order.
    pub fn presses(&self) -> Vec<(u64, KeyChord)> {
        self.events
            .iter()
            .filter_map(|&(at, event)| match event {
                KeyEvent::Press(chord) => Some((at, chord)),
                KeyEvent::ReleaseAll => None,
            })
            .collect()
    }

    pub fn press_attempts(&self) -> usize {
        self.press_attempts
    }

    pub fn release_attempts(&self) -> usize {
        self.release_attempts
    }
}

impl HidKeyboard for RecordingKeyboard {
    async fn press(&mut self, chord: &KeyChord) -> Result<(), TransportError> {
        self.press_attempts += 1;
        if let Some(error) = self.press_failures.pop_front() {
            return Err(error);
        }
        self.events
            .push((self.clock.now_ms(), KeyEvent::Press(*chord)));
        Ok(())
    }

    async fn release_all(&mut self) -> Result<(), TransportError> {
        self.release_attempts += 1;
        if let Some(error) = self.release_failures.pop_front() {
            return Err(error);
        }
        self.events.push((self.clock.now_ms(), KeyEvent::ReleaseAll));
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Cancels once the simulated clock reaches a deadline.
pub struct Deadline {
    clock: SimClock,
    at_ms: u64,
}

impl Deadline {
    pub fn at(clock: &SimClock, at_ms: u64) -> Self {
        Self {
            clock: clock.clone(),
            at_ms,
        }
    }
}

impl Cancel for Deadline {
    fn is_cancelled(&self) -> bool {
        self.clock.now_ms() >= self.at_ms
    }
}
