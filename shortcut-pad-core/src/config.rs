//! Timing and retry configuration for the emitter.

/// Interval between pin samples while scanning or waiting for release (ms).
pub const POLL_INTERVAL_MS: u32 = 10;

/// How long a chord is held before it is released (ms).
///
/// Long enough for the host to see a discrete keypress even with sluggish
/// USB polling; it also sets the minimum time between two triggers.
pub const HOLD_MS: u32 = 200;

/// Default number of calls made for one transport operation.
pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// How transient transport errors are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Total calls per operation, including the first. Zero behaves as one.
    pub max_attempts: u8,
}

impl RetryPolicy {
    /// Give up on the first error.
    pub const NONE: Self = Self { max_attempts: 1 };

    /// Allow up to `max_attempts` calls per operation.
    #[must_use]
    pub const fn attempts(max_attempts: u8) -> Self {
        Self { max_attempts }
    }

    /// Whether another call may follow the given (1-based) failed attempt.
    #[inline]
    #[must_use]
    pub const fn allows_retry_after(&self, attempt: u8) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::attempts(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Emitter tunables. Fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmitterConfig {
    /// Sleep between scan passes and between release samples (ms).
    pub poll_interval_ms: u32,
    /// Chord hold duration (ms).
    pub hold_ms: u32,
    /// Retry policy for transport calls.
    pub retry: RetryPolicy,
}

impl EmitterConfig {
    /// Defaults: 10 ms polling, 200 ms hold, 3 attempts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS,
            hold_ms: HOLD_MS,
            retry: RetryPolicy::attempts(DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Set the polling interval.
    #[must_use]
    pub const fn poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the chord hold duration.
    #[must_use]
    pub const fn hold_ms(mut self, ms: u32) -> Self {
        self.hold_ms = ms;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self::new()
    }
}
