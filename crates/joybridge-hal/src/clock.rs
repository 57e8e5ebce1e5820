//! Monotonic time and protocol delays.

use std::time::{Duration, Instant};

/// Time source for the control loop.
///
/// `now_millis` drives every gesture, autofire and indicator decision by
/// elapsed-time comparison. The delay methods exist only for the serial
/// protocol's fixed pulse widths and must stay in the microsecond range.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Never decreases.
    fn now_millis(&self) -> u64;

    /// Busy-wait for `micros` microseconds.
    fn delay_micros(&mut self, micros: u32);

    fn delay_millis(&mut self, millis: u32) {
        for _ in 0..millis {
            self.delay_micros(1000);
        }
    }
}

/// Host clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn delay_micros(&mut self, micros: u32) {
        let start = Instant::now();
        let wait = Duration::from_micros(u64::from(micros));
        while start.elapsed() < wait {
            std::hint::spin_loop();
        }
    }
}

/// Deterministic clock for tests.
///
/// Time only moves through [`ManualClock::advance`]. Delays are tallied in
/// [`ManualClock::delayed_micros`]
/// and leave `now_millis` untouched, so a test controls exactly how much
/// time passes between two cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: u64,
    delayed_us: u64,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    #[must_use]
    pub fn delayed_micros(&self) -> u64 {
        self.delayed_us
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_ms
    }

    fn delay_micros(&mut self, micros: u32) {
        self.delayed_us = self.delayed_us.saturating_add(u64::from(micros));
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }

    fn delay_micros(&mut self, micros: u32) {
        (**self).delay_micros(micros);
    }
}
