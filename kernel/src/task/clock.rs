//! Kernel tick counter.
//!
//! Monotonic count of timer interrupts since boot. i686 has no native
//! 64-bit atomics, so the counter is 32 bits and wraps after ~497 days
//! at 100 Hz; consumers compare with wrapping arithmetic in mind.

use core::sync::atomic::{AtomicU32, Ordering};

static TICKS: AtomicU32 = AtomicU32::new(0);

/// Called from the timer interrupt on every tick.
#[inline]
pub fn tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

/// Ticks elapsed since the timer was armed.
#[inline]
pub fn now() -> u32 {
    TICKS.load(Ordering::Relaxed)
}
