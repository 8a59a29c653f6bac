//! 8253/8254 PIT (Programmable Interval Timer) driver.
//!
//! Channel 0 is wired to IRQ 0; in rate-generator mode it fires at
//! `PIT_HZ / divisor`. This is the heartbeat that drives preemption.

use crate::port::outb;

const CHANNEL0: u16 = 0x40;
const COMMAND: u16 = 0x43;

/// Input clock of the PIT.
const PIT_HZ: u32 = 1_193_182;

/// Command byte: channel 0, lobyte/hibyte access, mode 2 (rate
/// generator), binary counting.
const CH0_RATE_GENERATOR: u8 = 0x34;

/// Program channel 0 to fire IRQ 0 `hz` times per second. A divisor of
/// 0 counts as 65536, the slowest rate the part can produce, so `hz`
/// below 19 saturates there.
pub fn start(hz: u32) {
    let divisor = match PIT_HZ / hz {
        d if d > 0xFFFF => 0,
        d => d as u16,
    };
    unsafe {
        outb(COMMAND, CH0_RATE_GENERATOR);
        outb(CHANNEL0, (divisor & 0xFF) as u8);
        outb(CHANNEL0, (divisor >> 8) as u8);
    }
}
