// =============================================================================
// Kestrel — Interrupt-Safe Ticket Spinlock
// =============================================================================
//
// Kestrel runs on one CPU, so the lock's real job is interrupt safety:
// acquiring clears IF, releasing restores the previous state. A lock
// region and the scheduler's atomic region are therefore the same
// mechanism, and the timer interrupt can never observe a singleton
// mid-update.
//
// Tickets keep acquisition FIFO. On a single CPU the queue never holds
// more than one waiter, but the lock is written for the multi-processor
// redesign point: give each CPU its own ticket and the code stands.
//
// Nesting works because each guard restores the exact flag state it
// saw: inner guards see IF already clear and leave it clear on drop.
// =============================================================================

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU32, Ordering};

use crate::arch::cpu;

/// A ticket spinlock that disables interrupts while held.
pub struct SpinLock<T> {
    /// Next ticket to hand out.
    next_ticket: AtomicU32,
    /// Ticket currently allowed in.
    now_serving: AtomicU32,
    data: UnsafeCell<T>,
}

// SAFETY: the ticket gate hands out exclusive access to `data`, so the
// lock is shareable wherever the payload itself may move between
// execution contexts.
unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> Self {
        Self {
            next_ticket: AtomicU32::new(0),
            now_serving: AtomicU32::new(0),
            data: UnsafeCell::new(value),
        }
    }

    /// Acquire the lock, disabling interrupts first. The returned guard
    /// releases the lock and restores the interrupt state on drop.
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        let irq_was_enabled = cpu::interrupts_enabled();
        // SAFETY: the guard's drop restores the state saved above.
        unsafe {
            cpu::disable_interrupts();
        }

        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        while self.now_serving.load(Ordering::Acquire) != ticket {
            core::hint::spin_loop();
        }

        SpinLockGuard {
            lock: self,
            irq_was_enabled,
        }
    }
}

/// RAII guard for a held [`SpinLock`].
pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
    irq_was_enabled: bool,
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: holding the guard means holding the ticket.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: holding the guard means holding the ticket.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for SpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.now_serving.fetch_add(1, Ordering::Release);
        if self.irq_was_enabled {
            // SAFETY: interrupts were on when this guard was taken.
            unsafe {
                cpu::enable_interrupts();
            }
        }
    }
}
