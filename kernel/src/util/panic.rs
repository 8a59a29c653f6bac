// =============================================================================
// Kestrel — Panic Handler
// =============================================================================
//
// Every panic in Kestrel is fatal by design: the error taxonomy (heap
// exhaustion, descriptor exhaustion, heap corruption, unknown free,
// empty scheduler) has no recovery path, and there is no userspace to
// shield. Report over serial, then halt with interrupts off.
// =============================================================================

use core::panic::PanicInfo;

use crate::arch::cpu;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // The panicking context may hold the console lock; it will never
    // resume, so the lock is broken before reporting.
    unsafe {
        klog::force_unlock();
    }

    log::error!("KERNEL PANIC");
    if let Some(location) = info.location() {
        log::error!("  at {}:{}", location.file(), location.line());
    }
    log::error!("  {}", info.message());
    log::error!("system halted");

    cpu::halt_forever()
}
