// =============================================================================
// Kestrel — Kernel Entry
// =============================================================================
//
// Boot order is rigid:
//   1. serial console + logger (everything after this can report)
//   2. GDT, then IDT (exceptions become diagnosable)
//   3. heap, after the Multiboot2 memory map confirms its window
//   4. PIC remap + PIT, timer line still masked until the IDT has the
//      trampoline installed (done in 2)
//   5. tasks spawned, STI, idle
//
// From the STI on, the timer interrupt owns scheduling and the boot CPU
// parks in HLT as the implicit idle thread behind the task set.
// =============================================================================

#![no_std]
#![no_main]
#![feature(abi_x86_interrupt)]

mod arch;
mod memory;
mod sync;
mod task;
mod traps;
mod util;

use crate::arch::cpu;

/// Rust-side entry, called by the boot stub with the Multiboot2 magic
/// in `magic` and the physical address of the boot information in
/// `mbi_addr`.
#[unsafe(no_mangle)]
pub extern "C" fn kmain(magic: u32, mbi_addr: u32) -> ! {
    klog::init();
    log::info!("Kestrel {} booting", env!("CARGO_PKG_VERSION"));

    let boot_info = arch::boot::parse(magic, mbi_addr);

    arch::gdt::init();
    traps::init_idt();

    memory::heap::init(&boot_info);

    khal::pic::init();
    khal::pic::unmask(0);
    khal::pit::start(traps::timer::TICK_HZ);
    log::info!("timer: {} Hz on irq 0", traps::timer::TICK_HZ);

    task::init();

    log::info!("boot complete, handing the CPU to the scheduler");
    unsafe {
        cpu::enable_interrupts();
    }
    loop {
        cpu::halt();
    }
}
