//! IDT population.

use spin::Once;

use super::{handlers, timer};
use crate::arch::gdt::KERNEL_CODE_SELECTOR;
use crate::arch::idt::{GateType, Idt};

/// Vector the PIC delivers IRQ 0 (the PIT) on.
pub const TIMER_VECTOR: u8 = khal::pic::PIC1_OFFSET;

/// Global IDT instance.
static IDT: Once<Idt> = Once::new();

/// Build and load the interrupt descriptor table.
///
/// Exceptions get ordinary `x86-interrupt` handlers; the timer vector
/// points at the assembly trampoline, which needs the full register
/// file rather than the compiler-chosen clobber set.
pub fn init_idt() {
    let idt = IDT.call_once(|| {
        let mut idt = Idt::new();
        let cs = KERNEL_CODE_SELECTOR;

        idt.set_handler(0, handlers::divide_error as usize, cs, GateType::Interrupt);
        idt.set_handler(3, handlers::breakpoint as usize, cs, GateType::Interrupt);
        idt.set_handler(6, handlers::invalid_opcode as usize, cs, GateType::Interrupt);
        idt.set_handler(8, handlers::double_fault as usize, cs, GateType::Interrupt);
        idt.set_handler(
            13,
            handlers::general_protection as usize,
            cs,
            GateType::Interrupt,
        );
        idt.set_handler(14, handlers::page_fault as usize, cs, GateType::Interrupt);
        idt.set_handler(TIMER_VECTOR, timer::entry_address(), cs, GateType::Interrupt);
        idt
    });
    idt.load();
    log::info!("idt: loaded, timer on vector {}", TIMER_VECTOR);
}
