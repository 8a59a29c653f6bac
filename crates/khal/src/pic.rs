//! Legacy 8259 PIC (Programmable Interrupt Controller) driver.
//!
//! Kestrel runs entirely on the legacy interrupt pair: IRQ 0-15 are
//! remapped above the CPU exception vectors and delivered through the
//! two cascaded 8259s. Out of reset, IRQ 0-7 overlap exception vectors
//! 8-15, so the remap must happen before `sti`.

use crate::port::{inb, outb};

/// I/O ports of the master PIC.
const PIC1_COMMAND: u16 = 0x20;
const PIC1_DATA: u16 = 0x21;

/// I/O ports of the slave PIC.
const PIC2_COMMAND: u16 = 0xA0;
const PIC2_DATA: u16 = 0xA1;

/// ICW1: begin initialization, ICW4 follows.
const ICW1_INIT: u8 = 0x11;
/// ICW4: 8086 mode.
const ICW4_8086: u8 = 0x01;
/// OCW2: non-specific end of interrupt.
const EOI: u8 = 0x20;

/// Vector base for IRQ 0-7.
pub const PIC1_OFFSET: u8 = 32;
/// Vector base for IRQ 8-15.
pub const PIC2_OFFSET: u8 = 40;

/// Settle delay between command bytes; old parts need it.
#[inline]
fn io_wait() {
    unsafe {
        outb(0x80, 0);
    }
}

/// Run the initialization sequence: remap IRQ 0-7 to vectors 32-39 and
/// IRQ 8-15 to 40-47, then mask every line. Lines are opened one by one
/// with [`unmask`].
pub fn init() {
    unsafe {
        outb(PIC1_COMMAND, ICW1_INIT);
        io_wait();
        outb(PIC2_COMMAND, ICW1_INIT);
        io_wait();

        // ICW2: vector offsets.
        outb(PIC1_DATA, PIC1_OFFSET);
        io_wait();
        outb(PIC2_DATA, PIC2_OFFSET);
        io_wait();

        // ICW3: slave on IRQ 2; slave identity 2.
        outb(PIC1_DATA, 4);
        io_wait();
        outb(PIC2_DATA, 2);
        io_wait();

        outb(PIC1_DATA, ICW4_8086);
        io_wait();
        outb(PIC2_DATA, ICW4_8086);
        io_wait();

        // Mask all 16 lines.
        outb(PIC1_DATA, 0xFF);
        outb(PIC2_DATA, 0xFF);
    }
}

/// Open one IRQ line.
pub fn unmask(irq: u8) {
    let (port, bit) = if irq < 8 {
        (PIC1_DATA, irq)
    } else {
        (PIC2_DATA, irq - 8)
    };
    unsafe {
        let mask = inb(port) & !(1 << bit);
        outb(port, mask);
    }
}

/// Acknowledge an IRQ so the PIC delivers the next one. Slave lines
/// need the acknowledgment on both chips.
pub fn end_of_interrupt(irq: u8) {
    unsafe {
        if irq >= 8 {
            outb(PIC2_COMMAND, EOI);
        }
        outb(PIC1_COMMAND, EOI);
    }
}
