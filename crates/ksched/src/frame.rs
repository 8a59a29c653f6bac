//! Interrupt frame and register block layout.
//!
//! The packed interrupt return frame, low to high address:
//!
//! ```text
//! +0   EIP     4 bytes
//! +4   CS      2 bytes
//! +6   EFLAGS  4 bytes
//! ```
//!
//! 10 bytes total; the EFLAGS word is deliberately unaligned, so every
//! access below goes through unaligned pointer reads and writes. The
//! PUSHA block sits immediately under the frame on an interrupted stack.
//!
//! These four functions are the crate's entire unsafe surface: they take
//! integer addresses and move raw bytes at the offsets above, nothing
//! else.

use crate::task::GpRegisters;

pub const EIP_OFFSET: usize = 0;
pub const CS_OFFSET: usize = 4;
pub const FLAGS_OFFSET: usize = 6;
/// Size of the packed frame.
pub const FRAME_SIZE: usize = 10;
/// Size of the PUSHA register block.
pub const GP_SIZE: usize = core::mem::size_of::<GpRegisters>();

/// Read `(eip, cs, eflags)` from the frame at `frame_ptr`.
///
/// # Safety
///
/// `frame_ptr` must point at [`FRAME_SIZE`] readable bytes laid out as
/// documented above.
pub unsafe fn read(frame_ptr: usize) -> (u32, u16, u32) {
    let p = frame_ptr as *const u8;
    (
        p.add(EIP_OFFSET).cast::<u32>().read_unaligned(),
        p.add(CS_OFFSET).cast::<u16>().read_unaligned(),
        p.add(FLAGS_OFFSET).cast::<u32>().read_unaligned(),
    )
}

/// Build a frame in the [`FRAME_SIZE`] bytes below `esp`, returning the
/// lowered stack pointer.
///
/// # Safety
///
/// The bytes below `esp` must be writable stack space reserved for the
/// target task.
pub unsafe fn write(esp: usize, eip: u32, cs: u16, eflags: u32) -> usize {
    let esp = esp - FRAME_SIZE;
    let p = esp as *mut u8;
    p.add(EIP_OFFSET).cast::<u32>().write_unaligned(eip);
    p.add(CS_OFFSET).cast::<u16>().write_unaligned(cs);
    p.add(FLAGS_OFFSET).cast::<u32>().write_unaligned(eflags);
    esp
}

/// Copy the PUSHA block at `regs_ptr` by value.
///
/// # Safety
///
/// `regs_ptr` must point at [`GP_SIZE`] readable bytes in PUSHA order.
pub unsafe fn read_registers(regs_ptr: usize) -> GpRegisters {
    (regs_ptr as *const GpRegisters).read_unaligned()
}

/// Store `regs` in the [`GP_SIZE`] bytes below `esp`, returning the
/// lowered stack pointer.
///
/// # Safety
///
/// The bytes below `esp` must be writable stack space reserved for the
/// target task.
pub unsafe fn write_registers(esp: usize, regs: &GpRegisters) -> usize {
    let esp = esp - GP_SIZE;
    (esp as *mut GpRegisters).write_unaligned(*regs);
    esp
}
