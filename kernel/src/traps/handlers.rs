//! CPU exception handlers.
//!
//! There is no userspace to isolate a fault into: every exception
//! except the debug breakpoint is a kernel bug and panics.

use crate::arch::idt::InterruptStackFrame;

pub extern "x86-interrupt" fn divide_error(frame: InterruptStackFrame) {
    panic!("divide error at {:#010x}", frame.eip);
}

pub extern "x86-interrupt" fn breakpoint(frame: InterruptStackFrame) {
    log::warn!("breakpoint at {:#010x}", frame.eip);
}

pub extern "x86-interrupt" fn invalid_opcode(frame: InterruptStackFrame) {
    panic!("invalid opcode at {:#010x}", frame.eip);
}

pub extern "x86-interrupt" fn double_fault(frame: InterruptStackFrame, error_code: u32) -> ! {
    panic!("double fault (error {:#x}) at {:#010x}", error_code, frame.eip);
}

pub extern "x86-interrupt" fn general_protection(frame: InterruptStackFrame, error_code: u32) {
    panic!(
        "general protection fault (selector {:#x}) at {:#010x}",
        error_code, frame.eip
    );
}

pub extern "x86-interrupt" fn page_fault(frame: InterruptStackFrame, error_code: u32) {
    panic!(
        "page fault (error {:#x}) at {:#010x} with paging disabled",
        error_code, frame.eip
    );
}
