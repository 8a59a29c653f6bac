// =============================================================================
// Kestrel — Timer Interrupt Trampoline
// =============================================================================
//
// Vector 32 lands in `on_timer_tick`. The CPU pushed EIP, CS and EFLAGS
// (12 bytes, CS zero-extended to a doubleword); the entry sequence
// repacks that into the 10-byte frame the scheduler consumes:
//
//     frame_ptr + 0 .. 4    EIP
//     frame_ptr + 4 .. 6    CS
//     frame_ptr + 6 .. 10   EFLAGS
//
// EIP and the low half of CS move up 2 bytes; EFLAGS is already at its
// packed offset. After the shift, `frame_ptr + 10` equals the
// interrupted ESP exactly, which is the value the scheduler records and
// the value the restore path re-establishes.
//
// The exit sequence is shared between "continue" and "switch". It
// cannot use IRETD (the packed frame is 10 bytes, not 12), so it
// restores EFLAGS with IF masked off, steps ESP above the frame, then
// executes STI followed immediately by an indirect jump through the
// packed EIP: the STI interrupt shadow keeps pending interrupts out
// until the jump has retired, so no tick can land while the frame below
// ESP is still needed. The saved CS is carried through every snapshot
// and rebuild but needs no reload here: this kernel has exactly one
// code segment and nothing ever runs outside it.
// =============================================================================

use core::arch::global_asm;

use crate::task::{clock, SCHEDULER};

/// Timer interrupts per second programmed into the PIT.
pub const TICK_HZ: u32 = 100;

global_asm!(
    r#"
.global on_timer_tick
.global switch_context

on_timer_tick:
    push eax
    mov ax, [esp + 8]           // CS, before the EIP copy lands on it
    mov [esp + 10], ax
    mov eax, [esp + 4]          // EIP
    mov [esp + 6], eax
    pop eax
    lea esp, [esp + 2]          // ESP now addresses the packed frame
    pushad
    mov eax, esp                // regs_ptr
    lea edx, [esp + 32]         // frame_ptr
    push eax
    push edx
    call timer_tick
    add esp, 8
    popad
.Lrestore:
    push dword ptr [esp + 6]    // EFLAGS copy, IF masked off
    and dword ptr [esp], 0xFFFFFDFF
    popfd
    lea esp, [esp + 10]
    sti
    jmp dword ptr [esp - 10]

switch_context:
    mov esp, [esp + 4]
    popad
    jmp .Lrestore
"#
);

unsafe extern "C" {
    fn on_timer_tick();
    fn switch_context(new_esp: usize) -> !;
}

/// Entry address for the IDT gate.
pub fn entry_address() -> usize {
    on_timer_tick as usize
}

/// Rust half of the tick path, called by the trampoline with the packed
/// frame and PUSHA block addresses.
///
/// Returning resumes the interrupted task through the trampoline's
/// restore path; a switch never returns. The scheduler guard must drop
/// before `switch_context`: the call abandons this stack frame, and the
/// next task has to find the lock released.
#[unsafe(no_mangle)]
extern "C" fn timer_tick(frame_ptr: usize, regs_ptr: usize) {
    clock::tick();
    khal::pic::end_of_interrupt(0);

    let switch = {
        let mut sched = SCHEDULER.lock();
        // SAFETY: the trampoline passes addresses of the live interrupt
        // context it just pushed, and every task stack was sized by
        // `task::spawn` with room for a rebuilt context.
        unsafe { sched.schedule(frame_ptr, regs_ptr) }
    };

    if let Some(new_esp) = switch {
        // SAFETY: `new_esp` is the context the scheduler just built on
        // the next task's stack.
        unsafe { switch_context(new_esp) }
    }
}
