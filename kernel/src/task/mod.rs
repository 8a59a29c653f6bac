//! Task management: the scheduler singleton and kernel task creation.
//!
//! Configuration:
//!
//!   TASK_QUOTA       timer ticks per scheduling slice
//!   MAX_TASKS        capacity of the task table
//!   TASK_STACK_SIZE  bytes of stack handed to each task
//!
//! All tasks run in ring 0 with the flat kernel segments. A task is an
//! entry function plus a heap-allocated stack; its first activation
//! builds the initial interrupt frame from the spawn-time register
//! values.

pub mod clock;

use ksched::{Eflags, Scheduler};

use crate::arch::gdt;
use crate::memory::heap;
use crate::sync::spinlock::SpinLock;

/// Timer ticks per scheduling slice.
pub const TASK_QUOTA: u32 = 5;
/// Capacity of the task table.
pub const MAX_TASKS: usize = 8;
/// Bytes of stack handed to each kernel task.
pub const TASK_STACK_SIZE: usize = 16 * 1024;

/// The process-wide scheduler. Taken by the timer interrupt on every
/// tick and by `spawn` at boot.
pub static SCHEDULER: SpinLock<Scheduler<MAX_TASKS>> = SpinLock::new(Scheduler::new(TASK_QUOTA));

/// Allocate a stack and register a task starting at `entry`.
pub fn spawn(entry: extern "C" fn() -> !) -> usize {
    let stack = heap::kmalloc(TASK_STACK_SIZE) as usize;
    let esp = stack + TASK_STACK_SIZE;
    let tid = SCHEDULER.lock().tasks.spawn(
        entry as usize as u32,
        esp,
        gdt::KERNEL_CODE_SELECTOR,
        Eflags::RESERVED | Eflags::INTERRUPT,
    );
    log::info!(
        "task {}: entry {:#010x}, stack {:#x}..{:#x}",
        tid,
        entry as usize,
        stack,
        esp
    );
    tid
}

/// Spawn the built-in workload.
pub fn init() {
    spawn(task_ping);
    spawn(task_pong);
}

extern "C" fn task_ping() -> ! {
    worker("ping")
}

extern "C" fn task_pong() -> ! {
    worker("pong")
}

/// Demo workload: report roughly once a second, spin in between. The
/// spinning is the point, it gives the timer something to preempt.
fn worker(name: &'static str) -> ! {
    let mut next_report = 0u32;
    loop {
        let now = clock::now();
        if now >= next_report {
            log::info!("{}: alive at tick {}", name, now);
            next_report = now + crate::traps::timer::TICK_HZ;
        }
        core::hint::spin_loop();
    }
}
