//! Kestrel scheduler core.
//!
//! Round-robin, quota-driven preemption over a fixed task table. The
//! timer trampoline hands [`Scheduler::schedule`] two addresses on the
//! interrupted stack: the packed interrupt return frame and the PUSHA
//! register block. The scheduler either lets the interrupted task
//! continue or snapshots it, rebuilds the next task's frame on that
//! task's own stack, and reports the stack pointer the trampoline must
//! switch to.
//!
//! Everything here is data plumbing over caller-provided addresses; the
//! actual register save/restore lives in the kernel's assembly
//! trampoline. That keeps this crate runnable under hosted tests, with
//! plain buffers standing in for task stacks.

#![cfg_attr(not(test), no_std)]

pub mod frame;
mod sched;
mod task;

pub use sched::Scheduler;
pub use task::{Eflags, GpRegisters, OpRegisters, Task, TaskState, TaskTable};

#[cfg(test)]
mod frame_test;
#[cfg(test)]
mod task_test;
