//! The round-robin scheduler.

use crate::frame;
use crate::task::{Eflags, TaskState, TaskTable};

/// Scheduler state: the task table, the running tid, and the slice
/// length in timer ticks.
///
/// There is exactly one of these per kernel; the kernel owns it as a
/// spinlocked singleton and the timer interrupt is its only caller once
/// scheduling has begun.
pub struct Scheduler<const N: usize> {
    pub tasks: TaskTable<N>,
    current: Option<usize>,
    quota: u32,
}

impl<const N: usize> Scheduler<N> {
    pub const fn new(quota: u32) -> Self {
        Self {
            tasks: TaskTable::new(),
            current: None,
            quota,
        }
    }

    /// Tid of the running task, `None` before the first tick.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Timer-tick entry point.
    ///
    /// `frame_ptr` addresses the packed `[EIP][CS][EFLAGS]` frame on the
    /// interrupted stack, `regs_ptr` the PUSHA block under it. Returns
    /// `None` when the interrupted task keeps its slice (the trampoline
    /// resumes it unchanged) or `Some(new_esp)` when the trampoline must
    /// tail-invoke `switch_context(new_esp)` instead.
    ///
    /// On a switch the interrupted task's frame and registers are
    /// snapshotted into its table entry, and an identical structure is
    /// rebuilt at the bottom of the next task's saved stack: the frame
    /// the hardware would have pushed, then the register block the
    /// trampoline pops on its single return path. The very first entry
    /// has no task to snapshot and goes straight to the switch.
    ///
    /// # Panics
    ///
    /// When no runnable task exists. The kernel always has work once
    /// scheduling has begun; an empty table here is a kernel bug.
    ///
    /// # Safety
    ///
    /// `frame_ptr` and `regs_ptr` must address a live interrupt context
    /// as described above, and every runnable task's saved `esp` must
    /// have writable stack space below it for the rebuilt context.
    pub unsafe fn schedule(&mut self, frame_ptr: usize, regs_ptr: usize) -> Option<usize> {
        let next_tid = match self.tasks.pick_next(self.current) {
            Some(tid) => tid,
            None => panic!("scheduler: no runnable task"),
        };

        if let Some(tid) = self.current {
            let this = self.tasks.get_mut(tid);
            this.time += 1;
            if this.time < self.quota {
                return None;
            }
            this.time = 0;

            // Snapshot the interrupted task. The stack pointer to
            // restore is the first byte above the pushed frame.
            let (eip, cs, eflags) = frame::read(frame_ptr);
            this.op.eip = eip;
            this.op.cs = cs;
            this.flags = Eflags::from_bits_retain(eflags);
            this.op.esp = frame_ptr + frame::FRAME_SIZE;
            this.gp = frame::read_registers(regs_ptr);
            this.state = TaskState::Ready;
        }

        self.current = Some(next_tid);
        let next = self.tasks.get_mut(next_tid);
        next.state = TaskState::Running;

        log::trace!("switch tid={} eip={:#010x}", next_tid, next.op.eip);

        // Rebuild the interrupt context on the next task's stack: frame
        // first, register block below it, exactly what the trampoline's
        // restore path consumes.
        let mut esp = next.op.esp;
        esp = frame::write(esp, next.op.eip, next.op.cs, next.flags.bits());
        esp = frame::write_registers(esp, &next.gp);
        next.op.esp = esp;
        Some(esp)
    }
}
