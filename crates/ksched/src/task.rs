//! Task state and the fixed task table.

use bitflags::bitflags;

bitflags! {
    /// An EFLAGS image. Unknown bits are carried through untouched;
    /// snapshots use [`Eflags::from_bits_retain`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Eflags: u32 {
        const CARRY = 1 << 0;
        /// Bit 1 reads as one on every x86 part.
        const RESERVED = 1 << 1;
        const PARITY = 1 << 2;
        const ZERO = 1 << 6;
        const SIGN = 1 << 7;
        /// IF: maskable interrupts are delivered while set. Every task
        /// runs with it on, otherwise the timer could never preempt it.
        const INTERRUPT = 1 << 9;
        const DIRECTION = 1 << 10;
        const OVERFLOW = 1 << 11;
    }
}

/// General-purpose register block, in PUSHA memory order (lowest address
/// first). The trampoline saves with PUSHA and restores with POPA; this
/// layout must match those instructions byte for byte.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpRegisters {
    pub edi: u32,
    pub esi: u32,
    pub ebp: u32,
    /// ESP image as PUSHA pushed it; POPA skips it on restore.
    pub esp: u32,
    pub ebx: u32,
    pub edx: u32,
    pub ecx: u32,
    pub eax: u32,
}

impl GpRegisters {
    pub const fn zeroed() -> Self {
        Self {
            edi: 0,
            esi: 0,
            ebp: 0,
            esp: 0,
            ebx: 0,
            edx: 0,
            ecx: 0,
            eax: 0,
        }
    }
}

/// Operational registers: where a suspended task resumes.
///
/// `eip` and `cs` are wire-width values copied in and out of interrupt
/// frames. `esp` is pointer-sized because the scheduler dereferences it
/// when rebuilding a frame; on the i686 target it is the same 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpRegisters {
    pub eip: u32,
    pub cs: u16,
    pub esp: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Runnable, waiting for its slice.
    Ready,
    /// Owning the CPU right now.
    Running,
    /// Dead; the slot is kept until the task subsystem reclaims it.
    Terminated,
}

/// One entry of the task table.
#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub state: TaskState,
    pub op: OpRegisters,
    pub flags: Eflags,
    pub gp: GpRegisters,
    /// Ticks consumed since this task last started a slice.
    pub time: u32,
}

impl Task {
    fn runnable(&self) -> bool {
        matches!(self.state, TaskState::Ready | TaskState::Running)
    }
}

/// Fixed-capacity task table; a task's tid is its slot index.
pub struct TaskTable<const N: usize> {
    slots: [Option<Task>; N],
}

impl<const N: usize> TaskTable<N> {
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Register a task that will start at `eip` with an empty stack at
    /// `esp`. Its first activation builds the initial interrupt frame
    /// from these values; the register block starts zeroed.
    ///
    /// # Panics
    ///
    /// When every slot is occupied.
    pub fn spawn(&mut self, eip: u32, esp: usize, cs: u16, flags: Eflags) -> usize {
        let tid = match self.slots.iter().position(|s| s.is_none()) {
            Some(tid) => tid,
            None => panic!("task table full: {} slots", N),
        };
        self.slots[tid] = Some(Task {
            state: TaskState::Ready,
            op: OpRegisters { eip, cs, esp },
            flags,
            gp: GpRegisters::zeroed(),
            time: 0,
        });
        tid
    }

    /// Take `tid` out of scheduling. The slot stays occupied.
    pub fn terminate(&mut self, tid: usize) {
        self.get_mut(tid).state = TaskState::Terminated;
    }

    pub fn get(&self, tid: usize) -> &Task {
        match self.slots[tid] {
            Some(ref task) => task,
            None => panic!("no task with tid {}", tid),
        }
    }

    pub fn get_mut(&mut self, tid: usize) -> &mut Task {
        match self.slots[tid] {
            Some(ref mut task) => task,
            None => panic!("no task with tid {}", tid),
        }
    }

    /// Next runnable tid after `current`, scanning the table round-robin
    /// and considering `current` itself last. `None` when nothing is
    /// runnable.
    pub fn pick_next(&self, current: Option<usize>) -> Option<usize> {
        let start = current.map_or(0, |c| c + 1);
        (0..N)
            .map(|offset| (start + offset) % N)
            .find(|&tid| self.slots[tid].is_some_and(|t| t.runnable()))
    }
}

impl<const N: usize> Default for TaskTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
