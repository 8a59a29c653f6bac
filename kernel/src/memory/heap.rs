// =============================================================================
// Kestrel — Kernel Heap
// =============================================================================
//
// The allocator core lives in `kheap`; this module pins down its
// configuration and owns the process-wide instance.
//
//   KHEAP_BASE        first address the heap may hand out
//   KHEAP_LIMIT       one past the last usable address
//   KHEAP_MAX_ENTRIES descriptor slots in the block table
//
// The window starts at 4 MiB, far above the kernel image loaded at
// 1 MiB, and spans 4 MiB. Boot verifies against the Multiboot2 memory
// map that the whole window is usable RAM before the first allocation.
//
// Blocks carry no alignment guarantee and are freed by exact address,
// so this heap does not implement `GlobalAlloc`; kernel code calls
// `kmalloc`/`kfree` directly.
// =============================================================================

use kheap::HeapTable;
use multiboot2::{BootInformation, MemoryAreaType};

use crate::sync::spinlock::SpinLock;

/// First address the heap may hand out.
pub const KHEAP_BASE: usize = 0x0040_0000;
/// One past the last usable heap address.
pub const KHEAP_LIMIT: usize = 0x0080_0000;
/// Descriptor slots in the heap table.
pub const KHEAP_MAX_ENTRIES: usize = 64;

/// The process-wide heap table. The spinlock doubles as the critical
/// section against the timer interrupt.
static KERNEL_HEAP: SpinLock<HeapTable<KHEAP_MAX_ENTRIES>> =
    SpinLock::new(HeapTable::new(KHEAP_BASE, KHEAP_LIMIT));

/// Verify the heap window against the loader's memory map and zero the
/// table.
///
/// # Panics
///
/// When the loader provided no memory map or the window is not entirely
/// inside one usable region.
pub fn init(boot: &BootInformation) {
    let memory_map = match boot.memory_map_tag() {
        Some(tag) => tag,
        None => panic!("bootloader provided no memory map"),
    };
    let usable = memory_map.memory_areas().iter().any(|area| {
        area.typ() == MemoryAreaType::Available
            && area.start_address() as usize <= KHEAP_BASE
            && KHEAP_LIMIT <= area.end_address() as usize
    });
    if !usable {
        panic!(
            "heap window {:#x}..{:#x} is not usable RAM",
            KHEAP_BASE, KHEAP_LIMIT
        );
    }

    KERNEL_HEAP.lock().reset();
    log::info!(
        "heap: {} KiB at {:#x}, {} descriptors",
        (KHEAP_LIMIT - KHEAP_BASE) / 1024,
        KHEAP_BASE,
        KHEAP_MAX_ENTRIES
    );
}

/// Allocate `size` bytes from the kernel heap.
pub fn kmalloc(size: usize) -> *mut u8 {
    KERNEL_HEAP.lock().alloc(size) as *mut u8
}

/// Release a block previously returned by [`kmalloc`].
#[allow(dead_code)]
pub fn kfree(ptr: *mut u8) {
    KERNEL_HEAP.lock().free(ptr as usize);
}

/// Bytes currently allocated, for diagnostics.
#[allow(dead_code)]
pub fn allocated_bytes() -> usize {
    KERNEL_HEAP.lock().allocated_bytes()
}
