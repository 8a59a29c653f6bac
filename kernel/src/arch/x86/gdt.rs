//! Global Descriptor Table: flat ring-0 segments.
//!
//! Three descriptors, the mandatory null entry plus a code and a data
//! segment, both base 0, limit 4 GiB, DPL 0. Segmentation is flat and
//! there is no TSS: nothing ever leaves ring 0.

use core::arch::asm;
use core::mem::size_of;

/// Selector of the kernel code segment (GDT entry 1). Tasks carry this
/// in their saved CS.
pub const KERNEL_CODE_SELECTOR: u16 = 0x08;
/// Selector of the kernel data segment (GDT entry 2).
pub const KERNEL_DATA_SELECTOR: u16 = 0x10;

/// A segment descriptor.
#[derive(Clone, Copy)]
#[repr(transparent)]
struct SegmentDescriptor(u64);

impl SegmentDescriptor {
    const NULL: Self = Self(0);

    /// Ring-0 code: base 0, limit 0xFFFFF pages, present, readable,
    /// 32-bit default operand size, 4 KiB granularity.
    const fn kernel_code() -> Self {
        Self(0x00CF_9A00_0000_FFFF)
    }

    /// Ring-0 data: same span, writable.
    const fn kernel_data() -> Self {
        Self(0x00CF_9200_0000_FFFF)
    }
}

#[repr(C, align(8))]
struct Gdt {
    entries: [SegmentDescriptor; 3],
}

static GDT: Gdt = Gdt {
    entries: [
        SegmentDescriptor::NULL,
        SegmentDescriptor::kernel_code(),
        SegmentDescriptor::kernel_data(),
    ],
};

/// Pointer operand for `lgdt`.
#[repr(C, packed)]
struct GdtPointer {
    limit: u16,
    base: u32,
}

/// Load the GDT and reload every segment register. CS takes a far
/// return; the data selectors are plain moves.
pub fn init() {
    let ptr = GdtPointer {
        limit: (size_of::<Gdt>() - 1) as u16,
        base: &GDT as *const Gdt as u32,
    };

    // SAFETY: the descriptors above cover the whole address space and
    // the selectors match their slots; the far return lands on the next
    // instruction of this function.
    unsafe {
        asm!(
            "lgdt [{ptr}]",
            "push {cs}",
            "lea {tmp}, [2f]",
            "push {tmp}",
            "retf",
            "2:",
            "mov ds, {ds:x}",
            "mov es, {ds:x}",
            "mov fs, {ds:x}",
            "mov gs, {ds:x}",
            "mov ss, {ds:x}",
            ptr = in(reg) &raw const ptr,
            cs = in(reg) KERNEL_CODE_SELECTOR as u32,
            ds = in(reg) KERNEL_DATA_SELECTOR as u32,
            tmp = out(reg) _,
        );
    }

    log::info!(
        "gdt: flat segments loaded (cs={:#04x} ds={:#04x})",
        KERNEL_CODE_SELECTOR,
        KERNEL_DATA_SELECTOR
    );
}
