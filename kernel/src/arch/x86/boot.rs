// =============================================================================
// Kestrel — Multiboot2 Boot Entry
// =============================================================================
//
// A Multiboot2 loader (GRUB) finds the header below in the first 32 KiB
// of the image, loads the kernel at 1 MiB in 32-bit protected mode with
// paging off, and jumps to `_start` with the magic value in EAX and the
// physical address of the boot information in EBX. The stub only sets
// up a stack and forwards both values to `kmain`; the `multiboot2`
// crate does the parsing.
// =============================================================================

use core::arch::global_asm;
use multiboot2::{BootInformation, BootInformationHeader};

global_asm!(
    r#"
// Multiboot2 header: magic, architecture 0 (i386 protected mode),
// length, checksum, terminating end tag.
.section .multiboot2_header, "a"
.align 8
mb2_header_start:
    .long 0xe85250d6
    .long 0
    .long mb2_header_end - mb2_header_start
    .long -(0xe85250d6 + 0 + (mb2_header_end - mb2_header_start))
    .short 0
    .short 0
    .long 8
mb2_header_end:

.section .bss
.align 16
boot_stack_bottom:
    .skip 0x4000
boot_stack_top:

.section .text
.global _start
_start:
    mov esp, offset boot_stack_top
    push ebx
    push eax
    call kmain
2:  cli
    hlt
    jmp 2b
"#
);

/// Validate the loader handoff and map the boot information.
pub fn parse(magic: u32, mbi_addr: u32) -> BootInformation<'static> {
    if magic != multiboot2::MAGIC {
        panic!("booted with magic {:#010x}, expected multiboot2", magic);
    }
    // SAFETY: the loader put a boot information structure at this
    // address and nothing has overwritten it yet.
    unsafe { BootInformation::load(mbi_addr as usize as *const BootInformationHeader) }
        .unwrap_or_else(|err| panic!("unreadable multiboot2 boot information: {:?}", err))
}
