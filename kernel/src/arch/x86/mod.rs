// =============================================================================
// Kestrel — x86 Architecture Layer (32-bit protected mode)
// =============================================================================
//
// Everything that touches privileged CPU state lives under this module:
//
//   boot.rs — Multiboot2 header, `_start`, boot information parsing
//   cpu.rs  — HLT and the interrupt flag
//   gdt.rs  — flat ring-0 segments
//   idt.rs  — interrupt descriptor table structures
//
// The kernel runs with paging off in a single flat address space; there
// is no user mode and no privilege transition anywhere.
// =============================================================================

pub mod boot;
pub mod cpu;
pub mod gdt;
pub mod idt;
