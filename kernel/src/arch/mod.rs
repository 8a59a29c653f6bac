//! Architecture support.
//!
//! Kestrel targets 32-bit x86 only; the rest of the kernel goes through
//! `crate::arch::*` and never names the architecture directly.

#[cfg(target_arch = "x86")]
pub mod x86;

#[cfg(target_arch = "x86")]
pub use x86::*;
