//! Hardware access layer for the Kestrel kernel.
//!
//! Thin drivers for the legacy PC hardware the kernel relies on: port
//! I/O primitives, the COM1 UART, the 8259 interrupt controller and the
//! 8253/8254 interval timer.

#![no_std]

pub mod pic;
pub mod pit;
pub mod port;
pub mod serial;
