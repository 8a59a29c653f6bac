//! Kernel logging subsystem.
//!
//! Every crate in the workspace logs through the `log` facade; this
//! crate supplies the backend, a serial-console sink with per-level
//! ANSI colors. [`init`] brings up the UART and installs the logger, so
//! it must run before the first log record and may run before anything
//! else in the kernel.

#![no_std]

use log::{Level, LevelFilter, Log, Metadata, Record};

struct SerialLogger;

/// ANSI color prefix for a level tag.
fn color(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[90m",
        Level::Debug => "\x1b[36m",
        Level::Info => "\x1b[32m",
        Level::Warn => "\x1b[33m",
        Level::Error => "\x1b[31m",
    }
}

impl Log for SerialLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        khal::serial::write_fmt(format_args!(
            "{}[{:>5}]\x1b[0m {}\n",
            color(record.level()),
            record.level(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

/// Bring up the serial console and install the logger.
///
/// The maximum level stays at `Info`: trace and debug records compile
/// in but never reach the serial lock, which interrupt-context code
/// (the scheduler's switch trace) relies on.
pub fn init() {
    khal::serial::init();
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Info);
}

/// Break the console lock on the way into a panic report.
///
/// # Safety
///
/// Only from the panic handler: any holder of the lock never resumes.
pub unsafe fn force_unlock() {
    khal::serial::force_unlock();
}
