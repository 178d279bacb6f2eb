// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fatal hardware-exception diagnostics and terminal halt for ARM firmware.
//!
//! When the processor traps into a data abort, prefetch abort, undefined
//! instruction, or an unclaimed IRQ/FIQ, the entry points in
//! [`exception`] are the last code that ever runs: they mask interrupts,
//! render a deterministic snapshot of the pre-fault processor state and
//! call stack over the console UART, and park the core in a low-power
//! state. Nothing here resumes, retries, or returns.
//!
//! Vector-table installation and the register capture itself are the
//! responsibility of the board's trap-entry assembly, which must fill
//! the [`snapshot`] singleton before any handler runs.

#![no_std]

pub mod log;

pub mod arch;
pub mod backtrace;
pub mod exception;
pub mod hal;
#[cfg(all(feature = "panic_handler", target_os = "none"))]
mod panic;
pub mod report;
#[cfg(feature = "selftest_report")]
pub mod selftest;
pub mod snapshot;
pub mod uart;

/// Announces the armed handlers on the boot console.
///
/// Call once during bring-up, after the vector glue has been installed.
#[cfg(feature = "boot_banner")]
pub fn announce() {
    log_info!(
        target: "blackbox",
        "blackbox {}: fatal-exception handlers armed",
        env!("CARGO_PKG_VERSION")
    );
}
