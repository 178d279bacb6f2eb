// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bring-up smoke test for the report path.
//!
//! Renders a synthetic data abort through the real formatting code so
//! the console wiring and report layout can be eyeballed on the boot
//! log before a real fault ever needs them. Does not halt.

use crate::exception::ExceptionKind;
use crate::hal::vexpress::Board;
use crate::report;
use crate::snapshot::{RegisterSnapshot, FRAME_POINTER_INDEX};
use crate::uart;

/// Renders the synthetic report to the console UART.
pub fn run() {
    let mut regs = RegisterSnapshot::zeroed();
    regs.pc = 0x0001_2344;
    regs.fault_insn = 0xe590_0000;
    regs.cpsr = 0x0000_0013;
    for (index, slot) in regs.r.iter_mut().enumerate() {
        *slot = 0x5e1f_0000 + index as u32;
    }
    // A frame pointer outside DRAM keeps the synthetic backtrace empty.
    regs.r[FRAME_POINTER_INDEX] = 0;

    let mut console = uart::raw_writer();
    let _ = report::render(ExceptionKind::DataAbort, &regs, &Board, &mut console);
    log_info!(target: "selftest", "synthetic report rendered (system not halted)");
}
