// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fatal-exception dispatch: one diverging entry point per hardware
//! trap, wired to the vector table by external boot assembly.
//!
//! Every path follows the same strict sequence: mask interrupts first,
//! then (for the typed aborts) render the diagnostic report from the
//! pre-captured [`crate::snapshot`], then power down. No snapshot is
//! captured for the unclaimed IRQ/FIQ and generic hard-fault paths, so
//! they go straight from banner to power-down. None of these functions
//! can fail and none of them return; divergence is part of their type.

use core::fmt::Write;

use crate::hal::vexpress::Board;
use crate::hal::{IntCtl, Power, StackMem};
use crate::report;
use crate::snapshot::{self, RegisterSnapshot};
use crate::uart;

/// The typed fault kinds that carry a register snapshot.
///
/// Closed set: the reporter matches exhaustively, so a new kind without
/// a report format is a compile error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExceptionKind {
    DataAbort,
    PrefetchAbort,
    UndefinedInstruction,
}

impl ExceptionKind {
    /// Banner text for the report header.
    pub const fn name(self) -> &'static str {
        match self {
            ExceptionKind::DataAbort => "Data Abort",
            ExceptionKind::PrefetchAbort => "Prefetch Abort",
            ExceptionKind::UndefinedInstruction => "Undefined Instruction",
        }
    }
}

/// Terminal path for the typed aborts: interrupts off, full report,
/// power down. Write errors are swallowed; there is nobody left to
/// propagate them to.
fn fatal_report<H, W>(hal: &H, console: &mut W, kind: ExceptionKind, regs: &RegisterSnapshot) -> !
where
    H: IntCtl + Power + StackMem,
    W: Write,
{
    hal.disable_all();
    let _ = report::render(kind, regs, hal, console);
    let _ = console.write_str("\nHalting.\n\n");
    hal.power_down()
}

/// Terminal path for faults with no captured state: interrupts off,
/// one-line banner, power down. Deliberately never touches the snapshot.
fn fatal_banner<H, W>(hal: &H, console: &mut W, cause: &str) -> !
where
    H: IntCtl + Power,
    W: Write,
{
    hal.disable_all();
    let _ = write!(console, "\nFATAL: {}\n", cause);
    hal.power_down()
}

/// Data-abort vector target. The trap glue has stored the interrupted
/// context, including the instruction word at the faulting pc.
#[no_mangle]
pub extern "C" fn exception_data_abort() -> ! {
    fatal_report(&Board, &mut uart::raw_writer(), ExceptionKind::DataAbort, snapshot::saved())
}

/// Prefetch-abort vector target.
#[no_mangle]
pub extern "C" fn exception_prefetch_abort() -> ! {
    fatal_report(&Board, &mut uart::raw_writer(), ExceptionKind::PrefetchAbort, snapshot::saved())
}

/// Undefined-instruction vector target.
#[no_mangle]
pub extern "C" fn exception_undefined_instruction() -> ! {
    fatal_report(
        &Board,
        &mut uart::raw_writer(),
        ExceptionKind::UndefinedInstruction,
        snapshot::saved(),
    )
}

/// Vector target for an IRQ no driver claimed. No snapshot is captured
/// on this path.
#[no_mangle]
pub extern "C" fn exception_unhandled_irq() -> ! {
    fatal_banner(&Board, &mut uart::raw_writer(), "Unhandled IRQ")
}

/// Vector target for an FIQ no driver claimed.
#[no_mangle]
pub extern "C" fn exception_unhandled_fiq() -> ! {
    fatal_banner(&Board, &mut uart::raw_writer(), "Unhandled FIQ")
}

/// Catch-all vector target for faults with no more specific handler.
#[no_mangle]
pub extern "C" fn exception_hard_fault() -> ! {
    fatal_banner(&Board, &mut uart::raw_writer(), "Hard Fault")
}

#[cfg(test)]
mod tests;
