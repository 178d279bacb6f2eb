// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fault report rendering.
//!
//! Everything here is pure formatting over a [`Write`] sink and a
//! validated memory source: no allocation, no locking, no mutation of
//! shared state, and byte-identical output for identical inputs. The
//! layout is fixed and exhaustive: kind banner, the addresses relevant
//! to that kind, the full register set in a stable order, then the
//! backtrace.

use core::fmt::{self, Write};

use crate::backtrace;
use crate::exception::ExceptionKind;
use crate::hal::StackMem;
use crate::snapshot::{mode_name, PsrFlags, RegisterSnapshot};

/// Dump labels for r0..r14, in dump order. r11 is the frame pointer.
const REG_NAMES: [&str; 15] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "fp", "ip", "sp", "lr",
];

const PSR_BITS: [(PsrFlags, char); 7] = [
    (PsrFlags::NEGATIVE, 'N'),
    (PsrFlags::ZERO, 'Z'),
    (PsrFlags::CARRY, 'C'),
    (PsrFlags::OVERFLOW, 'V'),
    (PsrFlags::IRQ_MASKED, 'I'),
    (PsrFlags::FIQ_MASKED, 'F'),
    (PsrFlags::THUMB, 'T'),
];

/// Renders the complete report for a typed fault: banner, register dump,
/// backtrace. The caller appends the terminal halting line.
pub fn render<M, W>(kind: ExceptionKind, regs: &RegisterSnapshot, mem: &M, w: &mut W) -> fmt::Result
where
    M: StackMem,
    W: Write,
{
    writeln!(w, "\nFATAL: {}", kind.name())?;
    match kind {
        ExceptionKind::DataAbort => {
            writeln!(w, " pc=0x{:08x} insn=0x{:08x}", regs.pc, regs.fault_insn)?;
        }
        ExceptionKind::PrefetchAbort => {
            // The fetch itself faulted; there is no instruction word.
            writeln!(w, " pc=0x{:08x}", regs.pc)?;
        }
        ExceptionKind::UndefinedInstruction => {
            writeln!(w, " insn=0x{:08x} pc=0x{:08x}", regs.fault_insn, regs.pc)?;
        }
    }

    writeln!(w, "\nProcessor state:")?;
    render_registers(regs, w)?;

    writeln!(w, "\nBacktrace:")?;
    backtrace::render(mem, w, regs.frame_pointer(), 0)
}

/// Renders every general-purpose register plus the saved status word,
/// four to a line, fixed width, always in the same order.
pub fn render_registers<W: Write>(regs: &RegisterSnapshot, w: &mut W) -> fmt::Result {
    for (index, value) in regs.r.iter().enumerate() {
        write!(w, " {:<3}=0x{:08x}", REG_NAMES[index], value)?;
        if index % 4 == 3 {
            writeln!(w)?;
        }
    }
    writeln!(w)?;
    write!(w, " cpsr=0x{:08x} mode={} flags=", regs.cpsr, mode_name(regs.cpsr))?;
    let flags = PsrFlags::from_bits_truncate(regs.cpsr);
    for (flag, label) in PSR_BITS {
        w.write_char(if flags.contains(flag) { label } else { '-' })?;
    }
    writeln!(w)
}
