// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pre-fault register snapshot captured by the trap-entry glue.
//!
//! The board's exception vectors store the interrupted context into
//! [`SAVED_REGS`] before branching into [`crate::exception`]. The struct
//! layout is an ABI contract with that assembly: words are stored in
//! declaration order, r0 first. This crate only ever reads the snapshot;
//! the sole accessor hands out a shared reference, so mutation from Rust
//! is not expressible.

use bitflags::bitflags;
use static_assertions::const_assert_eq;

/// Index of the APCS frame pointer (r11) in [`RegisterSnapshot::r`].
///
/// The backtrace walker seeds its frame chain from this register.
pub const FRAME_POINTER_INDEX: usize = 11;

/// Register state at the moment of the trap.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RegisterSnapshot {
    /// General-purpose registers r0..r14 (r13 = sp, r14 = lr).
    pub r: [u32; 15],
    /// Address of the faulting instruction, as reported by the trap.
    pub pc: u32,
    /// Instruction word fetched from `pc` by the capture code. Only
    /// meaningful for data aborts and undefined instructions; prefetch
    /// aborts fault on the fetch itself.
    pub fault_insn: u32,
    /// Saved program status register of the interrupted mode.
    pub cpsr: u32,
}

impl RegisterSnapshot {
    /// All-zero snapshot, used to reserve the static storage.
    pub const fn zeroed() -> Self {
        Self { r: [0; 15], pc: 0, fault_insn: 0, cpsr: 0 }
    }

    /// The frame pointer value the backtrace starts from.
    #[inline]
    pub fn frame_pointer(&self) -> u32 {
        self.r[FRAME_POINTER_INDEX]
    }
}

// Layout contract with the capture assembly: 18 words, no padding.
const_assert_eq!(core::mem::size_of::<RegisterSnapshot>(), 18 * 4);
const_assert_eq!(core::mem::align_of::<RegisterSnapshot>(), 4);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, r), 0);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, pc), 15 * 4);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, fault_insn), 16 * 4);
const_assert_eq!(core::mem::offset_of!(RegisterSnapshot, cpsr), 17 * 4);

/// Snapshot storage filled by the trap-entry assembly.
///
/// Statically allocated, written exactly once per fault before any entry
/// point in [`crate::exception`] executes, read-only afterwards. The
/// symbol name is part of the ABI with the vector glue.
#[no_mangle]
static mut SAVED_REGS: RegisterSnapshot = RegisterSnapshot::zeroed();

/// Read-only view of the captured snapshot.
pub fn saved() -> &'static RegisterSnapshot {
    // SAFETY: the trap glue writes SAVED_REGS before control reaches any
    // dispatcher, interrupts stay masked for the rest of execution, and
    // nothing in this crate writes the static. There is exactly one fault
    // in flight because the system never resumes.
    unsafe { &*core::ptr::addr_of!(SAVED_REGS) }
}

bitflags! {
    /// Condition and mask bits of a saved program status word.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PsrFlags: u32 {
        const NEGATIVE = 1 << 31;
        const ZERO = 1 << 30;
        const CARRY = 1 << 29;
        const OVERFLOW = 1 << 28;
        const IRQ_MASKED = 1 << 7;
        const FIQ_MASKED = 1 << 6;
        const THUMB = 1 << 5;
    }
}

/// Name of the processor mode encoded in `psr`, or `"???"` for reserved
/// encodings (a corrupt saved status word must still render).
pub fn mode_name(psr: u32) -> &'static str {
    match psr & 0x1f {
        0x10 => "USR",
        0x11 => "FIQ",
        0x12 => "IRQ",
        0x13 => "SVC",
        0x16 => "MON",
        0x17 => "ABT",
        0x1a => "HYP",
        0x1b => "UND",
        0x1f => "SYS",
        _ => "???",
    }
}
