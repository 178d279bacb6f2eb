// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hardware abstraction traits consumed by the fault path.
//!
//! Every service the terminal path depends on is a trait here, so the
//! sequencing guarantees (interrupts off before output, halt last) are
//! observable against mock implementations on the host.

pub mod vexpress;

/// Immediate interrupt masking.
pub trait IntCtl {
    /// Masks every maskable interrupt source on the current core.
    /// Must be idempotent and must not block.
    fn disable_all(&self);
}

/// Terminal low-power state.
pub trait Power {
    /// Puts the core into its lowest available non-executing state.
    /// Never returns; there is no retry, timeout, or escalation.
    fn power_down(&self) -> !;
}

/// Validated word reads for walking possibly-corrupt stacks.
pub trait StackMem {
    /// Reads the aligned word at `addr`, or `None` if the address is
    /// misaligned or outside memory that is safe to dereference.
    fn read_word(&self, addr: u32) -> Option<u32>;
}
