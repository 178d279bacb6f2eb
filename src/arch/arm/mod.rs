// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! ARM (AArch32) privileged-mode helpers.
//!
//! Written so host builds can still exercise the high level fault path
//! via the lightweight `#[cfg(not(target_arch = "arm"))]` stubs; the
//! real instructions are only emitted for the firmware target.

/// Masks IRQ and FIQ on the current core. Idempotent: masking an
/// already-masked core is a no-op at the hardware level.
#[inline]
pub fn disable_interrupts() {
    #[cfg(target_arch = "arm")]
    unsafe {
        core::arch::asm!("cpsid if", options(nomem, nostack, preserves_flags));
    }
}

/// Drains outstanding memory accesses, then idles the core until the
/// next (masked) wakeup event. On the host this spins.
#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "arm")]
    unsafe {
        core::arch::asm!("dsb", "wfi", options(nomem, nostack, preserves_flags));
    }
    #[cfg(not(target_arch = "arm"))]
    {
        core::hint::spin_loop();
    }
}
