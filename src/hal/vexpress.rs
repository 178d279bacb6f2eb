// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! HAL implementation targeting QEMU's `vexpress-a9` machine.

use super::{IntCtl, Power, StackMem};
use crate::arch::arm;

/// First byte of DRAM on the board.
const DRAM_BASE: u32 = 0x6000_0000;
/// One past the last DRAM byte (1 GiB fitted).
const DRAM_END: u32 = 0xa000_0000;

/// HAL facade for the vexpress-a9 board. Zero-sized; constructing one
/// touches no memory.
#[derive(Clone, Copy)]
pub struct Board;

impl IntCtl for Board {
    fn disable_all(&self) {
        arm::disable_interrupts();
    }
}

impl Power for Board {
    fn power_down(&self) -> ! {
        // Wakeup sources are masked, so each WFI is permanent in
        // practice; the loop covers spurious wakeup events.
        loop {
            arm::wait_for_interrupt();
        }
    }
}

impl StackMem for Board {
    fn read_word(&self, addr: u32) -> Option<u32> {
        if addr % 4 != 0 || addr < DRAM_BASE || addr >= DRAM_END {
            return None;
        }
        #[cfg(target_arch = "arm")]
        {
            Some(unsafe { core::ptr::read_volatile(addr as *const u32) })
        }
        #[cfg(not(target_arch = "arm"))]
        {
            None
        }
    }
}
