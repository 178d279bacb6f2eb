// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Minimal PL011 UART support for console diagnostics.

use core::fmt::{self, Write};
use spin::Mutex;

/// Address of UART0 on the `vexpress-a9` machine.
const UART0_BASE: usize = 0x1000_9000;
const UART_DR: usize = 0x00;
const UART_FR: usize = 0x18;
const FR_TXFF: u32 = 1 << 5;

/// Global UART writer used for ordinary logging.
static UART0: Mutex<ConsoleUart> = Mutex::new(ConsoleUart::new(UART0_BASE));

/// UART handle capable of formatted writes.
#[derive(Clone, Copy)]
pub struct ConsoleUart {
    base: usize,
}

impl ConsoleUart {
    /// Creates a UART abstraction rooted at `base`.
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    /// Returns a guard for the console UART singleton.
    pub fn lock() -> spin::MutexGuard<'static, ConsoleUart> {
        UART0.lock()
    }

    fn write_raw(&self, byte: u8) {
        unsafe {
            while core::ptr::read_volatile((self.base + UART_FR) as *const u32) & FR_TXFF != 0 {}
            core::ptr::write_volatile((self.base + UART_DR) as *mut u32, byte as u32);
        }
    }
}

// Raw, lock-free UART emission for fault and panic contexts where the
// mutex may already be held by the interrupted code.
#[inline]
fn write_raw_mmio(byte: u8) {
    unsafe {
        while core::ptr::read_volatile((UART0_BASE + UART_FR) as *const u32) & FR_TXFF != 0 {}
        core::ptr::write_volatile((UART0_BASE + UART_DR) as *mut u32, byte as u32);
    }
}

/// Lock-free writer polling the TX-full flag; safe to use with
/// interrupts masked.
pub struct RawUart;

impl Write for RawUart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' {
                write_raw_mmio(b'\r');
            }
            write_raw_mmio(byte);
        }
        Ok(())
    }
}

pub fn raw_writer() -> RawUart {
    RawUart
}

impl Write for ConsoleUart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if byte == b'\n' {
                self.write_raw(b'\r');
            }
            self.write_raw(byte);
        }
        Ok(())
    }
}

/// Writes the provided string via the global UART.
pub fn write_str(message: &str) {
    let mut uart = ConsoleUart::lock();
    let _ = uart.write_str(message);
}

/// Writes a line terminated by `\n` to the UART.
pub fn write_line(message: &str) {
    write_str(message);
    write_str("\n");
}
