// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Opt-in panic handler for firmware images
//! OWNERS: @firmware-team
//! PUBLIC API: panic handler (no_std, feature `panic_handler`)
//! DEPENDS_ON: uart::raw_writer(), hal::vexpress::Board
//! INVARIANTS: Interrupts masked before output; minimal formatting; no
//!   allocations; ends in the same terminal power-down as the fault path

use core::fmt::Write;
use core::panic::PanicInfo;

use crate::hal::vexpress::Board;
use crate::hal::{IntCtl, Power};
use crate::uart;

/// Emits the panic location and message, then powers the core down.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    Board.disable_all();

    let mut w = uart::raw_writer();

    // Minimal formatting only; this path must not panic again.
    let _ = w.write_str("\nPANIC: ");
    if let Some(location) = info.location() {
        let _ = w.write_str(location.file());
        let _ = write!(w, ":{}: ", location.line());
    }
    if let Some(message) = info.message().as_str() {
        let _ = w.write_str(message);
    } else {
        let _ = w.write_str("<complex msg>");
    }
    let _ = w.write_str("\n");

    Board.power_down()
}
