// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg(test)]
//! Terminal-path tests against a mock platform.
//!
//! TEST_SCOPE:
//!   - Interrupts are masked before the first byte of output, all paths
//!   - Power-down happens exactly once and is the final observable action
//!   - Untyped paths never read the snapshot or stack memory
//!   - Identical inputs render identical bytes
//!
//! The mock's `power_down` panics so the diverging paths can be driven
//! under `catch_unwind` and the recorded event trace inspected after.

extern crate std;

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use super::{fatal_banner, fatal_report, ExceptionKind};
use crate::hal::{IntCtl, Power, StackMem};
use crate::snapshot::RegisterSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    IrqOff,
    Write,
    Halt,
}

struct MockHal {
    trace: Rc<RefCell<Vec<Event>>>,
    reads: Cell<usize>,
    words: Vec<(u32, u32)>,
}

impl IntCtl for MockHal {
    fn disable_all(&self) {
        self.trace.borrow_mut().push(Event::IrqOff);
    }
}

impl Power for MockHal {
    fn power_down(&self) -> ! {
        self.trace.borrow_mut().push(Event::Halt);
        panic!("power down");
    }
}

impl StackMem for MockHal {
    fn read_word(&self, addr: u32) -> Option<u32> {
        self.reads.set(self.reads.get() + 1);
        if addr % 4 != 0 {
            return None;
        }
        self.words.iter().find(|&&(a, _)| a == addr).map(|&(_, w)| w)
    }
}

struct MockConsole {
    trace: Rc<RefCell<Vec<Event>>>,
    out: String,
}

impl core::fmt::Write for MockConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.trace.borrow_mut().push(Event::Write);
        self.out.push_str(s);
        Ok(())
    }
}

/// Drives a diverging scenario to its panic-backed power-down and hands
/// back the event trace, console bytes, and stack-read count.
fn drive<F>(words: &[(u32, u32)], scenario: F) -> (Vec<Event>, String, usize)
where
    F: FnOnce(&MockHal, &mut MockConsole),
{
    let trace = Rc::new(RefCell::new(Vec::new()));
    let hal = MockHal { trace: trace.clone(), reads: Cell::new(0), words: words.to_vec() };
    let mut console = MockConsole { trace: trace.clone(), out: String::new() };
    let outcome = catch_unwind(AssertUnwindSafe(|| scenario(&hal, &mut console)));
    assert!(outcome.is_err(), "terminal path returned instead of powering down");
    let events = trace.borrow().clone();
    (events, console.out, hal.reads.get())
}

const STACK_TOP: u32 = 0x6000_0010;

/// One well-formed frame: return address 0x9abc, chain terminated.
fn frame_words() -> Vec<(u32, u32)> {
    std::vec![(STACK_TOP - 4, 0x9abc), (STACK_TOP - 12, 0)]
}

fn sample_regs() -> RegisterSnapshot {
    let mut regs = RegisterSnapshot::zeroed();
    regs.pc = 0x0000_8f20;
    regs.fault_insn = 0xe590_1000;
    regs.cpsr = 0x0000_00d7;
    regs.r[crate::snapshot::FRAME_POINTER_INDEX] = STACK_TOP;
    regs
}

fn typed(kind: ExceptionKind) -> (Vec<Event>, String, usize) {
    let regs = sample_regs();
    let words = frame_words();
    drive(&words, move |hal, console| fatal_report(hal, console, kind, &regs))
}

const TYPED_KINDS: [ExceptionKind; 3] = [
    ExceptionKind::DataAbort,
    ExceptionKind::PrefetchAbort,
    ExceptionKind::UndefinedInstruction,
];

#[test]
fn interrupts_masked_before_any_output() {
    for kind in TYPED_KINDS {
        let (events, _, _) = typed(kind);
        assert_eq!(events[0], Event::IrqOff, "{kind:?}: first action must mask interrupts");
    }
    let (events, _, _) = drive(&[], |hal, console| fatal_banner(hal, console, "Unhandled IRQ"));
    assert_eq!(events[0], Event::IrqOff);
}

#[test]
fn power_down_is_last_and_happens_once() {
    for kind in TYPED_KINDS {
        let (events, _, _) = typed(kind);
        assert_eq!(events.iter().filter(|&&e| e == Event::Halt).count(), 1, "{kind:?}");
        assert_eq!(events.last(), Some(&Event::Halt), "{kind:?}");
    }
    for cause in ["Unhandled IRQ", "Unhandled FIQ", "Hard Fault"] {
        let (events, _, _) = drive(&[], |hal, console| fatal_banner(hal, console, cause));
        assert_eq!(events.iter().filter(|&&e| e == Event::Halt).count(), 1, "{cause}");
        assert_eq!(events.last(), Some(&Event::Halt), "{cause}");
    }
}

#[test]
fn typed_report_carries_banner_registers_and_backtrace() {
    let (_, out, reads) = typed(ExceptionKind::DataAbort);
    assert!(out.contains("FATAL: Data Abort\n"));
    assert!(out.contains(" pc=0x00008f20 insn=0xe5901000\n"));
    assert!(out.contains("\nProcessor state:\n"));
    assert!(out.contains(" cpsr=0x000000d7 mode=ABT flags=----IF-\n"));
    assert!(out.contains("\nBacktrace:\n #00 [<0x00009abc>]\n"));
    assert!(out.ends_with("\nHalting.\n\n"));
    assert!(reads > 0, "backtrace must have consulted stack memory");
}

#[test]
fn untyped_paths_emit_banner_only_and_skip_the_snapshot() {
    for cause in ["Unhandled IRQ", "Unhandled FIQ", "Hard Fault"] {
        let (_, out, reads) = drive(&[], |hal, console| fatal_banner(hal, console, cause));
        assert_eq!(out, std::format!("\nFATAL: {}\n", cause));
        assert_eq!(reads, 0, "{cause}: untyped path read stack memory");
        assert!(!out.contains("Processor state"));
        assert!(!out.contains("Backtrace"));
    }
}

#[test]
fn identical_snapshots_render_identical_reports() {
    for kind in TYPED_KINDS {
        let (_, first, _) = typed(kind);
        let (_, second, _) = typed(kind);
        assert_eq!(first, second, "{kind:?}");
    }
}
