// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

#![cfg(test)]
//! Property tests for the stack walker.
//!
//! TEST_SCOPE:
//!   - Termination: any memory contents and any seed pointer render at
//!     most MAX_FRAMES frames
//!   - Shape: every rendered line has the fixed field layout
//!   - Determinism: re-rendering the same stack yields identical bytes

extern crate std;

use std::string::String;
use std::vec::Vec;

use proptest::prelude::*;

use super::{render, MAX_FRAMES};
use crate::hal::StackMem;

/// Fake stack memory; `None` words model refused reads.
#[derive(Debug)]
struct ArbMem {
    base: u32,
    words: Vec<Option<u32>>,
}

impl StackMem for ArbMem {
    fn read_word(&self, addr: u32) -> Option<u32> {
        if addr % 4 != 0 || addr < self.base {
            return None;
        }
        self.words
            .get(((addr - self.base) / 4) as usize)
            .copied()
            .flatten()
    }
}

fn arb_mem() -> impl Strategy<Value = ArbMem> {
    (
        (0x6000_0000u32..0x6100_0000).prop_map(|base| base & !3),
        proptest::collection::vec(proptest::option::weighted(0.9, any::<u32>()), 1..512),
    )
        .prop_map(|(base, words)| ArbMem { base, words })
}

proptest! {
    #[test]
    fn walk_terminates_within_frame_cap(mem in arb_mem(), fp in any::<u32>(), start in 0usize..48) {
        let mut out = String::new();
        render(&mem, &mut out, fp, start).unwrap();
        prop_assert!(out.lines().count() <= MAX_FRAMES);
    }

    #[test]
    fn rendered_lines_have_fixed_shape(mem in arb_mem(), fp in any::<u32>()) {
        let mut out = String::new();
        render(&mem, &mut out, fp, 0).unwrap();
        for line in out.lines() {
            prop_assert_eq!(line.len(), 19);
            prop_assert!(line.starts_with(" #"));
            prop_assert!(line.ends_with(">]"));
            prop_assert!(line[5..9].eq("[<0x"));
        }
    }

    #[test]
    fn rendering_is_deterministic(mem in arb_mem(), fp in any::<u32>(), start in 0usize..48) {
        let mut first = String::new();
        let mut second = String::new();
        render(&mem, &mut first, fp, start).unwrap();
        render(&mem, &mut second, fp, start).unwrap();
        prop_assert_eq!(first, second);
    }
}
