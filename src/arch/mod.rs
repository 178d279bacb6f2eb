// Copyright 2025 Blackbox Contributors
// SPDX-License-Identifier: Apache-2.0

//! Architecture specific support code, isolated behind module boundaries.

pub mod arm;
