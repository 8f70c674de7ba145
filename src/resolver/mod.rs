// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolves a task's argument tree against the results produced so far, turning
//! [`crate::model::Dependency`] leaves into concrete values (`SPEC_FULL.md` §4.D).

mod expand;

pub use expand::expand_args;