// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns the executor's raw per-worker result cells into the identifier-keyed map callers see,
//! with optional tuple-key nesting (`SPEC_FULL.md` §4.F).

mod collect;
mod inflate;

pub use collect::collect_results;
pub use inflate::inflate_results;
pub(crate) use inflate::split_tuple_keys;