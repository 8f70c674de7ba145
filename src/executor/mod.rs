// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runs a scheduled set of worker task lists to completion on a pool of OS threads, resolving
//! dependency arguments as tasks become ready and isolating per-task failures (including
//! timeouts) as data (`SPEC_FULL.md` §4.E).

mod costs;
mod execute;
mod worker;

pub use costs::{CostEntry, CostValue, Costs};
pub use execute::{execute_task_lists, ExecutionOutput};