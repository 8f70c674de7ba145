// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Earliest-Finish-Time list scheduler: partitions a weighted DAG across a fixed worker
//! count (`SPEC_FULL.md` §4.C).

mod eft;

pub use eft::{earliest_finish_time, Schedule, Slot};