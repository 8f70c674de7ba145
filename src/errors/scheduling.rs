// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::model::TaskId;

/// Raised synchronously from [`crate::scheduler::earliest_finish_time`] for malformed inputs.
/// Unlike [`crate::errors::TaskError`], this never flows through the graph as data — it aborts
/// scheduling outright (`SPEC_FULL.md` §7).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("workers must be >= 1, got {0}")]
    NoWorkers(usize),

    #[error("output_tasks references unknown task {0}")]
    UnknownOutputTask(TaskId),

    #[error("graph contains a cycle involving task {0}")]
    CyclicGraph(TaskId),
}