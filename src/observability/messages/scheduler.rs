// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Events emitted by [`crate::scheduler::earliest_finish_time`].

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::model::TaskId;
use crate::observability::messages::StructuredLog;

/// Scheduling began for a graph of a known size.
pub struct SchedulingStarted {
    pub task_count: usize,
    pub workers: usize,
}

impl Display for SchedulingStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "scheduling {} tasks across {} workers",
            self.task_count, self.workers
        )
    }
}

impl StructuredLog for SchedulingStarted {
    fn log(&self) {
        tracing::info!(task_count = self.task_count, workers = self.workers, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "scheduling",
            span_name = name,
            task_count = self.task_count,
            workers = self.workers,
        )
    }
}

/// A cycle was found while checking the graph for acyclicity.
pub struct CycleDetected<'a> {
    pub task_id: &'a TaskId,
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "cycle detected at task {}", self.task_id)
    }
}

impl StructuredLog for CycleDetected<'_> {
    fn log(&self) {
        tracing::error!(task_id = %self.task_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("cycle_detected", span_name = name, task_id = %self.task_id)
    }
}

/// A task (or multiplexed group) was placed onto a worker's list.
pub struct TaskPlaced<'a> {
    pub worker: usize,
    pub task_ids: &'a [TaskId],
    pub start: f64,
    pub cost: f64,
}

impl Display for TaskPlaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "placed {} task(s) on worker {} at t={:.3} (cost={:.3})",
            self.task_ids.len(),
            self.worker,
            self.start,
            self.cost
        )
    }
}

impl StructuredLog for TaskPlaced<'_> {
    fn log(&self) {
        tracing::debug!(
            worker = self.worker,
            group_size = self.task_ids.len(),
            start = self.start,
            cost = self.cost,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "task_placed",
            span_name = name,
            worker = self.worker,
            group_size = self.task_ids.len(),
        )
    }
}

/// Scheduling produced a complete [`crate::scheduler::Schedule`].
pub struct SchedulingCompleted {
    pub task_count: usize,
    pub workers: usize,
    pub makespan: f64,
}

impl Display for SchedulingCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "scheduled {} tasks across {} workers, makespan={:.3}",
            self.task_count, self.workers, self.makespan
        )
    }
}

impl StructuredLog for SchedulingCompleted {
    fn log(&self) {
        tracing::info!(
            task_count = self.task_count,
            workers = self.workers,
            makespan = self.makespan,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "scheduling_completed",
            span_name = name,
            task_count = self.task_count,
            workers = self.workers,
            makespan = self.makespan,
        )
    }
}