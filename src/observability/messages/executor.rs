// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Events emitted by [`crate::executor::execute_task_lists`].

use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

use crate::model::TaskId;
use crate::observability::messages::StructuredLog;

/// Dispatch of the scheduled task lists to the worker pool began.
pub struct DispatchStarted {
    pub workers: usize,
    pub timeout: Option<Duration>,
}

impl Display for DispatchStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.timeout {
            Some(t) => write!(f, "dispatching to {} workers, timeout={:?}", self.workers, t),
            None => write!(f, "dispatching to {} workers, no timeout", self.workers),
        }
    }
}

impl StructuredLog for DispatchStarted {
    fn log(&self) {
        tracing::info!(
            workers = self.workers,
            timeout_ms = self.timeout.map(|t| t.as_millis() as u64),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("dispatch", span_name = name, workers = self.workers)
    }
}

/// A worker's current task ran past the configured timeout and its thread was abandoned.
pub struct WorkerAbandoned<'a> {
    pub worker: usize,
    pub task_ids: &'a [TaskId],
}

impl Display for WorkerAbandoned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "worker {} abandoned after timeout, {} task(s) marked Timeout",
            self.worker,
            self.task_ids.len()
        )
    }
}

impl StructuredLog for WorkerAbandoned<'_> {
    fn log(&self) {
        tracing::warn!(
            worker = self.worker,
            task_count = self.task_ids.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "worker_abandoned",
            span_name = name,
            worker = self.worker,
            task_count = self.task_ids.len(),
        )
    }
}

/// A replacement thread took over a worker's remaining list after an abandonment.
pub struct WorkerRespawned {
    pub worker: usize,
}

impl Display for WorkerRespawned {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "worker {} respawned", self.worker)
    }
}

impl StructuredLog for WorkerRespawned {
    fn log(&self) {
        tracing::info!(worker = self.worker, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("worker_respawned", span_name = name, worker = self.worker)
    }
}

/// All worker lists finished (or were abandoned) and results were collected.
pub struct ExecutionCompleted {
    pub task_count: usize,
    pub failure_count: usize,
    pub duration: Duration,
}

impl Display for ExecutionCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "execution completed: {} tasks, {} failures, duration={:?}",
            self.task_count, self.failure_count, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted {
    fn log(&self) {
        tracing::info!(
            task_count = self.task_count,
            failure_count = self.failure_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            task_count = self.task_count,
            failure_count = self.failure_count,
            duration = ?self.duration,
        )
    }
}