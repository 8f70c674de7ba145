// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use crate::errors::TaskError;
use crate::model::{ArgNode, ResultCell, TaskFn};

/// A single resolved unit of work handed from the control thread to a worker.
pub struct Dispatch {
    pub func: TaskFn,
    pub args: ArgNode,
}

/// A worker's report of one finished dispatch.
pub struct Completion {
    pub cell: ResultCell,
    pub wall_time: Duration,
}

/// The body of a worker thread: pulls one dispatch at a time and runs it with panics caught at
/// this boundary, turning a panic into `TaskError::User` rather than unwinding into the control
/// thread.
///
/// Returns as soon as `dispatch_rx` disconnects — the control thread closes it on normal
/// completion and on abandoning this worker for a timeout or a prior panic.
pub fn run(dispatch_rx: Receiver<Dispatch>, completion_tx: Sender<Completion>) {
    while let Ok(Dispatch { func, args }) = dispatch_rx.recv() {
        let start = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| (func)(&args)));
        let wall_time = start.elapsed();
        let cell = match outcome {
            Ok(value) => ResultCell::Ok(value),
            Err(payload) => ResultCell::Err(TaskError::from_panic(payload)),
        };
        if completion_tx.send(Completion { cell, wall_time }).is_err() {
            return;
        }
    }
}