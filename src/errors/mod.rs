// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error kinds for the task graph engine.
//!
//! [`TaskError`] flows through the graph *as data* (it never unwinds). [`SchedulingError`] and
//! [`PostprocessError`] are raised synchronously for malformed inputs and stop the call outright.

mod postprocess;
mod scheduling;
mod task;

pub use postprocess::PostprocessError;
pub use scheduling::SchedulingError;
pub use task::TaskError;