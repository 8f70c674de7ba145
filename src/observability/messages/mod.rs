// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for structured logging and tracing spans.
//!
//! Each event in the scheduler and executor is a small struct implementing both
//! [`std::fmt::Display`] (a human-readable line) and [`StructuredLog`] (machine-readable
//! `tracing` fields plus a span). This avoids scattering format strings through the engine
//! and keeps field names consistent between log lines and spans.

pub mod executor;
pub mod scheduler;

use tracing::Span;

/// A loggable, traceable diagnostic event.
pub trait StructuredLog {
    /// Emit this event at its appropriate level, with its fields attached.
    fn log(&self);

    /// Build a span carrying this event's fields as attributes.
    fn span(&self, name: &str) -> Span;
}