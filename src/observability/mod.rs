// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging for the scheduler and executor.
//!
//! Diagnostic events are modeled as small structs implementing [`messages::StructuredLog`]
//! rather than logged as ad hoc format strings, so the same event carries both a human-readable
//! [`std::fmt::Display`] and machine-readable `tracing` fields.

pub mod messages;