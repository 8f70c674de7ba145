// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// An error flowing through the graph as data, wrapped in `ResultCell::Err`.
///
/// Never unwinds past a task boundary on its own — it is what a panic or a failed dependency
/// resolution gets turned *into* before being stored in the results table. See `SPEC_FULL.md`
/// §7.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task's own function panicked. `exception_type` mirrors the source domain's exception
    /// class name so that a consumer's `DependencyError` message matches the source format
    /// exactly (`SPEC_FULL.md` §8, scenario 4); a plain Rust panic has no such name, so callers
    /// that want source-compatible messages tag it via `TaskError::user_tagged`.
    #[error("{message}")]
    User {
        exception_type: String,
        message: String,
    },

    /// A consumer's dependency resolved to, or passed through, an upstream `Err` cell.
    #[error("A dependency raised {exception_type} with the message \"{message}\"")]
    Dependency {
        exception_type: String,
        message: String,
    },

    /// The wait for a task's result exceeded the configured timeout and its worker was
    /// abandoned.
    #[error("task timed out")]
    Timeout,
}

impl TaskError {
    /// Build a `User` error from a recovered panic payload, using `"Exception"` as a generic
    /// type name when the panic carries no more specific tag.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked".to_string()
        };
        TaskError::User {
            exception_type: "Exception".to_string(),
            message,
        }
    }

    pub fn user_tagged(exception_type: impl Into<String>, message: impl Into<String>) -> Self {
        TaskError::User {
            exception_type: exception_type.into(),
            message: message.into(),
        }
    }

    /// The `DependencyError` derived from resolving a dependency that points at this error.
    pub fn as_dependency_error(&self) -> TaskError {
        match self {
            TaskError::User {
                exception_type,
                message,
            } => TaskError::Dependency {
                exception_type: exception_type.clone(),
                message: message.clone(),
            },
            TaskError::Dependency {
                exception_type,
                message,
            } => TaskError::Dependency {
                exception_type: exception_type.clone(),
                message: message.clone(),
            },
            TaskError::Timeout => TaskError::Dependency {
                exception_type: "TimeoutError".to_string(),
                message: "task timed out".to_string(),
            },
        }
    }
}
