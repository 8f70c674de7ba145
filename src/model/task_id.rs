// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// A single scalar component of a [`TaskId`] or [`crate::model::Selector`].
///
/// Task identifiers and selectors are restricted to strings and integers — the hashable scalar
/// kinds the source domain's dynamically-typed identifiers can take.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    Int(i64),
    Str(String),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(i) => write!(f, "{i}"),
            Atom::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Atom {
    fn from(v: i64) -> Self {
        Atom::Int(v)
    }
}

impl From<&str> for Atom {
    fn from(v: &str) -> Self {
        Atom::Str(v.to_string())
    }
}

impl From<String> for Atom {
    fn from(v: String) -> Self {
        Atom::Str(v)
    }
}

/// An opaque, hashable task identifier.
///
/// Either a bare scalar (`TaskId::Atom`) or a fixed-length tuple of scalars
/// (`TaskId::Tuple`). Tuple identifiers are what [`crate::postprocess::inflate_results`] looks
/// for when nesting flat results into a mapping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaskId {
    Atom(Atom),
    Tuple(Vec<TaskId>),
}

impl TaskId {
    pub fn int(v: i64) -> Self {
        TaskId::Atom(Atom::Int(v))
    }

    pub fn str(v: impl Into<String>) -> Self {
        TaskId::Atom(Atom::Str(v.into()))
    }

    pub fn tuple2(a: TaskId, b: TaskId) -> Self {
        TaskId::Tuple(vec![a, b])
    }

    /// `Some((a, b))` iff this id is a 2-element tuple — the shape
    /// [`crate::postprocess::inflate_results`] groups on.
    pub fn as_pair(&self) -> Option<(&TaskId, &TaskId)> {
        match self {
            TaskId::Tuple(parts) if parts.len() == 2 => Some((&parts[0], &parts[1])),
            _ => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Atom(a) => write!(f, "{a}"),
            TaskId::Tuple(parts) => {
                write!(f, "(")?;
                for (i, p) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<i64> for TaskId {
    fn from(v: i64) -> Self {
        TaskId::int(v)
    }
}

impl From<&str> for TaskId {
    fn from(v: &str) -> Self {
        TaskId::str(v)
    }
}
