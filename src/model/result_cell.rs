// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::TaskError;
use crate::model::Value;

/// A task's outcome: either its produced value, or an error flowing through the graph as data.
///
/// See `SPEC_FULL.md` §3 and §9: the source domain wraps results in a one-element tuple to tell
/// "produced `None`" apart from "not yet produced". This crate uses `Option<ResultCell>` for that
/// distinction instead (`None` = no cell yet), so `ResultCell` itself only needs to distinguish
/// success from failure.
#[derive(Clone, Debug)]
pub enum ResultCell {
    Ok(Value),
    Err(TaskError),
}

impl ResultCell {
    pub fn is_err(&self) -> bool {
        matches!(self, ResultCell::Err(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResultCell::Ok(v) => Some(v),
            ResultCell::Err(_) => None,
        }
    }
}

/// A slot in the executor's results table: `None` until the owning task has run.
pub type Cell = Option<ResultCell>;