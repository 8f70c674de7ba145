// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::errors::PostprocessError;
use crate::model::{ResultCell, TaskId};
use crate::scheduler::Slot;

/// Flattens the executor's per-worker, in-order result cells into a single identifier-keyed map
/// (`SPEC_FULL.md` §4.F).
///
/// `task_ids[w][i]` names the task(s) that `raw[w][i]` satisfies; a [`Slot::Multiplexed`] entry
/// fans its one cell out to every aliased identifier (cloned, not recomputed). When `task_ids` is
/// absent, synthetic `(worker, index)` tuple identifiers are used instead — valid only for raw
/// output that was never multiplexed, since there is then no identifier under which to recover an
/// alias.
pub fn collect_results(
    raw: Vec<Vec<ResultCell>>,
    task_ids: Option<&[Vec<Slot>]>,
) -> Result<HashMap<TaskId, ResultCell>, PostprocessError> {
    let mut out = HashMap::new();
    match task_ids {
        Some(ids) => {
            for (w, list) in raw.into_iter().enumerate() {
                for (i, cell) in list.into_iter().enumerate() {
                    match &ids[w][i] {
                        Slot::Single(id) => {
                            out.insert(id.clone(), cell);
                        }
                        Slot::Multiplexed(aliases) => {
                            for id in aliases {
                                out.insert(id.clone(), cell.clone());
                            }
                        }
                    }
                }
            }
        }
        None => {
            for (w, list) in raw.into_iter().enumerate() {
                for (i, cell) in list.into_iter().enumerate() {
                    let id = TaskId::tuple2(TaskId::int(w as i64), TaskId::int(i as i64));
                    out.insert(id, cell);
                }
            }
        }
    }
    Ok(out)
}
