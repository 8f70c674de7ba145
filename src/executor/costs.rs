// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::time::Duration;

use crate::model::TaskId;
use crate::postprocess::split_tuple_keys;

/// Per-task timing telemetry recorded during execution, surfaced when `costs=true`
/// (`SPEC_FULL.md` §4.E).
#[derive(Clone, Debug, Default)]
pub struct CostEntry {
    /// Wall-clock time of the user function itself, measured on the worker.
    pub wall_time: Duration,
    /// Time between this task becoming ready (its last dependency completing) and being
    /// dispatched to a worker.
    pub wait_time: Duration,
    /// For each dependency, the delay between that dependency's completion and this task's
    /// dispatch — the bottleneck predecessor reads as (close to) zero.
    pub predecessor_wait: HashMap<TaskId, Duration>,
}

/// One entry of a returned cost table: a single task's telemetry, or — once inflated — the
/// nested group a tuple-keyed identifier produced, mirroring the structure
/// [`crate::postprocess::inflate_results`] builds for the result map itself.
#[derive(Clone, Debug)]
pub enum CostValue {
    Entry(CostEntry),
    Group(HashMap<TaskId, CostEntry>),
}

/// Cost telemetry for a whole run, keyed by the same identifiers as the result map.
pub type Costs = HashMap<TaskId, CostValue>;

/// Wraps a flat cost table with no nesting — used when `inflate=false`.
pub(crate) fn flat_costs(raw: HashMap<TaskId, CostEntry>) -> Costs {
    raw.into_iter()
        .map(|(id, entry)| (id, CostValue::Entry(entry)))
        .collect()
}

/// Nests a flat cost table the same way [`crate::postprocess::inflate_results`] nests results
/// (`SPEC_FULL.md` §4.E: costs mirror the task-id structure results do once inflated): 2-tuple
/// identifiers `(a, b)` group into a single `a` entry holding every `b -> CostEntry`.
pub(crate) fn inflate_costs(raw: HashMap<TaskId, CostEntry>) -> Costs {
    let (passthrough, groups) = split_tuple_keys(raw);
    let mut out: Costs = passthrough
        .into_iter()
        .map(|(id, entry)| (id, CostValue::Entry(entry)))
        .collect();
    for (group_key, members) in groups {
        out.insert(group_key, CostValue::Group(members.into_iter().collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(wall_secs: u64) -> CostEntry {
        CostEntry {
            wall_time: Duration::from_secs(wall_secs),
            wait_time: Duration::ZERO,
            predecessor_wait: HashMap::new(),
        }
    }

    #[test]
    fn flat_costs_wraps_every_entry_without_nesting() {
        let mut raw = HashMap::new();
        raw.insert(TaskId::int(0), entry(1));
        raw.insert(TaskId::tuple2(TaskId::int(0), TaskId::int(1)), entry(2));
        let flat = flat_costs(raw);
        assert!(matches!(flat[&TaskId::int(0)], CostValue::Entry(_)));
        assert!(matches!(
            flat[&TaskId::tuple2(TaskId::int(0), TaskId::int(1))],
            CostValue::Entry(_)
        ));
    }

    #[test]
    fn inflate_costs_groups_tuple_keys_like_inflate_results_does() {
        let mut raw = HashMap::new();
        raw.insert(TaskId::tuple2(TaskId::str("g"), TaskId::int(0)), entry(1));
        raw.insert(TaskId::tuple2(TaskId::str("g"), TaskId::int(1)), entry(2));
        raw.insert(TaskId::int(5), entry(3));

        let costs = inflate_costs(raw);
        assert_eq!(costs.len(), 2);
        match &costs[&TaskId::str("g")] {
            CostValue::Group(members) => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[&TaskId::int(0)].wall_time, Duration::from_secs(1));
                assert_eq!(members[&TaskId::int(1)].wall_time, Duration::from_secs(2));
            }
            other => panic!("expected a Group, got {other:?}"),
        }
        assert!(matches!(costs[&TaskId::int(5)], CostValue::Entry(_)));
    }

    #[test]
    fn inflate_costs_is_a_no_op_on_non_tuple_keys() {
        let mut raw = HashMap::new();
        raw.insert(TaskId::str("a"), entry(1));
        let costs = inflate_costs(raw);
        assert_eq!(costs.len(), 1);
        assert!(matches!(costs[&TaskId::str("a")], CostValue::Entry(_)));
    }
}