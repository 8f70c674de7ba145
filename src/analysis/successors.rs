// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::analysis::list_dependencies;
use crate::model::{Graph, TaskId};

/// An adjacency map: task id → the tasks it points to (successors for a predecessor map, or vice
/// versa after [`reverse_graph`]).
pub type Adjacency = HashMap<TaskId, Vec<TaskId>>;

/// For each task, the tasks whose argument tree references it — i.e. its direct successors.
///
/// `SPEC_FULL.md` §4.B. Every task in `graph` gets an entry, even if its successor list is empty,
/// so downstream lookups can use plain indexing rather than `unwrap_or_default`.
pub fn successor_graph(graph: &Graph) -> Adjacency {
    let mut successors: Adjacency = graph.keys().map(|id| (id.clone(), Vec::new())).collect();

    let mut task_ids: Vec<&TaskId> = graph.keys().collect();
    task_ids.sort_by_key(|id| id.to_string());

    for task_id in task_ids {
        let spec = &graph[task_id];
        let mut deps: Vec<TaskId> = list_dependencies(&spec.args).into_iter().collect();
        deps.sort_by_key(|id| id.to_string());
        for dep in deps {
            if let Some(entry) = successors.get_mut(&dep) {
                entry.push(task_id.clone());
            }
        }
    }

    successors
}

/// Reverses a simple adjacency mapping: if `a -> [b, c]` in `adjacency`, the result has
/// `b -> [a]` and `c -> [a]`.
pub fn reverse_graph(adjacency: &Adjacency) -> Adjacency {
    let mut reversed: Adjacency = adjacency.keys().map(|id| (id.clone(), Vec::new())).collect();
    for (from, tos) in adjacency {
        for to in tos {
            reversed.entry(to.clone()).or_default().push(from.clone());
        }
    }
    reversed
}
