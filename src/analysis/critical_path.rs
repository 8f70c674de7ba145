// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::analysis::Adjacency;
use crate::model::{Graph, TaskId};

/// Longest cost-weighted path from `task` to any leaf in the successor graph:
/// `cost(task) + max(cost_to_completion(s) for s in successors(task))`, or just `cost(task)` if
/// `task` has no successors. The key heuristic input to the EFT scheduler (`SPEC_FULL.md` §4.B).
///
/// Computes the whole table in one pass via post-order DFS with memoization rather than
/// recomputing overlapping subpaths per call; assumes `graph`/`successors` are acyclic (the
/// scheduler checks this before calling in).
pub fn cost_to_completion_table(
    graph: &Graph,
    successors: &Adjacency,
    cost_of: impl Fn(&TaskId) -> f64,
) -> HashMap<TaskId, f64> {
    let mut memo: HashMap<TaskId, f64> = HashMap::new();
    let mut task_ids: Vec<&TaskId> = graph.keys().collect();
    task_ids.sort_by_key(|id| id.to_string());

    for task_id in task_ids {
        visit(task_id, successors, &cost_of, &mut memo);
    }
    memo
}

fn visit(
    task_id: &TaskId,
    successors: &Adjacency,
    cost_of: &impl Fn(&TaskId) -> f64,
    memo: &mut HashMap<TaskId, f64>,
) -> f64 {
    if let Some(&cached) = memo.get(task_id) {
        return cached;
    }

    let own_cost = cost_of(task_id);
    let best_successor = successors
        .get(task_id)
        .into_iter()
        .flatten()
        .map(|s| visit(s, successors, cost_of, memo))
        .fold(0.0_f64, f64::max);

    let total = own_cost + best_successor;
    memo.insert(task_id.clone(), total);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::successor_graph;
    use crate::model::{ArgNode, Dependency, TaskSpec};
    use serde_json::json;
    use std::sync::Arc;

    fn task(args: ArgNode, cost: f64) -> TaskSpec {
        TaskSpec::new(Arc::new(|_: &ArgNode| json!(null)), args, cost)
    }

    #[test]
    fn leaf_cost_to_completion_is_its_own_cost() {
        let mut graph = Graph::new();
        graph.insert(TaskId::int(0), task(json!(null).into(), 3.0));
        let successors = successor_graph(&graph);
        let table = cost_to_completion_table(&graph, &successors, |id| graph[id].cost);
        assert_eq!(table[&TaskId::int(0)], 3.0);
    }

    #[test]
    fn linear_chain_sums_along_the_path() {
        let mut graph = Graph::new();
        graph.insert(TaskId::int(0), task(json!(null).into(), 1.0));
        graph.insert(
            TaskId::int(1),
            task(ArgNode::Dependency(Dependency::new(TaskId::int(0))), 2.0),
        );
        graph.insert(
            TaskId::int(2),
            task(ArgNode::Dependency(Dependency::new(TaskId::int(1))), 4.0),
        );
        let successors = successor_graph(&graph);
        let table = cost_to_completion_table(&graph, &successors, |id| graph[id].cost);
        assert_eq!(table[&TaskId::int(2)], 4.0);
        assert_eq!(table[&TaskId::int(1)], 6.0);
        assert_eq!(table[&TaskId::int(0)], 7.0);
    }

    #[test]
    fn diamond_takes_the_more_expensive_branch() {
        let mut graph = Graph::new();
        graph.insert(TaskId::int(0), task(json!(null).into(), 1.0));
        graph.insert(
            TaskId::int(1),
            task(ArgNode::Dependency(Dependency::new(TaskId::int(0))), 2.0),
        );
        graph.insert(
            TaskId::int(2),
            task(ArgNode::Dependency(Dependency::new(TaskId::int(0))), 9.0),
        );
        graph.insert(
            TaskId::int(3),
            task(
                ArgNode::Sequence(vec![
                    ArgNode::Dependency(Dependency::new(TaskId::int(1))),
                    ArgNode::Dependency(Dependency::new(TaskId::int(2))),
                ]),
                1.0,
            ),
        );
        let successors = successor_graph(&graph);
        let table = cost_to_completion_table(&graph, &successors, |id| graph[id].cost);
        // 0 -> 2 -> 3 is the longer branch: 1 + 9 + 1 = 11
        assert_eq!(table[&TaskId::int(0)], 11.0);
    }
}