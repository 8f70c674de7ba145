// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::{cost_to_completion_table, list_dependencies, successor_graph};
use crate::errors::SchedulingError;
use crate::model::{ArgNode, Graph, TaskFn, TaskId};
use crate::observability::messages::scheduler::{
    CycleDetected, SchedulingCompleted, SchedulingStarted, TaskPlaced,
};
use crate::observability::messages::StructuredLog;

/// One dispatched slot in a worker's list: either a single task, or a non-empty group of task
/// identifiers whose shared `(fn, args)` execution was multiplexed (`SPEC_FULL.md` §4.C step 7).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Single(TaskId),
    Multiplexed(Vec<TaskId>),
}

impl Slot {
    /// All task identifiers this slot resolves to, whether single or multiplexed.
    pub fn ids(&self) -> &[TaskId] {
        match self {
            Slot::Single(id) => std::slice::from_ref(id),
            Slot::Multiplexed(ids) => ids,
        }
    }
}

/// The output of [`earliest_finish_time`]: a per-worker list of `(fn, args)` pairs to run, and a
/// parallel list naming which task identifier(s) each slot satisfies.
pub struct Schedule {
    pub task_lists: Vec<Vec<(TaskFn, ArgNode)>>,
    pub task_ids: Vec<Vec<Slot>>,
}

impl Schedule {
    pub fn workers(&self) -> usize {
        self.task_lists.len()
    }
}

/// Partitions `graph` across `workers` parallel lists using an Earliest-Finish-Time heuristic
/// driven by each task's cost-to-completion (longest remaining critical path).
///
/// `SPEC_FULL.md` §4.C. `output_tasks`, if given, prunes the graph to the transitive predecessor
/// closure of those tasks first. `timeout`, if given, caps the cost seen by the critical-path
/// heuristic (not the cost used for actual dispatch — that is still the task's literal `cost`).
pub fn earliest_finish_time(
    graph: &Graph,
    workers: usize,
    output_tasks: Option<&[TaskId]>,
    timeout: Option<f64>,
) -> Result<Schedule, SchedulingError> {
    if workers < 1 {
        return Err(SchedulingError::NoWorkers(workers));
    }

    SchedulingStarted {
        task_count: graph.len(),
        workers,
    }
    .log();

    if let Some(outputs) = output_tasks {
        for id in outputs {
            if !graph.contains_key(id) {
                return Err(SchedulingError::UnknownOutputTask(id.clone()));
            }
        }
    }

    check_acyclic(graph)?;

    let working_set: HashSet<TaskId> = match output_tasks {
        Some(outputs) => transitive_predecessors(graph, outputs),
        None => graph.keys().cloned().collect(),
    };

    let mut task_ids: Vec<&TaskId> = working_set.iter().collect();
    task_ids.sort_by_key(|id| id.to_string());
    let insertion_order: HashMap<TaskId, usize> = task_ids
        .iter()
        .enumerate()
        .map(|(i, id)| ((*id).clone(), i))
        .collect();

    let pruned: Graph = task_ids
        .iter()
        .map(|id| ((*id).clone(), graph[*id].clone()))
        .collect();
    let successors = successor_graph(&pruned);

    let capped_cost = |id: &TaskId| -> f64 {
        let raw = pruned[id].cost;
        match timeout {
            Some(t) if raw > t => t,
            _ => raw,
        }
    };
    let priority = cost_to_completion_table(&pruned, &successors, capped_cost);

    // Dependency counts gate readiness; the union of each task's own dependency set (not its
    // successors) drives both readiness and the earliest-start computation below.
    let mut remaining_deps: HashMap<TaskId, HashSet<TaskId>> = task_ids
        .iter()
        .map(|id| ((*id).clone(), list_dependencies(&pruned[*id].args)))
        .collect();

    let mut ready: Vec<TaskId> = task_ids
        .iter()
        .filter(|id| remaining_deps[*id].is_empty())
        .map(|id| (*id).clone())
        .collect();

    let mut placed: HashSet<TaskId> = HashSet::new();
    let mut finish_time: HashMap<TaskId, f64> = HashMap::new();
    let mut clocks = vec![0.0_f64; workers];

    let mut task_lists: Vec<Vec<(TaskFn, ArgNode)>> = vec![Vec::new(); workers];
    let mut slot_ids: Vec<Vec<Slot>> = vec![Vec::new(); workers];

    while placed.len() < task_ids.len() {
        // Highest cost-to-completion first; ties broken by the deterministic insertion order
        // established when the working set was sorted.
        ready.sort_by(|a, b| {
            priority[b]
                .partial_cmp(&priority[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| insertion_order[a].cmp(&insertion_order[b]))
        });
        let primary = ready.remove(0);

        // Multiplexing: merge any other ready task that shares this one's callable identity and
        // structurally-equivalent arguments into a single execution (`SPEC_FULL.md` §4.C.1).
        let primary_spec = &pruned[&primary];
        let mut group = vec![primary.clone()];
        ready.retain(|candidate| {
            let candidate_spec = &pruned[candidate];
            let equivalent = Arc::ptr_eq(&primary_spec.func, &candidate_spec.func)
                && primary_spec.args.equivalent(&candidate_spec.args);
            if equivalent {
                group.push(candidate.clone());
                false
            } else {
                true
            }
        });

        let deps_union: HashSet<TaskId> = group
            .iter()
            .flat_map(|id| list_dependencies(&pruned[id].args))
            .collect();
        let ready_time = deps_union
            .iter()
            .map(|dep| finish_time[dep])
            .fold(0.0_f64, f64::max);

        let (worker, start) = (0..workers)
            .map(|w| (w, ready_time.max(clocks[w])))
            .min_by(|a, b| {
                (a.1 + primary_spec.cost)
                    .partial_cmp(&(b.1 + primary_spec.cost))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            })
            .expect("workers >= 1");

        let end = start + primary_spec.cost;
        clocks[worker] = end;
        for id in &group {
            finish_time.insert(id.clone(), end);
            placed.insert(id.clone());
        }

        task_lists[worker].push((primary_spec.func.clone(), primary_spec.args.clone()));
        TaskPlaced {
            worker,
            task_ids: &group,
            start,
            cost: primary_spec.cost,
        }
        .log();
        slot_ids[worker].push(if group.len() == 1 {
            Slot::Single(group.into_iter().next().unwrap())
        } else {
            Slot::Multiplexed(group)
        });

        // Placing this group may free up its dependents.
        for id in &task_ids {
            if placed.contains(*id) {
                continue;
            }
            let deps = remaining_deps.get_mut(*id).expect("tracked above");
            let newly_cleared: Vec<TaskId> = deps
                .iter()
                .filter(|d| finish_time.contains_key(*d))
                .cloned()
                .collect();
            for d in newly_cleared {
                deps.remove(&d);
            }
            if deps.is_empty() && !ready.contains(*id) {
                ready.push((*id).clone());
            }
        }
    }

    SchedulingCompleted {
        task_count: task_ids.len(),
        workers,
        makespan: clocks.iter().cloned().fold(0.0_f64, f64::max),
    }
    .log();

    Ok(Schedule {
        task_lists,
        task_ids: slot_ids,
    })
}

fn transitive_predecessors(graph: &Graph, roots: &[TaskId]) -> HashSet<TaskId> {
    let mut visited = HashSet::new();
    let mut stack: Vec<TaskId> = roots.to_vec();
    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        if let Some(spec) = graph.get(&id) {
            for dep in list_dependencies(&spec.args) {
                stack.push(dep);
            }
        }
    }
    visited
}

fn check_acyclic(graph: &Graph) -> Result<(), SchedulingError> {
    let mut indegree: HashMap<TaskId, usize> = graph
        .keys()
        .map(|id| (id.clone(), list_dependencies(&graph[id].args).len()))
        .collect();
    let successors = successor_graph(graph);

    let mut queue: Vec<TaskId> = indegree
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(id, _)| id.clone())
        .collect();
    queue.sort_by_key(|id| id.to_string());

    let mut visited = 0usize;
    let mut i = 0;
    while i < queue.len() {
        let current = queue[i].clone();
        i += 1;
        visited += 1;
        for successor in &successors[&current] {
            let entry = indegree.get_mut(successor).expect("tracked above");
            *entry -= 1;
            if *entry == 0 {
                queue.push(successor.clone());
            }
        }
    }

    if visited < graph.len() {
        let stuck = graph
            .keys()
            .find(|id| indegree[*id] > 0)
            .expect("some task must remain if visited < len");
        CycleDetected { task_id: stuck }.log();
        return Err(SchedulingError::CyclicGraph(stuck.clone()));
    }
    Ok(())
}
