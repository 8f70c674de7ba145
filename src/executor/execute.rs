// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Select, Sender};

use crate::analysis::list_dependencies;
use crate::errors::{PostprocessError, TaskError};
use crate::executor::costs::{flat_costs, inflate_costs, CostEntry, Costs};
use crate::executor::worker::{self, Completion, Dispatch};
use crate::model::{ArgNode, ResultCell, TaskFn, TaskId};
use crate::observability::messages::executor::{
    DispatchStarted, ExecutionCompleted, WorkerAbandoned, WorkerRespawned,
};
use crate::observability::messages::StructuredLog;
use crate::postprocess::collect_results;
use crate::resolver::expand_args;
use crate::scheduler::Slot;

/// What [`execute_task_lists`] hands back: the identifier-keyed results and, when requested, the
/// per-task cost telemetry.
pub struct ExecutionOutput {
    pub results: HashMap<TaskId, ResultCell>,
    pub costs: Option<Costs>,
}

struct PendingSlot {
    dispatch_time: Instant,
    ids: Vec<TaskId>,
    wait_time: Duration,
    predecessor_wait: HashMap<TaskId, Duration>,
}

/// Runs a scheduled set of worker lists to completion, honoring the dependency partial order
/// across workers, and returns the identifier-keyed outcome (`SPEC_FULL.md` §4.E).
///
/// `task_ids` names each slot, exactly as produced by [`crate::scheduler::earliest_finish_time`];
/// pass `None` only for hand-built `task_lists` that are known never to multiplex — `Some` is
/// required whenever a schedule might have merged equivalent ready tasks, since multiplexing
/// information lives entirely in the `Slot` labels.
pub fn execute_task_lists(
    task_lists: Vec<Vec<(TaskFn, ArgNode)>>,
    task_ids: Option<Vec<Vec<Slot>>>,
    timeout: Option<Duration>,
    costs: bool,
    inflate: bool,
) -> Result<ExecutionOutput, PostprocessError> {
    let workers = task_lists.len();
    if workers == 0 {
        return Ok(ExecutionOutput {
            results: HashMap::new(),
            costs: costs.then(|| flat_costs(HashMap::new())),
        });
    }

    if task_ids.is_none() && would_need_multiplexing(&task_lists) {
        return Err(PostprocessError::MultiplexWithoutIds);
    }

    DispatchStarted { workers, timeout }.log();
    let started_at = Instant::now();

    let mut dispatch_txs: Vec<Sender<Dispatch>> = Vec::with_capacity(workers);
    let mut completion_rxs: Vec<Receiver<Completion>> = Vec::with_capacity(workers);
    for _ in 0..workers {
        let (dispatch_tx, dispatch_rx) = bounded(1);
        let (completion_tx, completion_rx) = bounded(1);
        thread::spawn(move || worker::run(dispatch_rx, completion_tx));
        dispatch_txs.push(dispatch_tx);
        completion_rxs.push(completion_rx);
    }

    let mut cursors = vec![0usize; workers];
    let mut busy: Vec<Option<PendingSlot>> = (0..workers).map(|_| None).collect();
    let mut raw: Vec<Vec<ResultCell>> = task_lists.iter().map(|l| Vec::with_capacity(l.len())).collect();
    let mut results: HashMap<TaskId, ResultCell> = HashMap::new();
    let mut finished_at: HashMap<TaskId, Instant> = HashMap::new();
    let mut costs_table: HashMap<TaskId, CostEntry> = HashMap::new();

    loop {
        let mut progressed = false;

        for w in 0..workers {
            while busy[w].is_none() && cursors[w] < task_lists[w].len() {
                let (func, args) = task_lists[w][cursors[w]].clone();
                let ids = ids_for(task_ids.as_deref(), w, cursors[w]);
                let deps = list_dependencies(&args);
                if !deps.iter().all(|d| results.contains_key(d)) {
                    break;
                }

                match expand_args(&args, &results) {
                    Err(dep_err) => {
                        let cell = ResultCell::Err(dep_err);
                        let now = Instant::now();
                        for id in &ids {
                            results.insert(id.clone(), cell.clone());
                            finished_at.insert(id.clone(), now);
                        }
                        raw[w].push(cell);
                        cursors[w] += 1;
                        progressed = true;
                    }
                    Ok(resolved) => {
                        let now = Instant::now();
                        let wait_time = deps
                            .iter()
                            .map(|d| now.saturating_duration_since(finished_at[d]))
                            .max()
                            .unwrap_or(Duration::ZERO);
                        let predecessor_wait = deps
                            .iter()
                            .map(|d| (d.clone(), now.saturating_duration_since(finished_at[d])))
                            .collect();
                        dispatch_txs[w]
                            .send(Dispatch {
                                func,
                                args: resolved,
                            })
                            .expect("worker thread outlives its own dispatch channel");
                        busy[w] = Some(PendingSlot {
                            dispatch_time: now,
                            ids,
                            wait_time,
                            predecessor_wait,
                        });
                        progressed = true;
                        break;
                    }
                }
            }
        }

        let all_idle_and_done = busy.iter().all(Option::is_none)
            && (0..workers).all(|w| cursors[w] >= task_lists[w].len());
        if all_idle_and_done {
            break;
        }

        let busy_workers: Vec<usize> = (0..workers).filter(|&w| busy[w].is_some()).collect();
        if busy_workers.is_empty() {
            if !progressed {
                unreachable!(
                    "a scheduled task's dependencies can never become ready: the graph was not \
                     acyclic, or task_ids does not match task_lists"
                );
            }
            continue;
        }

        let mut select = Select::new();
        for &w in &busy_workers {
            select.recv(&completion_rxs[w]);
        }

        let completed = match timeout {
            None => {
                let oper = select.select();
                let local = oper.index();
                let w = busy_workers[local];
                let completion = oper
                    .recv(&completion_rxs[w])
                    .expect("worker thread alive while marked busy");
                Some((w, completion))
            }
            Some(limit) => {
                let deadline = busy_workers
                    .iter()
                    .map(|&w| busy[w].as_ref().expect("in busy_workers").dispatch_time + limit)
                    .min()
                    .expect("busy_workers is non-empty");
                let wait = deadline.saturating_duration_since(Instant::now());
                match select.select_timeout(wait) {
                    Ok(oper) => {
                        let local = oper.index();
                        let w = busy_workers[local];
                        let completion = oper
                            .recv(&completion_rxs[w])
                            .expect("worker thread alive while marked busy");
                        Some((w, completion))
                    }
                    Err(_) => None,
                }
            }
        };
        drop(select);

        match completed {
            Some((w, completion)) => {
                let pending = busy[w].take().expect("recv came from a busy worker");
                record_completion(
                    w,
                    pending,
                    completion,
                    costs,
                    &mut results,
                    &mut finished_at,
                    &mut raw,
                    &mut costs_table,
                );
                cursors[w] += 1;
            }
            None => {
                let now = Instant::now();
                let limit = timeout.expect("select_timeout only taken when timeout is set");
                for &w in &busy_workers {
                    let expired = busy[w]
                        .as_ref()
                        .map(|p| now >= p.dispatch_time + limit)
                        .unwrap_or(false);
                    if expired {
                        abandon_worker(
                            w,
                            &mut busy,
                            &mut dispatch_txs,
                            &mut completion_rxs,
                            &mut results,
                            &mut finished_at,
                            &mut raw,
                            &mut cursors,
                        );
                    }
                }
            }
        }
    }

    let mut collected = collect_results(raw, task_ids.as_deref())?;
    if inflate {
        collected = crate::postprocess::inflate_results(collected);
    }

    let failure_count = collected.values().filter(|c| c.is_err()).count();
    ExecutionCompleted {
        task_count: collected.len(),
        failure_count,
        duration: started_at.elapsed(),
    }
    .log();

    Ok(ExecutionOutput {
        results: collected,
        costs: costs.then(|| {
            if inflate {
                inflate_costs(costs_table)
            } else {
                flat_costs(costs_table)
            }
        }),
    })
}

fn ids_for(task_ids: Option<&[Vec<Slot>]>, worker: usize, index: usize) -> Vec<TaskId> {
    match task_ids {
        Some(ids) => ids[worker][index].ids().to_vec(),
        None => vec![TaskId::tuple2(
            TaskId::int(worker as i64),
            TaskId::int(index as i64),
        )],
    }
}

/// Conservative pre-flight check for the `task_ids = None` path: scans for any two dispatch
/// entries sharing both callable identity and structurally-equivalent arguments, the same
/// condition the scheduler uses to multiplex. Without `Slot` labels there is no identifier under
/// which to recover such a pair's aliases, so this is refused up front.
fn would_need_multiplexing(task_lists: &[Vec<(TaskFn, ArgNode)>]) -> bool {
    let flat: Vec<&(TaskFn, ArgNode)> = task_lists.iter().flatten().collect();
    for i in 0..flat.len() {
        for other in &flat[i + 1..] {
            if Arc::ptr_eq(&flat[i].0, &other.0) && flat[i].1.equivalent(&other.1) {
                return true;
            }
        }
    }
    false
}

fn record_completion(
    worker: usize,
    pending: PendingSlot,
    completion: Completion,
    costs: bool,
    results: &mut HashMap<TaskId, ResultCell>,
    finished_at: &mut HashMap<TaskId, Instant>,
    raw: &mut [Vec<ResultCell>],
    costs_table: &mut HashMap<TaskId, CostEntry>,
) {
    let now = Instant::now();
    for id in &pending.ids {
        results.insert(id.clone(), completion.cell.clone());
        finished_at.insert(id.clone(), now);
    }
    raw[worker].push(completion.cell.clone());

    if costs {
        let entry = CostEntry {
            wall_time: completion.wall_time,
            wait_time: pending.wait_time,
            predecessor_wait: pending.predecessor_wait,
        };
        for id in &pending.ids {
            costs_table.insert(id.clone(), entry.clone());
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn abandon_worker(
    worker: usize,
    busy: &mut [Option<PendingSlot>],
    dispatch_txs: &mut [Sender<Dispatch>],
    completion_rxs: &mut [Receiver<Completion>],
    results: &mut HashMap<TaskId, ResultCell>,
    finished_at: &mut HashMap<TaskId, Instant>,
    raw: &mut [Vec<ResultCell>],
    cursors: &mut [usize],
) {
    let pending = busy[worker]
        .take()
        .expect("abandon_worker called on an idle worker");
    WorkerAbandoned {
        worker,
        task_ids: &pending.ids,
    }
    .log();

    let now = Instant::now();
    let cell = ResultCell::Err(TaskError::Timeout);
    for id in &pending.ids {
        results.insert(id.clone(), cell.clone());
        finished_at.insert(id.clone(), now);
    }
    raw[worker].push(cell);
    cursors[worker] += 1;

    let (dispatch_tx, dispatch_rx) = bounded(1);
    let (completion_tx, completion_rx) = bounded(1);
    thread::spawn(move || worker::run(dispatch_rx, completion_tx));
    dispatch_txs[worker] = dispatch_tx;
    completion_rxs[worker] = completion_rx;
    WorkerRespawned { worker }.log();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::costs::CostValue;
    use serde_json::json;

    fn task(f: impl Fn(&ArgNode) -> crate::model::Value + Send + Sync + 'static) -> TaskFn {
        Arc::new(f)
    }

    #[test]
    fn costs_are_recorded_per_task_when_requested() {
        let task_lists = vec![vec![(task(|_| json!(1)), ArgNode::none())]];
        let task_ids = vec![vec![Slot::Single(TaskId::int(0))]];

        let output =
            execute_task_lists(task_lists, Some(task_ids), None, true, false).unwrap();

        let costs = output.costs.expect("costs=true must populate costs");
        match &costs[&TaskId::int(0)] {
            CostValue::Entry(_) => {}
            other => panic!("expected a flat Entry, got {other:?}"),
        }
    }

    #[test]
    fn costs_default_to_none_when_not_requested() {
        let task_lists = vec![vec![(task(|_| json!(1)), ArgNode::none())]];
        let task_ids = vec![vec![Slot::Single(TaskId::int(0))]];

        let output =
            execute_task_lists(task_lists, Some(task_ids), None, false, false).unwrap();
        assert!(output.costs.is_none());
    }

    #[test]
    fn costs_nest_the_same_way_results_do_when_inflated() {
        let shared = task(|_| json!("v"));
        let task_lists = vec![vec![(shared, ArgNode::none())]];
        let task_ids = vec![vec![Slot::Multiplexed(vec![
            TaskId::tuple2(TaskId::str("g"), TaskId::int(0)),
            TaskId::tuple2(TaskId::str("g"), TaskId::int(1)),
        ])]];

        let output =
            execute_task_lists(task_lists, Some(task_ids), None, true, true).unwrap();

        assert!(matches!(
            output.results[&TaskId::str("g")],
            ResultCell::Ok(ref v) if *v == json!({"0": "v", "1": "v"})
        ));

        let costs = output.costs.expect("costs=true must populate costs");
        match &costs[&TaskId::str("g")] {
            CostValue::Group(members) => {
                assert_eq!(members.len(), 2);
                assert!(members.contains_key(&TaskId::int(0)));
                assert!(members.contains_key(&TaskId::int(1)));
            }
            other => panic!("expected a Group, got {other:?}"),
        }
    }

    #[test]
    fn multiplexed_aliases_receive_equal_results_and_costs() {
        let shared = task(|_| json!(42));
        let task_lists = vec![vec![(shared, ArgNode::none())]];
        let task_ids = vec![vec![Slot::Multiplexed(vec![TaskId::int(0), TaskId::int(1)])]];

        let output =
            execute_task_lists(task_lists, Some(task_ids), None, true, false).unwrap();

        assert!(matches!(output.results[&TaskId::int(0)], ResultCell::Ok(ref v) if *v == json!(42)));
        assert!(matches!(output.results[&TaskId::int(1)], ResultCell::Ok(ref v) if *v == json!(42)));
        let costs = output.costs.unwrap();
        match (&costs[&TaskId::int(0)], &costs[&TaskId::int(1)]) {
            (CostValue::Entry(a), CostValue::Entry(b)) => {
                assert_eq!(a.wall_time, b.wall_time);
            }
            other => panic!("expected two flat entries, got {other:?}"),
        }
    }

    #[test]
    fn task_ids_none_with_a_multiplexable_pair_is_rejected() {
        let shared: TaskFn = Arc::new(|_: &ArgNode| json!("x"));
        let task_lists = vec![
            vec![(shared.clone(), ArgNode::from(json!("same")))],
            vec![(shared, ArgNode::from(json!("same")))],
        ];

        let result = execute_task_lists(task_lists, None, None, false, false);
        assert_eq!(result.unwrap_err(), PostprocessError::MultiplexWithoutIds);
    }

    #[test]
    fn a_later_task_on_an_abandoned_worker_still_runs_on_the_respawned_worker() {
        let task_lists = vec![vec![
            (
                task(|_| {
                    std::thread::sleep(Duration::from_millis(200));
                    json!("late")
                }),
                ArgNode::none(),
            ),
            (task(|_| json!("after respawn")), ArgNode::none()),
        ]];
        let task_ids = vec![vec![
            Slot::Single(TaskId::int(0)),
            Slot::Single(TaskId::int(1)),
        ]];

        let output = execute_task_lists(
            task_lists,
            Some(task_ids),
            Some(Duration::from_millis(20)),
            false,
            false,
        )
        .unwrap();

        assert!(matches!(output.results[&TaskId::int(0)], ResultCell::Err(TaskError::Timeout)));
        assert!(matches!(
            output.results[&TaskId::int(1)],
            ResultCell::Ok(ref v) if *v == json!("after respawn")
        ));
    }
}