// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{ArgNode, TaskId, Value};

/// An opaque, user-supplied computation.
///
/// Task functions are treated as black boxes: the engine never inspects them beyond calling them
/// with a fully-resolved [`ArgNode`] and capturing whatever they return or panic with. A panic
/// inside `fn` is caught at the worker boundary (`executor::worker`) and turned into
/// `TaskError::User`, the Rust analogue of the source domain's "raised an exception".
pub type TaskFn = Arc<dyn Fn(&ArgNode) -> Value + Send + Sync>;

/// One node of the graph: its computation, its (possibly dependency-laden) arguments, and the
/// scheduler's cost estimate for it.
#[derive(Clone)]
pub struct TaskSpec {
    pub func: TaskFn,
    pub args: ArgNode,
    pub cost: f64,
}

impl TaskSpec {
    pub fn new(func: TaskFn, args: impl Into<ArgNode>, cost: f64) -> Self {
        Self {
            func,
            args: args.into(),
            cost,
        }
    }
}

/// A directed acyclic graph of tasks, keyed by identifier.
///
/// Acyclicity is an invariant the caller must uphold; the scheduler (`scheduler::eft`) detects
/// violations explicitly rather than looping forever (`SPEC_FULL.md` §4.C step 0).
pub type Graph = HashMap<TaskId, TaskSpec>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_fn_is_callable_through_the_arc() {
        let f: TaskFn = Arc::new(|_args: &ArgNode| json!(42));
        let spec = TaskSpec::new(f, json!(null), 0.0);
        assert_eq!((spec.func)(&spec.args), json!(42));
    }
}