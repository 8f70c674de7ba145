// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::errors::TaskError;
use crate::model::{index_value, ArgNode, Dependency, ResultCell, TaskId, Value};

/// Replaces every [`Dependency`] leaf in `args` with the value it resolves to against `results`,
/// preserving the tree's shape (`SPEC_FULL.md` §4.D). Fails the whole call on the first
/// unresolvable leaf.
pub fn expand_args(
    args: &ArgNode,
    results: &HashMap<TaskId, ResultCell>,
) -> Result<ArgNode, TaskError> {
    match args {
        ArgNode::Scalar(v) => Ok(ArgNode::Scalar(v.clone())),
        ArgNode::Dependency(dep) => resolve_dependency(dep, results),
        ArgNode::Sequence(items) => {
            let resolved = items
                .iter()
                .map(|item| expand_args(item, results))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ArgNode::Sequence(resolved))
        }
        ArgNode::Mapping(map) => {
            let resolved = map
                .iter()
                .map(|(k, v)| expand_args(v, results).map(|v| (k.clone(), v)))
                .collect::<Result<HashMap<_, _>, _>>()?;
            Ok(ArgNode::Mapping(resolved))
        }
    }
}

fn resolve_dependency(
    dep: &Dependency,
    results: &HashMap<TaskId, ResultCell>,
) -> Result<ArgNode, TaskError> {
    let cell = results.get(&dep.task_id).ok_or_else(|| TaskError::Dependency {
        exception_type: "KeyError".to_string(),
        message: format!("task {} has not produced a result yet", dep.task_id),
    })?;

    let value = match cell {
        ResultCell::Err(e) => return Err(e.as_dependency_error()),
        ResultCell::Ok(v) => v,
    };

    let Some(selector) = &dep.key else {
        return Ok(ArgNode::Scalar(value.clone()));
    };

    let mut current: &Value = value;
    for step in selector.steps() {
        current = index_value(current, step).ok_or_else(|| TaskError::Dependency {
            exception_type: "KeyError".to_string(),
            message: format!(
                "selector {step} has no match in the result of task {}",
                dep.task_id
            ),
        })?;
    }
    Ok(ArgNode::Scalar(current.clone()))
}
