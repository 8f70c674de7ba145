// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::model::{ArgNode, TaskId};

/// The set of distinct task identifiers referenced anywhere in an argument tree.
///
/// Walks mapping, sequence, and dependency leaves recursively; a bare `Dependency` at the root
/// is still just one entry in the returned set (`SPEC_FULL.md` §4.B).
pub fn list_dependencies(args: &ArgNode) -> HashSet<TaskId> {
    let mut found = HashSet::new();
    collect(args, &mut found);
    found
}

fn collect(node: &ArgNode, found: &mut HashSet<TaskId>) {
    match node {
        ArgNode::Scalar(_) => {}
        ArgNode::Dependency(dep) => {
            found.insert(dep.task_id.clone());
        }
        ArgNode::Sequence(items) => {
            for item in items {
                collect(item, found);
            }
        }
        ArgNode::Mapping(map) => {
            for value in map.values() {
                collect(value, found);
            }
        }
    }
}
