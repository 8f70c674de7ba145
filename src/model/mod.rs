// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Core data types for the task graph: identifiers, dependency references, argument trees,
//! result cells, and the graph itself.

mod arg_tree;
mod dependency;
mod graph;
mod result_cell;
mod task_id;
mod value;

pub use arg_tree::ArgNode;
pub use dependency::{Dependency, Selector};
pub use graph::{Graph, TaskFn, TaskSpec};
pub use result_cell::{Cell, ResultCell};
pub use task_id::{Atom, TaskId};
pub use value::{index_value, Value};