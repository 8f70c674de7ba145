// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph analysis: dependency listing, successor/predecessor derivation, and the cost
//! critical-path heuristic the scheduler is built on.

mod critical_path;
mod dependencies;
mod successors;

pub use critical_path::cost_to_completion_table;
pub use dependencies::list_dependencies;
pub use successors::{reverse_graph, successor_graph, Adjacency};