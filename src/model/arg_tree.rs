// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::model::{Dependency, Value};

/// The argument tree passed to a task: a tagged variant over scalar values, ordered sequences,
/// string-keyed mappings, and dependency references, any of which may nest.
///
/// This is the typed replacement for the source domain's duck-typed argument trees (see
/// `SPEC_FULL.md` §9): recursion over this enum is exhaustive and compiler-checked instead of
/// relying on runtime `isinstance` checks.
#[derive(Clone, Debug)]
pub enum ArgNode {
    Scalar(Value),
    Sequence(Vec<ArgNode>),
    Mapping(HashMap<String, ArgNode>),
    Dependency(Dependency),
}

impl ArgNode {
    pub fn none() -> Self {
        ArgNode::Scalar(Value::Null)
    }

    /// The scalar value at this node, if it is one. Task functions use this to pull a resolved
    /// dependency's value back out after `expand_args` has flattened it to a `Scalar`.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            ArgNode::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The elements of this node, if it is a sequence.
    pub fn as_sequence(&self) -> Option<&[ArgNode]> {
        match self {
            ArgNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Structural equivalence used by the scheduler's multiplexing pass (`SPEC_FULL.md` §4.C.1):
    /// same shape, same scalar values, same dependency fields, recursively. Mapping equivalence
    /// ignores key order but requires an identical key set.
    pub fn equivalent(&self, other: &ArgNode) -> bool {
        match (self, other) {
            (ArgNode::Scalar(a), ArgNode::Scalar(b)) => a == b,
            (ArgNode::Dependency(a), ArgNode::Dependency(b)) => a == b,
            (ArgNode::Sequence(a), ArgNode::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equivalent(y))
            }
            (ArgNode::Mapping(a), ArgNode::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|bv| v.equivalent(bv)))
            }
            _ => false,
        }
    }
}

impl From<Value> for ArgNode {
    fn from(v: Value) -> Self {
        ArgNode::Scalar(v)
    }
}

impl From<Dependency> for ArgNode {
    fn from(d: Dependency) -> Self {
        ArgNode::Dependency(d)
    }
}

impl From<Vec<ArgNode>> for ArgNode {
    fn from(v: Vec<ArgNode>) -> Self {
        ArgNode::Sequence(v)
    }
}

impl From<HashMap<String, ArgNode>> for ArgNode {
    fn from(m: HashMap<String, ArgNode>) -> Self {
        ArgNode::Mapping(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use serde_json::json;

    #[test]
    fn scalars_equivalent_by_value() {
        let a: ArgNode = json!(6).into();
        let b: ArgNode = json!(6).into();
        let c: ArgNode = json!(7).into();
        assert!(a.equivalent(&b));
        assert!(!a.equivalent(&c));
    }

    #[test]
    fn sequences_equivalent_element_wise() {
        let a = ArgNode::Sequence(vec![json!(1).into(), json!(2).into()]);
        let b = ArgNode::Sequence(vec![json!(1).into(), json!(2).into()]);
        let c = ArgNode::Sequence(vec![json!(1).into()]);
        assert!(a.equivalent(&b));
        assert!(!a.equivalent(&c));
    }

    #[test]
    fn mappings_equivalent_regardless_of_insertion_order() {
        let mut a = HashMap::new();
        a.insert("x".to_string(), ArgNode::from(json!(1)));
        a.insert("y".to_string(), ArgNode::from(json!(2)));
        let mut b = HashMap::new();
        b.insert("y".to_string(), ArgNode::from(json!(2)));
        b.insert("x".to_string(), ArgNode::from(json!(1)));
        assert!(ArgNode::Mapping(a).equivalent(&ArgNode::Mapping(b)));
    }

    #[test]
    fn dependency_leaves_compare_by_fields() {
        let a = ArgNode::Dependency(Dependency::new(TaskId::int(0)));
        let b = ArgNode::Dependency(Dependency::new(TaskId::int(0)));
        let c = ArgNode::Dependency(Dependency::new(TaskId::int(1)));
        assert!(a.equivalent(&b));
        assert!(!a.equivalent(&c));
    }

    #[test]
    fn different_shapes_never_equivalent() {
        let scalar: ArgNode = json!(1).into();
        let seq = ArgNode::Sequence(vec![json!(1).into()]);
        assert!(!scalar.equivalent(&seq));
    }
}