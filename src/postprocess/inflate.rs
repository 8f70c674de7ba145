// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::model::{ResultCell, TaskId, Value};

/// Splits a flat, identifier-keyed map into entries that pass through untouched and groups keyed
/// by the first element of a qualifying 2-tuple identifier — the partition [`inflate_results`] and
/// [`crate::executor::inflate_costs`] both nest, just over different leaf types.
pub(crate) fn split_tuple_keys<T>(
    flat: HashMap<TaskId, T>,
) -> (HashMap<TaskId, T>, HashMap<TaskId, Vec<(TaskId, T)>>) {
    let mut passthrough = HashMap::new();
    let mut groups: HashMap<TaskId, Vec<(TaskId, T)>> = HashMap::new();

    for (id, val) in flat {
        let pair = id.as_pair().map(|(a, b)| (a.clone(), b.clone()));
        match pair {
            Some((a, b)) if !matches!(b, TaskId::Tuple(_)) => {
                groups.entry(a).or_default().push((b, val));
            }
            _ => {
                passthrough.insert(id, val);
            }
        }
    }

    (passthrough, groups)
}

/// Nests a flat, identifier-keyed result map one level deep wherever the identifier is a 2-tuple
/// of scalars (`SPEC_FULL.md` §4.F): `(a, b) -> value` entries are grouped by `a` into a single
/// `a -> {b: value, ...}` entry. Identifiers whose second element is itself a tuple are left
/// alone, and non-tuple identifiers pass through unchanged — so a second pass over already
/// inflated output is a no-op.
///
/// If any member of a group is an `Err` cell, the whole group collapses to that error rather than
/// silently reporting a partial object — the first error in `b`-sorted order wins, for
/// determinism.
///
/// Cost telemetry nests the same way (`SPEC_FULL.md` §4.E): [`crate::executor::inflate_costs`]
/// reuses [`split_tuple_keys`] so a tuple-keyed task's cost entry ends up grouped under the same
/// key its result does.
pub fn inflate_results(flat: HashMap<TaskId, ResultCell>) -> HashMap<TaskId, ResultCell> {
    let (mut out, groups) = split_tuple_keys(flat);

    for (group_key, mut members) in groups {
        members.sort_by(|(b1, _), (b2, _)| b1.to_string().cmp(&b2.to_string()));
        let mut object = serde_json::Map::new();
        let mut error = None;
        for (b, cell) in members {
            match cell {
                ResultCell::Ok(value) => {
                    object.insert(b.to_string(), value);
                }
                ResultCell::Err(e) => {
                    error.get_or_insert(e);
                }
            }
        }
        let grouped = match error {
            Some(e) => ResultCell::Err(e),
            None => ResultCell::Ok(Value::Object(object)),
        };
        out.insert(group_key, grouped);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TaskError;
    use serde_json::json;

    #[test]
    fn groups_two_tuple_keys_by_their_first_element() {
        let mut flat = HashMap::new();
        flat.insert(
            TaskId::tuple2(TaskId::str("worker"), TaskId::int(0)),
            ResultCell::Ok(json!("a")),
        );
        flat.insert(
            TaskId::tuple2(TaskId::str("worker"), TaskId::int(1)),
            ResultCell::Ok(json!("b")),
        );
        let inflated = inflate_results(flat);
        assert_eq!(inflated.len(), 1);
        let cell = &inflated[&TaskId::str("worker")];
        assert!(matches!(cell, ResultCell::Ok(v) if *v == json!({"0": "a", "1": "b"})));
    }

    #[test]
    fn non_tuple_identifiers_pass_through() {
        let mut flat = HashMap::new();
        flat.insert(TaskId::int(0), ResultCell::Ok(json!(42)));
        let inflated = inflate_results(flat.clone());
        assert_eq!(inflated.len(), 1);
        assert!(matches!(inflated[&TaskId::int(0)], ResultCell::Ok(ref v) if *v == json!(42)));
    }

    #[test]
    fn a_second_pass_over_inflated_output_is_a_no_op() {
        let mut flat = HashMap::new();
        flat.insert(
            TaskId::tuple2(TaskId::str("g"), TaskId::int(0)),
            ResultCell::Ok(json!(1)),
        );
        let once = inflate_results(flat);
        let twice = inflate_results(once.clone());
        assert_eq!(once.len(), twice.len());
        assert!(matches!(twice[&TaskId::str("g")], ResultCell::Ok(ref v) if *v == json!({"0": 1})));
    }

    #[test]
    fn tuples_nested_inside_the_second_element_are_not_recursed() {
        let mut flat = HashMap::new();
        let inner = TaskId::tuple2(TaskId::int(1), TaskId::int(2));
        flat.insert(
            TaskId::tuple2(TaskId::str("g"), inner.clone()),
            ResultCell::Ok(json!("x")),
        );
        let inflated = inflate_results(flat);
        // Second element is itself a tuple, so this identifier is left alone.
        assert!(inflated.contains_key(&TaskId::tuple2(TaskId::str("g"), inner)));
    }

    #[test]
    fn one_errored_member_fails_the_whole_group() {
        let mut flat = HashMap::new();
        flat.insert(
            TaskId::tuple2(TaskId::str("g"), TaskId::int(0)),
            ResultCell::Ok(json!(1)),
        );
        flat.insert(
            TaskId::tuple2(TaskId::str("g"), TaskId::int(1)),
            ResultCell::Err(TaskError::user_tagged("ValueError", "boom")),
        );
        let inflated = inflate_results(flat);
        assert!(matches!(inflated[&TaskId::str("g")], ResultCell::Err(_)));
    }
}