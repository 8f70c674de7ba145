// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// The concrete value type flowing through the graph: task arguments resolve to these, and task
/// functions return them.
///
/// `serde_json::Value` gives us the source domain's dynamically-typed leaves (numbers, strings,
/// bools, null) plus its two container shapes (arrays, objects) with total, always-boolean
/// equality — see `SPEC_FULL.md` §4.C.1 for why that sidesteps the source's element-wise
/// equality fallback.
pub type Value = serde_json::Value;

/// Index a [`Value`] by a single [`crate::model::Atom`] selector: a string key into an object, or
/// an integer index into an array.
pub fn index_value<'a>(
    value: &'a Value,
    selector: &crate::model::Atom,
) -> Option<&'a Value> {
    use crate::model::Atom;
    match selector {
        Atom::Str(key) => value.as_object().and_then(|m| m.get(key)),
        Atom::Int(i) => {
            let idx = usize::try_from(*i).ok()?;
            value.as_array().and_then(|a| a.get(idx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;
    use serde_json::json;

    #[test]
    fn indexes_object_by_string_key() {
        let v = json!({"a": 6});
        assert_eq!(index_value(&v, &Atom::from("a")), Some(&json!(6)));
    }

    #[test]
    fn indexes_array_by_integer() {
        let v = json!([8, 9, 10]);
        assert_eq!(index_value(&v, &Atom::Int(2)), Some(&json!(10)));
    }

    #[test]
    fn missing_key_or_out_of_range_is_none() {
        let v = json!({"a": 6});
        assert_eq!(index_value(&v, &Atom::from("b")), None);
        let v = json!([1, 2]);
        assert_eq!(index_value(&v, &Atom::Int(5)), None);
    }
}