// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::{Atom, TaskId};

/// A selector into an upstream task's result value.
///
/// `None` on the owning [`Dependency`] means "the whole result"; `Single` selects one level
/// (a mapping key or sequence index); `Path` selects recursively, applying each [`Atom`] in
/// order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Single(Atom),
    Path(Vec<Atom>),
}

impl Selector {
    /// The selector as a sequence of [`Atom`]s to apply in order, regardless of whether it was
    /// constructed as a single scalar or a path.
    pub fn steps(&self) -> &[Atom] {
        match self {
            Selector::Single(a) => std::slice::from_ref(a),
            Selector::Path(p) => p,
        }
    }
}

impl From<Atom> for Selector {
    fn from(a: Atom) -> Self {
        Selector::Single(a)
    }
}

impl From<Vec<Atom>> for Selector {
    fn from(p: Vec<Atom>) -> Self {
        Selector::Path(p)
    }
}

/// A reference to another task's (possibly nested) result.
///
/// `multiplier` is carried for diagnostic fidelity only — it records how many times an
/// equivalent dependency appears in the owning task's argument tree, for richer error messages —
/// and plays no role in resolution. See `SPEC_FULL.md` §9.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub task_id: TaskId,
    pub key: Option<Selector>,
    pub multiplier: u32,
}

impl Dependency {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            key: None,
            multiplier: 1,
        }
    }

    pub fn with_key(task_id: TaskId, key: impl Into<Selector>) -> Self {
        Self {
            task_id,
            key: Some(key.into()),
            multiplier: 1,
        }
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_normalizes_single_and_path() {
        let single = Selector::Single(Atom::from("a"));
        assert_eq!(single.steps(), &[Atom::from("a")]);

        let path = Selector::Path(vec![Atom::from("a"), Atom::Int(2)]);
        assert_eq!(path.steps(), &[Atom::from("a"), Atom::Int(2)]);
    }

    #[test]
    fn default_multiplier_is_one() {
        let dep = Dependency::new(TaskId::int(0));
        assert_eq!(dep.multiplier, 1);
        assert_eq!(dep.key, None);
    }
}