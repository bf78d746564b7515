use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub mod graph;
pub mod index_map;
pub mod nfa;
pub mod symbol;

/// The token reserved for epsilon transitions. In input strings the same
/// token, standing alone, denotes the empty word.
pub const EPSILON_MARKER: &str = "-";

/// Identifies a state of an automaton. States are numbered compactly from
/// `0` to `state_count - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(u32);

impl StateId {
    pub fn new(index: usize) -> Self {
        StateId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// An ordered, duplicate free set of states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet(BTreeSet<StateId>);

impl StateSet {
    pub fn new() -> Self {
        StateSet(BTreeSet::new())
    }

    /// Inserts a state and returns whether it was not yet part of the set.
    pub fn insert(&mut self, state: StateId) -> bool {
        self.0.insert(state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.0.contains(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().copied()
    }

    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn union_with(&mut self, other: &StateSet) {
        self.0.extend(other.iter());
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        StateSet(iter.into_iter().collect())
    }
}

impl Extend<StateId> for StateSet {
    fn extend<T: IntoIterator<Item = StateId>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, StateId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

/// Types that decide membership of words in the language they describe.
pub trait Language {
    /// Checks whether the word made of the given symbol tokens is part of the
    /// language. Tokens that are not part of the alphabet never match.
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a str>) -> bool;
}
