use std::fmt::Display;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::automaton::EPSILON_MARKER;

/// Identifies a token of an [Alphabet].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn new(index: usize) -> Self {
        SymbolId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The label of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NFAEdge {
    Symbol(SymbolId),
    Epsilon,
}

impl NFAEdge {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NFAEdge::Epsilon)
    }

    /// Epsilon edges never match a symbol.
    pub fn matches(&self, symbol: SymbolId) -> bool {
        match self {
            NFAEdge::Symbol(s) => *s == symbol,
            NFAEdge::Epsilon => false,
        }
    }
}

impl From<Option<SymbolId>> for NFAEdge {
    fn from(value: Option<SymbolId>) -> Self {
        match value {
            Some(s) => NFAEdge::Symbol(s),
            None => NFAEdge::Epsilon,
        }
    }
}

/// The ordered set of terminal tokens of an automaton. Each token is interned
/// to a [SymbolId] in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    tokens: Vec<String>,
    lookup: HashMap<String, SymbolId>,
}

impl Alphabet {
    pub fn new() -> Self {
        Alphabet::default()
    }

    /// Adds a token, returning the id it is known by. Adding a token twice
    /// returns the first id.
    pub fn insert(&mut self, token: &str) -> SymbolId {
        if let Some(&id) = self.lookup.get(token) {
            return id;
        }

        let id = SymbolId::new(self.tokens.len());
        self.tokens.push(token.to_string());
        self.lookup.insert(token.to_string(), id);
        id
    }

    pub fn get(&self, token: &str) -> Option<SymbolId> {
        self.lookup.get(token).copied()
    }

    pub fn token(&self, symbol: SymbolId) -> &str {
        &self.tokens[symbol.index()]
    }

    /// Resolves a transition label token, where [EPSILON_MARKER] stands for
    /// the epsilon label.
    pub fn edge(&self, token: &str) -> Option<NFAEdge> {
        if token == EPSILON_MARKER {
            Some(NFAEdge::Epsilon)
        } else {
            self.get(token).map(NFAEdge::Symbol)
        }
    }

    pub fn edge_label(&self, edge: &NFAEdge) -> &str {
        match edge {
            NFAEdge::Symbol(s) => self.token(*s),
            NFAEdge::Epsilon => EPSILON_MARKER,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl<'a> FromIterator<&'a str> for Alphabet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut alphabet = Alphabet::new();
        for token in iter {
            alphabet.insert(token);
        }
        alphabet
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.tokens.join(", "))
    }
}

#[test]
fn test_alphabet_dedup() {
    let alphabet: Alphabet = ["a", "bb", "a"].into_iter().collect();

    assert_eq!(alphabet.len(), 2);
    assert_eq!(alphabet.get("a"), Some(SymbolId::new(0)));
    assert_eq!(alphabet.get("bb"), Some(SymbolId::new(1)));
    assert_eq!(alphabet.get("b"), None);
    assert_eq!(alphabet.edge("-"), Some(NFAEdge::Epsilon));
    assert_eq!(alphabet.edge("bb"), Some(NFAEdge::Symbol(SymbolId::new(1))));
}
