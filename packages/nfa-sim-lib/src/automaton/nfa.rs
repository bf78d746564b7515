use hashbrown::HashMap;

use crate::automaton::{
    Language, StateId, StateSet,
    index_map::IndexMap,
    symbol::{Alphabet, NFAEdge, SymbolId},
};

/// The outgoing transitions of a single state, grouped by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTransitions {
    epsilon: StateSet,
    symbols: HashMap<SymbolId, StateSet>,
}

impl StateTransitions {
    pub fn targets(&self, edge: &NFAEdge) -> Option<&StateSet> {
        match edge {
            NFAEdge::Epsilon => Some(&self.epsilon),
            NFAEdge::Symbol(s) => self.symbols.get(s),
        }
    }

    fn insert(&mut self, edge: NFAEdge, target: StateId) -> bool {
        match edge {
            NFAEdge::Epsilon => self.epsilon.insert(target),
            NFAEdge::Symbol(s) => self.symbols.entry(s).or_default().insert(target),
        }
    }

    /// Iterates over all `(label, target)` pairs, epsilon edges first and
    /// symbol edges ordered by symbol.
    pub fn edges(&self) -> impl Iterator<Item = (NFAEdge, StateId)> + '_ {
        let mut symbols = self.symbols.iter().collect::<Vec<_>>();
        symbols.sort_by_key(|(s, _)| **s);

        self.epsilon
            .iter()
            .map(|t| (NFAEdge::Epsilon, t))
            .chain(
                symbols
                    .into_iter()
                    .flat_map(|(s, targets)| targets.iter().map(move |t| (NFAEdge::Symbol(*s), t))),
            )
    }
}

/// A non-deterministic finite automaton with epsilon transitions.
///
/// States are `0..state_count`. Any number of states may be initial or
/// accepting. The transition relation maps `(state, label)` to a set of
/// targets, so adding the same transition twice has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    alphabet: Alphabet,
    initial: StateSet,
    accepting: StateSet,
    transitions: IndexMap<StateId, StateTransitions>,
    transition_count: usize,
    epsilon_count: usize,
}

impl NFA {
    pub fn new(state_count: usize, alphabet: Alphabet) -> Self {
        NFA {
            alphabet,
            initial: StateSet::new(),
            accepting: StateSet::new(),
            transitions: IndexMap::new(state_count),
            transition_count: 0,
            epsilon_count: 0,
        }
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.state_count()).map(StateId::new)
    }

    pub fn contains_state(&self, state: StateId) -> bool {
        self.transitions.has_key(state)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Panics if the state is not part of the automaton.
    pub fn set_initial(&mut self, state: StateId) {
        assert!(self.contains_state(state), "{state} is not part of the NFA");
        self.initial.insert(state);
    }

    /// Panics if the state is not part of the automaton.
    pub fn set_accepting(&mut self, state: StateId) {
        assert!(self.contains_state(state), "{state} is not part of the NFA");
        self.accepting.insert(state);
    }

    pub fn initial_states(&self) -> &StateSet {
        &self.initial
    }

    pub fn accepting_states(&self) -> &StateSet {
        &self.accepting
    }

    /// Adds a transition and returns whether it was new.
    /// Panics if either endpoint is not part of the automaton.
    pub fn add_transition(&mut self, from: StateId, edge: NFAEdge, to: StateId) -> bool {
        assert!(self.contains_state(to), "{to} is not part of the NFA");

        let added = self.transitions.get_mut(from).insert(edge, to);
        if added {
            self.transition_count += 1;
            if edge.is_epsilon() {
                self.epsilon_count += 1;
            }
        }
        added
    }

    /// The number of distinct transitions.
    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    /// Whether any state has an outgoing epsilon transition.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.epsilon_count > 0
    }

    pub fn outgoing(&self, state: StateId) -> Option<&StateTransitions> {
        self.transitions.get(state)
    }

    pub fn destinations(&self, state: StateId, edge: &NFAEdge) -> Option<&StateSet> {
        self.outgoing(state)?.targets(edge)
    }

    /// Iterates over all transitions as `(source, label, target)`.
    pub fn iter_transitions(&self) -> impl Iterator<Item = (StateId, NFAEdge, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(from, out)| out.edges().map(move |(edge, to)| (from, edge, to)))
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &StateSet) -> bool {
        states.iter().any(|state| self.is_accepting(state))
    }

    /// Calculates the epsilon closure of a set of states, i.e. all states
    /// reachable from one of them using only epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        self.extend_to_e_closure(&mut closure);
        closure
    }

    /// Extends a set of states to its epsilon closure in place.
    pub fn extend_to_e_closure(&self, states: &mut StateSet) {
        let mut stack = states.iter().collect::<Vec<_>>();

        while let Some(state) = stack.pop() {
            let Some(targets) = self.destinations(state, &NFAEdge::Epsilon) else {
                continue;
            };

            for target in targets {
                if states.insert(target) {
                    stack.push(target);
                }
            }
        }
    }

    /// The epsilon closure of the initial states.
    pub fn initial_closure(&self) -> StateSet {
        self.epsilon_closure(&self.initial)
    }

    /// All states directly reachable from one of `states` by reading
    /// `symbol`, without following epsilon transitions.
    pub fn successors(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let edge = NFAEdge::Symbol(symbol);
        let mut next = StateSet::new();

        for state in states {
            if let Some(targets) = self.destinations(state, &edge) {
                next.union_with(targets);
            }
        }

        next
    }

    /// Reads one symbol from a set of current states. `None` stands for a
    /// token outside the alphabet, which leads nowhere.
    pub fn step(&self, states: &StateSet, symbol: Option<SymbolId>) -> StateSet {
        match symbol {
            Some(symbol) => {
                let mut next = self.successors(states, symbol);
                self.extend_to_e_closure(&mut next);
                next
            }
            None => StateSet::new(),
        }
    }
}

impl Language for NFA {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a str>) -> bool {
        let mut current_states = self.initial_closure();

        for token in input {
            current_states = self.step(&current_states, self.alphabet.get(token));

            if current_states.is_empty() {
                return false;
            }
        }

        self.is_accepting_set(&current_states)
    }
}
