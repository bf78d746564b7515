use nfa_sim_lib::automaton::{
    Language, StateId, StateSet,
    nfa::NFA,
    symbol::{Alphabet, NFAEdge},
};

fn q(index: usize) -> StateId {
    StateId::new(index)
}

fn set(indices: &[usize]) -> StateSet {
    indices.iter().map(|&i| q(i)).collect()
}

/// q0 -ε-> q1 -ε-> q2, q1 -a-> q3, q3 -ε-> q0
fn epsilon_chain() -> NFA {
    let alphabet: Alphabet = ["a"].into_iter().collect();
    let a = NFAEdge::Symbol(alphabet.get("a").unwrap());
    let mut nfa = NFA::new(4, alphabet);

    nfa.set_initial(q(0));
    nfa.set_accepting(q(2));

    nfa.add_transition(q(0), NFAEdge::Epsilon, q(1));
    nfa.add_transition(q(1), NFAEdge::Epsilon, q(2));
    nfa.add_transition(q(1), a, q(3));
    nfa.add_transition(q(3), NFAEdge::Epsilon, q(0));

    nfa
}

#[test]
fn test_epsilon_closure() {
    let nfa = epsilon_chain();

    assert_eq!(nfa.epsilon_closure(&set(&[0])), set(&[0, 1, 2]));
    assert_eq!(nfa.epsilon_closure(&set(&[3])), set(&[0, 1, 2, 3]));
    assert_eq!(nfa.epsilon_closure(&set(&[2])), set(&[2]));
    assert_eq!(nfa.epsilon_closure(&StateSet::new()), StateSet::new());
}

#[test]
fn test_epsilon_closure_cycle() {
    let mut nfa = NFA::new(3, Alphabet::new());
    nfa.add_transition(q(0), NFAEdge::Epsilon, q(1));
    nfa.add_transition(q(1), NFAEdge::Epsilon, q(2));
    nfa.add_transition(q(2), NFAEdge::Epsilon, q(0));

    assert_eq!(nfa.epsilon_closure(&set(&[1])), set(&[0, 1, 2]));
}

#[test]
fn test_extend_in_place() {
    let nfa = epsilon_chain();
    let mut states = set(&[3]);
    nfa.extend_to_e_closure(&mut states);

    assert_eq!(states, nfa.epsilon_closure(&set(&[3])));
}

#[test]
fn test_step() {
    let nfa = epsilon_chain();
    let a = nfa.alphabet().get("a");

    let start = nfa.initial_closure();
    assert_eq!(nfa.successors(&start, a.unwrap()), set(&[3]));
    assert_eq!(nfa.step(&start, a), set(&[0, 1, 2, 3]));
    assert_eq!(nfa.step(&start, None), StateSet::new());
}

#[test]
fn test_duplicate_transitions_collapse() {
    let mut nfa = NFA::new(2, Alphabet::new());

    assert!(nfa.add_transition(q(0), NFAEdge::Epsilon, q(1)));
    assert!(!nfa.add_transition(q(0), NFAEdge::Epsilon, q(1)));
    assert_eq!(nfa.transition_count(), 1);
    assert!(nfa.has_epsilon_transitions());
    assert_eq!(nfa.iter_transitions().count(), 1);
}

#[test]
fn test_language() {
    let nfa = epsilon_chain();

    assert!(nfa.accepts([]));
    assert!(nfa.accepts(["a"]));
    assert!(nfa.accepts(["a", "a", "a"]));
    assert!(!nfa.accepts(["b"]));
    assert!(!nfa.accepts(["a", "b"]));
}

#[test]
fn test_reachable_states() {
    let alphabet: Alphabet = ["a"].into_iter().collect();
    let a = NFAEdge::Symbol(alphabet.get("a").unwrap());
    let mut nfa = NFA::new(4, alphabet);
    nfa.set_initial(q(0));
    nfa.add_transition(q(0), a, q(1));
    nfa.add_transition(q(3), a, q(2));

    assert_eq!(nfa.reachable_states(), set(&[0, 1]));
}

#[test]
fn test_graphviz() {
    let dot = epsilon_chain().to_graphviz();

    assert!(dot.starts_with("digraph finite_state_machine {"));
    assert!(dot.contains("node [shape = doublecircle]; 2;"));
    assert!(dot.contains("START -> 0;"));
    assert!(dot.contains("0 -> 1 [ label=\"ε\" ];"));
    assert!(dot.contains("1 -> 3 [ label=\"a\" ];"));
}
