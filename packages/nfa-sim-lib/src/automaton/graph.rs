use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::{Dfs, EdgeRef},
};

use crate::automaton::{StateId, StateSet, nfa::NFA, symbol::NFAEdge};

impl NFA {
    /// Builds a graph view of the automaton. Node `i` of the graph is state
    /// `i`, one edge per transition.
    pub fn to_graph(&self) -> DiGraph<StateId, NFAEdge> {
        let mut graph =
            DiGraph::with_capacity(self.state_count(), self.transition_count());

        for state in self.states() {
            graph.add_node(state);
        }

        for (from, edge, to) in self.iter_transitions() {
            graph.add_edge(
                NodeIndex::new(from.index()),
                NodeIndex::new(to.index()),
                edge,
            );
        }

        graph
    }

    /// All states reachable from an initial state along any transitions.
    pub fn reachable_states(&self) -> StateSet {
        let graph = self.to_graph();
        let mut reachable = StateSet::new();
        let mut dfs = Dfs::empty(&graph);

        for start in self.initial_states() {
            dfs.move_to(NodeIndex::new(start.index()));

            while let Some(node) = dfs.next(&graph) {
                reachable.insert(graph[node]);
            }
        }

        reachable
    }

    pub fn to_graphviz(&self) -> String {
        let graph = self.to_graph();

        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            self.accepting_states()
                .iter()
                .map(|state| state.index().to_string())
                .join(" ")
        ));
        dot.push_str("node [shape = circle];\n");

        for start in self.initial_states() {
            dot.push_str(&format!("START -> {};\n", start.index()));
        }

        for node in graph.node_indices() {
            dot.push_str(&format!("{} [ label=\"{}\" ];\n", node.index(), graph[node]));
        }

        for edge in graph.edge_references() {
            let label = match edge.weight() {
                NFAEdge::Epsilon => "ε".to_string(),
                e => self.alphabet().edge_label(e).to_string(),
            };

            dot.push_str(&format!(
                "{} -> {} [ label=\"{}\" ];\n",
                edge.source().index(),
                edge.target().index(),
                label.replace('"', "\\\"")
            ));
        }

        dot.push_str("}\n");

        dot
    }
}
