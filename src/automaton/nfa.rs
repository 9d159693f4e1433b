use std::collections::VecDeque;

use hashbrown::HashMap;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{
    Alphabet, AutomatonLetter, AutomatonNode, Language,
    dfa::{DFA, node::DfaNode},
};

/// A nondeterministic finite automaton without epsilon transitions.
/// Transitions are parallel labelled edges: the targets of all edges with the
/// same label leaving a state form that transition's target set. A missing
/// label simply has no edges.
#[derive(Debug, Clone)]
pub struct NFA<N: AutomatonNode, S: AutomatonLetter> {
    start: Option<NodeIndex>,
    pub graph: DiGraph<DfaNode<N>, S>,
    alphabet: Vec<S>,
}

impl<N: AutomatonNode, S: AutomatonLetter> NFA<N, S> {
    /// Creates an empty NFA. The alphabet is sorted and deduplicated so that
    /// every symbol scan happens in one canonical order.
    pub fn new(alphabet: Vec<S>) -> Self {
        let mut alphabet = alphabet;
        alphabet.sort();
        alphabet.dedup();

        NFA {
            alphabet,
            start: None,
            graph: DiGraph::new(),
        }
    }

    pub fn add_node(&mut self, data: DfaNode<N>) -> NodeIndex {
        self.graph.add_node(data)
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, label: S) -> EdgeIndex {
        debug_assert!(
            self.alphabet.contains(&label),
            "Label {:?} not in alphabet",
            label
        );

        self.graph.add_edge(from, to, label)
    }

    pub fn set_initial(&mut self, node: NodeIndex) {
        self.start = Some(node);
    }

    pub fn get_initial(&self) -> NodeIndex {
        self.start.expect("NFA must have a start state")
    }

    pub fn set_accepting(&mut self, state: NodeIndex) {
        self.graph[state].accepting = true;
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&x| self.is_accepting(x))
    }

    /// Creates a DFA state from a set of NFA states. The empty set is the
    /// trap state of the subset construction.
    fn state_from_set(&self, states: &[NodeIndex]) -> DfaNode<()> {
        DfaNode::new(self.is_accepting_set(states), states.is_empty(), ())
    }

    /// The successors of a set of states under one symbol, sorted and
    /// deduplicated so the result can key the subset map.
    fn successor_set(&self, states: &[NodeIndex], symbol: &S) -> Vec<NodeIndex> {
        let mut target = vec![];

        for &node in states {
            for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                if edge.weight() == symbol {
                    target.push(edge.target());
                }
            }
        }

        target.sort();
        target.dedup();

        target
    }

    /// Determinizes the NFA into an equivalent complete DFA using the subset
    /// construction.
    ///
    /// Subsets are discovered breadth-first from `{start}` and become DFA
    /// states in discovery order, with symbols scanned in alphabet order.
    /// The empty subset acts as the trap state; it is only allocated once
    /// some reachable subset has no successor for a symbol, so the result
    /// contains reachable states only.
    pub fn determinize(&self) -> DFA<(), S> {
        let nfa_start = self.get_initial();

        let mut dfa = DFA::new(self.alphabet.clone());
        let mut state_map = HashMap::new();
        let mut queue = VecDeque::new();

        let start_set = vec![nfa_start];
        let dfa_start = dfa.add_node(self.state_from_set(&start_set));
        dfa.set_initial(dfa_start);
        state_map.insert(start_set.clone(), dfa_start);
        queue.push_back(start_set);

        while let Some(subset) = queue.pop_front() {
            let from = state_map[&subset];

            for symbol in &self.alphabet {
                let target_set = self.successor_set(&subset, symbol);

                let to = if let Some(&known) = state_map.get(&target_set) {
                    known
                } else {
                    let new_state = dfa.add_node(self.state_from_set(&target_set));
                    state_map.insert(target_set.clone(), new_state);
                    queue.push_back(target_set);
                    new_state
                };

                dfa.add_edge(from, to, symbol.clone());
            }
        }

        dfa.set_complete_unchecked();

        dfa
    }

    /// Builds an NFA accepting `L(self) ∪ L(other)`.
    ///
    /// The result keeps this automaton's states under their own ids, imports
    /// `other`'s states shifted by `self.graph.node_count()`, and adds a
    /// fresh start state that copies the outgoing transitions of both
    /// original start states. The fresh start accepts iff either original
    /// start does, which preserves acceptance of the empty word.
    pub fn union<NO: AutomatonNode>(&self, other: &NFA<NO, S>) -> NFA<(), S> {
        let mut alphabet = self.alphabet.clone();
        alphabet.extend(other.alphabet.iter().cloned());

        let mut result = NFA::<(), S>::new(alphabet);

        for node in self.graph.node_indices() {
            result.add_node(DfaNode::new(self.graph[node].accepting, false, ()));
        }

        for edge in self.graph.edge_references() {
            result.add_edge(edge.source(), edge.target(), edge.weight().clone());
        }

        let offset = self.graph.node_count();
        let shift = |node: NodeIndex| NodeIndex::new(node.index() + offset);

        for node in other.graph.node_indices() {
            result.add_node(DfaNode::new(other.graph[node].accepting, false, ()));
        }

        for edge in other.graph.edge_references() {
            result.add_edge(
                shift(edge.source()),
                shift(edge.target()),
                edge.weight().clone(),
            );
        }

        let self_start = self.get_initial();
        let other_start = other.get_initial();

        let accepting = self.is_accepting(self_start) || other.is_accepting(other_start);
        let start = result.add_node(DfaNode::new(accepting, false, ()));
        result.set_initial(start);

        for symbol in result.alphabet.clone() {
            for edge in self.graph.edges_directed(self_start, Direction::Outgoing) {
                if *edge.weight() == symbol {
                    result.add_edge(start, edge.target(), symbol.clone());
                }
            }

            for edge in other.graph.edges_directed(other_start, Direction::Outgoing) {
                if *edge.weight() == symbol {
                    result.add_edge(start, shift(edge.target()), symbol.clone());
                }
            }
        }

        result
    }
}

impl<N: AutomatonNode, S: AutomatonLetter> Alphabet for NFA<N, S> {
    type Letter = S;

    fn alphabet(&self) -> &[S] {
        self.alphabet.as_slice()
    }
}

impl<N: AutomatonNode, S: AutomatonLetter> Language for NFA<N, S> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a S>) -> bool
    where
        S: 'a,
    {
        let mut current_states = vec![self.get_initial()];

        for symbol in input {
            let next_states = self.successor_set(&current_states, symbol);

            if next_states.is_empty() {
                return false;
            }

            current_states = next_states;
        }

        self.is_accepting_set(&current_states)
    }
}
