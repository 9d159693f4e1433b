use std::{collections::VecDeque, fmt::Debug};

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use node::DfaNode;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{Alphabet, AutomatonLetter, AutomatonNode, Language};

pub mod minimization;
pub mod node;

/// A deterministic finite automaton. Every state has at most one outgoing
/// edge per symbol; `complete` tracks whether there is exactly one for every
/// state and symbol.
#[derive(Clone)]
pub struct DFA<N: AutomatonNode, S: AutomatonLetter> {
    start: Option<NodeIndex>,
    pub graph: DiGraph<DfaNode<N>, S>,
    alphabet: Vec<S>,
    complete: bool,
}

impl<N: AutomatonNode, S: AutomatonLetter> DFA<N, S> {
    /// Creates an empty DFA. The alphabet is sorted and deduplicated so that
    /// every symbol scan happens in one canonical order.
    pub fn new(alphabet: Vec<S>) -> Self {
        let mut alphabet = alphabet;
        alphabet.sort();
        alphabet.dedup();

        DFA {
            alphabet,
            start: None,
            graph: DiGraph::new(),
            complete: false,
        }
    }

    pub fn add_node(&mut self, data: DfaNode<N>) -> NodeIndex {
        self.complete = false;

        self.graph.add_node(data)
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, label: S) -> EdgeIndex {
        let existing_edge = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .find(|edge| *edge.weight() == label);
        if let Some(edge) = existing_edge {
            let target = edge.target();
            if target != to {
                panic!(
                    "Transition conflict, adding the new transition causes this automaton to no longer be a DFA. Existing: {:?} -{:?}-> {:?}. New: {:?} -{:?}-> {:?}",
                    from, label, target, from, label, to
                );
            }
        }

        self.graph.add_edge(from, to, label)
    }

    pub fn set_initial(&mut self, node: NodeIndex) {
        self.start = Some(node);
    }

    pub fn get_initial(&self) -> NodeIndex {
        self.start.expect("DFA must have a start state")
    }

    pub fn is_accepting(&self, node: NodeIndex) -> bool {
        self.graph[node].accepting
    }

    pub fn is_trap(&self, node: NodeIndex) -> bool {
        self.graph[node].trap
    }

    /// The target of the transition from `state` under `symbol`, if any.
    pub fn successor(&self, state: NodeIndex, symbol: &S) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    pub fn is_complete(&self) -> bool {
        #[cfg(debug_assertions)]
        {
            if self.complete {
                self.assert_complete();
            }
        }

        self.complete
    }

    /// Check if the DFA is complete.
    /// This means that every state has a transition for every letter in the
    /// alphabet.
    pub fn check_complete(&self) -> bool {
        self.graph.node_indices().all(|state| {
            self.alphabet
                .iter()
                .all(|letter| self.successor(state, letter).is_some())
        })
    }

    /// Assert that the DFA is complete.
    ///
    /// If the DFA is not complete, this function will panic.
    pub fn assert_complete(&self) {
        for state in self.graph.node_indices() {
            for letter in self.alphabet.iter() {
                assert!(
                    self.successor(state, letter).is_some(),
                    "DFA is not complete. State {:?} does not have a transition for letter {:?}",
                    state,
                    letter
                );
            }
        }
    }

    /// Sets the DFA to be complete. This is useful when we don't want to
    /// spend the time to check if the DFA is complete.
    pub fn set_complete_unchecked(&mut self) {
        #[cfg(debug_assertions)]
        {
            self.assert_complete();
        }

        self.complete = true;
    }

    /// Adds a failure state if needed. This turns the DFA into a complete
    /// DFA, which is needed for some algorithms.
    pub fn make_complete(&mut self, data: N) -> Option<NodeIndex> {
        let mut failure_transitions = Vec::new();

        for state in self.graph.node_indices() {
            for letter in self.alphabet.iter() {
                if self.successor(state, letter).is_none() {
                    failure_transitions.push((state, letter.clone()));
                }
            }
        }

        if failure_transitions.is_empty() {
            self.complete = true;

            return None;
        }

        let failure_state = self.add_node(DfaNode::new(false, true, data));

        for (state, letter) in failure_transitions {
            self.add_edge(state, failure_state, letter);
        }

        for letter in self.alphabet.clone() {
            self.add_edge(failure_state, failure_state, letter);
        }

        self.complete = true;

        Some(failure_state)
    }

    /// Builds the product DFA accepting `L(self) ∩ L(other)`.
    ///
    /// The product runs over the union of both alphabets. State 0 is a
    /// reserved absorbing trap, the pair of start states gets id 1, and
    /// newly discovered pairs are numbered breadth-first from there with
    /// symbols scanned in alphabet order. A symbol one side has no
    /// transition for leads into the trap, and a pair accepts iff both
    /// components accept.
    pub fn intersect<NO: AutomatonNode>(&self, other: &DFA<NO, S>) -> DFA<(), S> {
        let mut alphabet = self.alphabet.clone();
        alphabet.extend(other.alphabet.iter().cloned());

        let mut product = DFA::<(), S>::new(alphabet);
        let alphabet = product.alphabet.clone();

        let trap = product.add_node(DfaNode::new(false, true, ()));
        for symbol in alphabet.iter() {
            product.add_edge(trap, trap, symbol.clone());
        }

        let self_start = self.get_initial();
        let other_start = other.get_initial();

        // state map to map combinations of states to the new intersected
        // states
        let mut state_map = HashMap::new();

        // queue for the state combinations that still need to be processed
        let mut queue = VecDeque::new();

        let accepting = self.is_accepting(self_start) && other.is_accepting(other_start);
        let start = product.add_node(DfaNode::new(accepting, false, ()));
        product.set_initial(start);

        state_map.insert((self_start, other_start), start);
        queue.push_back((self_start, other_start));

        while let Some((state1, state2)) = queue.pop_front() {
            let from = state_map[&(state1, state2)];

            for symbol in alphabet.iter() {
                let targets = (
                    self.successor(state1, symbol),
                    other.successor(state2, symbol),
                );

                let to = match targets {
                    (Some(target1), Some(target2)) => {
                        *state_map.entry((target1, target2)).or_insert_with(|| {
                            let accepting =
                                self.is_accepting(target1) && other.is_accepting(target2);
                            queue.push_back((target1, target2));
                            product.add_node(DfaNode::new(accepting, false, ()))
                        })
                    }
                    _ => trap,
                };

                product.add_edge(from, to, symbol.clone());
            }
        }

        product.set_complete_unchecked();

        product
    }

    /// We first check if the graph has any accepting states. If it doesn't,
    /// we can return false immediately. Then we do a simple DFS from the
    /// start state, and if we find an accepting state, we return true.
    pub fn has_accepting_run(&self) -> bool {
        if self
            .graph
            .node_indices()
            .all(|node| !self.graph[node].accepting)
        {
            return false;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![self.get_initial()];

        while let Some(state) = stack.pop() {
            if self.graph[state].accepting {
                return true;
            }

            visited.insert(state);

            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if !visited.contains(&edge.target()) {
                    stack.push(edge.target());
                }
            }
        }

        false
    }

    /// Checks if `L(Self) = ∅` by checking if there is no accepting run in
    /// the DFA.
    pub fn is_language_empty(&self) -> bool {
        !self.has_accepting_run()
    }
}

impl<N: AutomatonNode, S: AutomatonLetter> Alphabet for DFA<N, S> {
    type Letter = S;

    fn alphabet(&self) -> &[S] {
        &self.alphabet
    }
}

impl<N: AutomatonNode, S: AutomatonLetter> Language for DFA<N, S> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a S>) -> bool
    where
        S: 'a,
    {
        let mut current_state = Some(self.get_initial());

        for symbol in input {
            assert!(
                self.alphabet.contains(symbol),
                "Symbol {:?} not in alphabet",
                symbol
            );

            if let Some(state) = current_state {
                current_state = self.successor(state, symbol);
            } else {
                return false;
            }
        }

        match current_state.and_then(|state| self.graph.node_weight(state)) {
            Some(data) => data.accepting,
            None => false,
        }
    }
}

/// Structural equality on `(Q, Σ, δ, q₀, F)`. State payloads and trap flags
/// do not participate: two DFAs are equal iff they have the same number of
/// states, the same alphabet, pointwise-equal transitions, the same initial
/// state id and the same accepting-id set.
impl<N: AutomatonNode, S: AutomatonLetter> PartialEq for DFA<N, S> {
    fn eq(&self, other: &Self) -> bool {
        if self.graph.node_count() != other.graph.node_count() {
            return false;
        }

        if self.alphabet != other.alphabet {
            return false;
        }

        if self.start.map(NodeIndex::index) != other.start.map(NodeIndex::index) {
            return false;
        }

        let accepting_states = |dfa: &DFA<N, S>| {
            dfa.graph
                .node_indices()
                .filter(|&node| dfa.graph[node].accepting)
                .map(NodeIndex::index)
                .collect_vec()
        };

        if accepting_states(self) != accepting_states(other) {
            return false;
        }

        // petgraph stores edges in insertion order, which is not canonical
        let transitions = |dfa: &DFA<N, S>| {
            dfa.graph
                .edge_references()
                .map(|edge| {
                    (
                        edge.source().index(),
                        edge.weight().clone(),
                        edge.target().index(),
                    )
                })
                .sorted()
                .collect_vec()
        };

        transitions(self) == transitions(other)
    }
}

impl<N: AutomatonNode, S: AutomatonLetter> Eq for DFA<N, S> {}

impl<N: AutomatonNode, S: AutomatonLetter> Debug for DFA<N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("initial_state", &self.start)
            .field(
                "final_states",
                &self
                    .graph
                    .node_indices()
                    .filter(|node| self.graph[*node].accepting)
                    .collect_vec(),
            )
            .field(
                "transitions",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{:?} --- {:?} --> {:?}",
                            edge.source(),
                            edge.weight(),
                            edge.target()
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
