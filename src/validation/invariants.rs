use std::collections::VecDeque;

use hashbrown::HashSet;
use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};

use crate::automaton::{
    Alphabet, AutomatonLetter, AutomatonNode, dfa::DFA, index_map::IndexSet,
};

/// Asserts that every state has at most one outgoing transition per symbol
/// and that every edge label is part of the alphabet.
pub fn assert_deterministic<N: AutomatonNode, S: AutomatonLetter>(dfa: &DFA<N, S>) {
    for edge in dfa.graph.edge_references() {
        assert!(
            dfa.alphabet().contains(edge.weight()),
            "Edge label {:?} is not part of the alphabet",
            edge.weight()
        );
    }

    for state in dfa.graph.node_indices() {
        for symbol in dfa.alphabet() {
            let count = dfa
                .graph
                .edges_directed(state, Direction::Outgoing)
                .filter(|edge| edge.weight() == symbol)
                .count();

            assert!(
                count <= 1,
                "State {:?} has {} transitions for {:?}",
                state,
                count,
                symbol
            );
        }
    }
}

/// Asserts that every state has exactly one outgoing transition per symbol.
pub fn assert_total<N: AutomatonNode, S: AutomatonLetter>(dfa: &DFA<N, S>) {
    assert_deterministic(dfa);

    for state in dfa.graph.node_indices() {
        for symbol in dfa.alphabet() {
            assert!(
                dfa.successor(state, symbol).is_some(),
                "State {:?} has no transition for {:?}",
                state,
                symbol
            );
        }
    }
}

/// Asserts that every state is reachable from the initial state.
pub fn assert_reachable<N: AutomatonNode, S: AutomatonLetter>(dfa: &DFA<N, S>) {
    let mut visited = IndexSet::new(dfa.graph.node_count());
    let mut queue = VecDeque::new();

    let start = dfa.get_initial();
    visited.insert(start);
    queue.push_back(start);

    let mut count = 1;

    while let Some(state) = queue.pop_front() {
        for edge in dfa.graph.edges_directed(state, Direction::Outgoing) {
            if visited.insert(edge.target()) {
                count += 1;
                queue.push_back(edge.target());
            }
        }
    }

    assert_eq!(
        count,
        dfa.graph.node_count(),
        "Not every state is reachable from the initial state"
    );
}

/// Asserts that there is no non-accepting state looping to itself on every
/// symbol, unless it is the only state of the automaton.
pub fn assert_no_useless_trap<N: AutomatonNode, S: AutomatonLetter>(dfa: &DFA<N, S>) {
    if dfa.graph.node_count() == 1 {
        return;
    }

    for state in dfa.graph.node_indices() {
        if dfa.is_accepting(state) {
            continue;
        }

        let useless = dfa
            .alphabet()
            .iter()
            .all(|symbol| dfa.successor(state, symbol) == Some(state));

        assert!(!useless, "State {:?} is a useless trap state", state);
    }
}

/// Asserts that no two distinct states have the same residual language,
/// checked by searching the pair graph for a distinguishing word. Missing
/// transitions are treated as edges into an implicit non-accepting trap.
pub fn assert_pairwise_distinguishable<N: AutomatonNode, S: AutomatonLetter>(dfa: &DFA<N, S>) {
    let states = dfa.graph.node_indices().collect::<Vec<_>>();

    for (i, &p) in states.iter().enumerate() {
        for &q in &states[i + 1..] {
            assert!(
                distinguishable(dfa, p, q),
                "States {:?} and {:?} accept the same residual language",
                p,
                q
            );
        }
    }
}

fn distinguishable<N: AutomatonNode, S: AutomatonLetter>(
    dfa: &DFA<N, S>,
    p: NodeIndex,
    q: NodeIndex,
) -> bool {
    // pairs of Option<NodeIndex>, None being the implicit trap
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert((Some(p), Some(q)));
    queue.push_back((Some(p), Some(q)));

    while let Some((x, y)) = queue.pop_front() {
        let x_accepts = x.is_some_and(|state| dfa.is_accepting(state));
        let y_accepts = y.is_some_and(|state| dfa.is_accepting(state));

        if x_accepts != y_accepts {
            return true;
        }

        for symbol in dfa.alphabet() {
            let x_next = x.and_then(|state| dfa.successor(state, symbol));
            let y_next = y.and_then(|state| dfa.successor(state, symbol));

            if visited.insert((x_next, y_next)) {
                queue.push_back((x_next, y_next));
            }
        }
    }

    false
}

/// Asserts the full canonical form of a minimized DFA: deterministic,
/// reachable states only, no useless trap, pairwise distinguishable states,
/// and the initial state at id 0.
pub fn assert_canonical_form<N: AutomatonNode, S: AutomatonLetter>(dfa: &DFA<N, S>) {
    assert_deterministic(dfa);
    assert_reachable(dfa);
    assert_no_useless_trap(dfa);
    assert_pairwise_distinguishable(dfa);

    assert_eq!(
        dfa.get_initial().index(),
        0,
        "The initial state of a minimized DFA has id 0"
    );
}
