use automata_algebra::automaton::{
    Alphabet, Language,
    dfa::{DFA, node::DfaNode},
};
use itertools::{Itertools, repeat_n};

#[test]
fn test_dfa() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_node(DfaNode::non_accepting(0));
    let q1 = dfa.add_node(DfaNode::non_accepting(1));
    let q2 = dfa.add_node(DfaNode::accepting(2));
    dfa.set_initial(q0);

    dfa.add_edge(q0, q1, 'a');
    dfa.add_edge(q1, q2, 'b');
    dfa.add_edge(q2, q1, 'a');

    dfa.make_complete(3);

    let input = "ababab";
    let chars = input.chars().collect_vec();
    assert!(dfa.accepts(&chars));

    let input = "ababa";
    let chars = input.chars().collect_vec();
    assert!(!dfa.accepts(&chars));
}

#[test]
fn test_make_complete() {
    let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa.add_node(DfaNode::non_accepting(0));
    let q1 = dfa.add_node(DfaNode::accepting(1));
    dfa.set_initial(q0);

    dfa.add_edge(q0, q1, 'a');

    let failure = dfa.make_complete(2);
    assert!(failure.is_some());
    assert!(dfa.is_complete());
    assert!(dfa.check_complete());

    let failure = failure.unwrap();
    assert!(dfa.is_trap(failure));
    assert_eq!(dfa.successor(failure, &'a'), Some(failure));
    assert_eq!(dfa.successor(failure, &'b'), Some(failure));
    assert_eq!(dfa.successor(q0, &'b'), Some(failure));

    // a second pass has nothing to add
    assert!(dfa.make_complete(3).is_none());
}

#[test]
fn test_dfa_intersection() {
    // a* b b*
    let mut dfa1 = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa1.add_node(DfaNode::non_accepting(0));
    let q1 = dfa1.add_node(DfaNode::accepting(1));
    dfa1.set_initial(q0);

    dfa1.add_edge(q0, q0, 'a');
    dfa1.add_edge(q0, q1, 'b');
    dfa1.add_edge(q1, q1, 'b');

    // a b*
    let mut dfa2 = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa2.add_node(DfaNode::non_accepting(0));
    let q1 = dfa2.add_node(DfaNode::accepting(1));
    dfa2.set_initial(q0);

    dfa2.add_edge(q0, q1, 'a');
    dfa2.add_edge(q1, q1, 'b');

    dfa1.make_complete(2);
    dfa2.make_complete(2);

    let product = dfa1.intersect(&dfa2);

    // id 0 is the reserved trap, the pair of start states is id 1
    assert_eq!(product.get_initial().index(), 1);
    let trap = product.graph.node_indices().next().unwrap();
    assert!(product.is_trap(trap));
    assert!(product.check_complete());

    for length in 0..=6 {
        for word in repeat_n(['a', 'b'].iter(), length).multi_cartesian_product() {
            assert_eq!(
                product.accepts(word.iter().copied()),
                dfa1.accepts(word.iter().copied()) && dfa2.accepts(word.iter().copied()),
                "word {:?}",
                word
            );
        }
    }

    // the overlap of a* b b* and a b* is a b+
    let chars = "abb".chars().collect_vec();
    assert!(product.accepts(&chars));
    let chars = "a".chars().collect_vec();
    assert!(!product.accepts(&chars));
}

#[test]
fn test_dfa_intersection_widens_alphabet() {
    // a* over {a} only
    let mut dfa1 = DFA::<u32, char>::new(vec!['a']);
    let q0 = dfa1.add_node(DfaNode::accepting(0));
    dfa1.set_initial(q0);
    dfa1.add_edge(q0, q0, 'a');

    // (a | b)* over {a, b}
    let mut dfa2 = DFA::<u32, char>::new(vec!['a', 'b']);
    let q0 = dfa2.add_node(DfaNode::accepting(0));
    dfa2.set_initial(q0);
    dfa2.add_edge(q0, q0, 'a');
    dfa2.add_edge(q0, q0, 'b');

    let product = dfa1.intersect(&dfa2);

    assert_eq!(product.alphabet(), &['a', 'b']);
    assert!(product.check_complete());

    // 'b' has no transition in dfa1, so it must fall into the trap
    let chars = "aaa".chars().collect_vec();
    assert!(product.accepts(&chars));
    let chars = "ab".chars().collect_vec();
    assert!(!product.accepts(&chars));
    let chars = "ba".chars().collect_vec();
    assert!(!product.accepts(&chars));
}

#[test]
fn test_structural_equality() {
    let build = |flip: bool| {
        let mut dfa = DFA::<u32, char>::new(vec!['a', 'b']);
        let q0 = dfa.add_node(DfaNode::non_accepting(0));
        let q1 = dfa.add_node(DfaNode::accepting(1));
        dfa.set_initial(q0);

        // edge insertion order must not matter
        if flip {
            dfa.add_edge(q1, q1, 'b');
            dfa.add_edge(q0, q1, 'a');
        } else {
            dfa.add_edge(q0, q1, 'a');
            dfa.add_edge(q1, q1, 'b');
        }

        dfa
    };

    assert_eq!(build(false), build(true));

    let mut other = build(false);
    let extra = other.add_node(DfaNode::non_accepting(2));
    other.add_edge(extra, extra, 'a');
    assert_ne!(build(false), other);
}

#[test]
fn test_is_language_empty() {
    let mut dfa = DFA::<u32, char>::new(vec!['a']);
    let q0 = dfa.add_node(DfaNode::non_accepting(0));
    let q1 = dfa.add_node(DfaNode::accepting(1));
    dfa.set_initial(q0);

    dfa.add_edge(q0, q0, 'a');
    dfa.add_edge(q1, q1, 'a');

    // the accepting state exists but is unreachable
    assert!(dfa.is_language_empty());
    assert!(!dfa.has_accepting_run());

    let mut dfa = DFA::<u32, char>::new(vec!['a']);
    let q0 = dfa.add_node(DfaNode::non_accepting(0));
    let q1 = dfa.add_node(DfaNode::accepting(1));
    dfa.set_initial(q0);

    dfa.add_edge(q0, q1, 'a');
    dfa.add_edge(q1, q1, 'a');

    assert!(!dfa.is_language_empty());
}
