use automata_algebra::{
    automaton::{
        Alphabet, Language,
        dfa::{DFA, minimization::Minimizable, node::DfaNode},
        nfa::NFA,
    },
    config::AlgebraConfig,
    ops::{LanguageOps, intersect_dfa, union_dfa},
    validation::{invariants::assert_canonical_form, same_language::assert_same_language},
};
use itertools::{Itertools, repeat_n};

fn nfa(
    states: usize,
    alphabet: &[char],
    transitions: &[((usize, char), &[usize])],
    start: usize,
    accepting: &[usize],
) -> NFA<u32, char> {
    let mut nfa = NFA::new(alphabet.to_vec());

    let nodes = (0..states)
        .map(|i| nfa.add_node(DfaNode::non_accepting(i as u32)))
        .collect_vec();

    for &state in accepting {
        nfa.set_accepting(nodes[state]);
    }

    for ((from, symbol), targets) in transitions {
        for &target in *targets {
            nfa.add_edge(nodes[*from], nodes[target], *symbol);
        }
    }

    nfa.set_initial(nodes[start]);

    nfa
}

#[test]
fn intersection_prefix_and_suffix() {
    // the overlap is every word with "aa" as a prefix and "aa" as a suffix
    // words ending in "aa"
    let a1 = nfa(
        3,
        &['a', 'b'],
        &[((0, 'a'), &[0, 1]), ((0, 'b'), &[0]), ((1, 'a'), &[2])],
        0,
        &[2],
    );

    // words starting with "aa"
    let a2 = nfa(
        3,
        &['a', 'b'],
        &[
            ((0, 'a'), &[1]),
            ((1, 'a'), &[2]),
            ((2, 'a'), &[2]),
            ((2, 'b'), &[2]),
        ],
        0,
        &[2],
    );

    let result = intersect_dfa(&a1, &a2);

    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::non_accepting(()));
    let m1 = expected.add_node(DfaNode::non_accepting(()));
    let m2 = expected.add_node(DfaNode::accepting(()));
    let m3 = expected.add_node(DfaNode::non_accepting(()));
    let m4 = expected.add_node(DfaNode::non_accepting(()));
    expected.set_initial(m0);

    expected.add_edge(m0, m1, 'a');
    expected.add_edge(m1, m2, 'a');
    expected.add_edge(m2, m2, 'a');
    expected.add_edge(m2, m3, 'b');
    expected.add_edge(m3, m4, 'a');
    expected.add_edge(m3, m3, 'b');
    expected.add_edge(m4, m2, 'a');
    expected.add_edge(m4, m3, 'b');

    assert_eq!(result, expected);
    assert_canonical_form(&result);

    for length in 0..=7 {
        for word in repeat_n(['a', 'b'].iter(), length).multi_cartesian_product() {
            assert_eq!(
                result.accepts(word.iter().copied()),
                a1.accepts(word.iter().copied()) && a2.accepts(word.iter().copied()),
                "word {:?}",
                word
            );
        }
    }
}

#[test]
fn union_of_two_empty_word_languages() {
    // both operands accept exactly the empty word
    let e1 = nfa(
        2,
        &['a', 'b'],
        &[((1, 'a'), &[0]), ((1, 'b'), &[1])],
        0,
        &[0, 1],
    );
    let e2 = nfa(
        2,
        &['a', 'b'],
        &[((1, 'a'), &[0]), ((1, 'b'), &[1])],
        0,
        &[0, 1],
    );

    let result = union_dfa(&e1, &e2);

    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::accepting(()));
    expected.set_initial(m0);

    assert_eq!(result, expected);
    assert_canonical_form(&result);
}

#[test]
fn union_of_identical_loops() {
    // a* with an unused second letter in the alphabet
    let a = nfa(1, &['a', 'b'], &[((0, 'a'), &[0])], 0, &[0]);
    let b = nfa(1, &['a', 'b'], &[((0, 'a'), &[0])], 0, &[0]);

    let result = union_dfa(&a, &b);

    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::accepting(()));
    expected.set_initial(m0);
    expected.add_edge(m0, m0, 'a');

    assert_eq!(result, expected);
    assert_canonical_form(&result);
}

#[test]
fn intersection_of_disjoint_languages() {
    // {a} ∪ b Σ* aa
    let c1 = nfa(
        5,
        &['a', 'b'],
        &[
            ((0, 'a'), &[1]),
            ((0, 'b'), &[2]),
            ((2, 'a'), &[2, 3]),
            ((2, 'b'), &[2]),
            ((3, 'a'), &[4]),
        ],
        0,
        &[1, 4],
    );

    // words ending in "bb"
    let c2 = nfa(
        3,
        &['a', 'b'],
        &[((0, 'a'), &[0]), ((0, 'b'), &[0, 1]), ((1, 'b'), &[2])],
        0,
        &[2],
    );

    let result = intersect_dfa(&c1, &c2);

    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::non_accepting(()));
    expected.set_initial(m0);

    assert_eq!(result, expected);
    assert!(result.is_language_empty());
    assert_eq!(result.graph.edge_count(), 0);
    assert_canonical_form(&result);
}

#[test]
fn union_widens_alphabet() {
    // a* over {a} alone
    let f1 = nfa(1, &['a'], &[((0, 'a'), &[0])], 0, &[0]);

    // b* over {a, b}
    let f2 = nfa(1, &['a', 'b'], &[((0, 'b'), &[0])], 0, &[0]);

    let result = union_dfa(&f1, &f2);

    assert_eq!(result.alphabet(), &['a', 'b']);
    assert_canonical_form(&result);

    // ε and pure-a words come from f1, pure-b words from f2
    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::accepting(()));
    let m1 = expected.add_node(DfaNode::accepting(()));
    let m2 = expected.add_node(DfaNode::accepting(()));
    expected.set_initial(m0);

    expected.add_edge(m0, m1, 'a');
    expected.add_edge(m0, m2, 'b');
    expected.add_edge(m1, m1, 'a');
    expected.add_edge(m2, m2, 'b');

    assert_eq!(result, expected);

    let words = [
        ("", true),
        ("aaa", true),
        ("bb", true),
        ("ab", false),
        ("ba", false),
    ];

    for (word, accepted) in words {
        let chars = word.chars().collect_vec();
        assert_eq!(result.accepts(&chars), accepted, "word {:?}", word);
    }
}

#[test]
fn union_where_one_operand_is_empty() {
    // accepting state exists but is cut off from the start state
    let f1 = nfa(2, &['a'], &[((1, 'a'), &[1])], 0, &[1]);

    // exactly the empty word
    let f2 = nfa(
        2,
        &['a', 'b'],
        &[((1, 'a'), &[0]), ((1, 'b'), &[1])],
        0,
        &[0, 1],
    );

    let result = union_dfa(&f1, &f2);

    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::accepting(()));
    expected.set_initial(m0);

    assert_eq!(result, expected);
}

fn large_operands() -> (NFA<u32, char>, NFA<u32, char>) {
    let h1 = nfa(
        13,
        &['G', 't'],
        &[
            ((0, 'G'), &[0, 2, 3]),
            ((0, 't'), &[0, 1, 2, 8]),
            ((1, 'G'), &[2, 4, 9]),
            ((1, 't'), &[0, 2, 10]),
            ((2, 'G'), &[9, 10]),
            ((2, 't'), &[0, 2, 9]),
            ((3, 'G'), &[1, 4, 10]),
            ((3, 't'), &[1, 2]),
            ((4, 'G'), &[0, 8, 11]),
            ((4, 't'), &[0, 1, 4, 12]),
            ((5, 'G'), &[0, 4, 6, 7, 11]),
            ((5, 't'), &[1, 5, 9, 10]),
            ((6, 'G'), &[2, 5, 8]),
            ((6, 't'), &[0, 2, 4, 6, 7]),
            ((7, 'G'), &[0, 1]),
            ((7, 't'), &[0, 2, 5, 6, 9]),
            ((9, 'G'), &[1, 4, 10]),
            ((9, 't'), &[1, 2]),
            ((10, 'G'), &[0, 8, 12]),
            ((10, 't'), &[0, 1, 4, 11]),
        ],
        1,
        &[0, 1, 2, 5, 7],
    );

    let h2 = nfa(
        12,
        &['G', 't'],
        &[
            ((0, 'G'), &[2, 3, 4, 8, 10, 11]),
            ((0, 't'), &[0, 3, 8]),
            ((1, 't'), &[1, 4, 7, 10]),
            ((2, 'G'), &[0, 1, 3, 7, 10]),
            ((2, 't'), &[2, 3, 4, 9]),
            ((3, 'G'), &[1, 2, 3]),
            ((3, 't'), &[0, 1, 2]),
            ((4, 'G'), &[0, 1, 2, 3, 4, 9, 10]),
            ((4, 't'), &[1, 8, 9, 11]),
            ((5, 'G'), &[2, 7]),
            ((5, 't'), &[2, 3, 5, 6]),
            ((6, 'G'), &[0, 2, 3, 4, 7, 8]),
            ((6, 't'), &[1, 4, 5, 7, 10]),
            ((7, 'G'), &[11]),
            ((7, 't'), &[9, 10]),
            ((8, 'G'), &[8, 9]),
            ((9, 'G'), &[10]),
            ((9, 't'), &[8, 10]),
            ((10, 'G'), &[9]),
            ((10, 't'), &[8, 10]),
            ((11, 'G'), &[7]),
            ((11, 't'), &[9, 10]),
        ],
        2,
        &[1, 2, 3, 4, 5, 6],
    );

    (h1, h2)
}

#[test]
fn large_union() {
    let (h1, h2) = large_operands();

    let result = union_dfa(&h1, &h2);

    assert_canonical_form(&result);

    for length in 0..=7 {
        for word in repeat_n(['G', 't'].iter(), length).multi_cartesian_product() {
            assert_eq!(
                result.accepts(word.iter().copied()),
                h1.accepts(word.iter().copied()) || h2.accepts(word.iter().copied()),
                "word {:?}",
                word
            );
        }
    }
}

#[test]
fn large_intersection() {
    let (h1, h2) = large_operands();

    let result = intersect_dfa(&h1, &h2);

    assert_canonical_form(&result);

    for length in 0..=7 {
        for word in repeat_n(['G', 't'].iter(), length).multi_cartesian_product() {
            assert_eq!(
                result.accepts(word.iter().copied()),
                h1.accepts(word.iter().copied()) && h2.accepts(word.iter().copied()),
                "word {:?}",
                word
            );
        }
    }
}

#[test]
fn union_is_canonical_for_equivalent_operands() {
    let a1 = nfa(
        3,
        &['a', 'b'],
        &[((0, 'a'), &[0, 1]), ((0, 'b'), &[0]), ((1, 'a'), &[2])],
        0,
        &[2],
    );

    // the same language with a padded state set and permuted ids
    let a2 = nfa(
        5,
        &['a', 'b'],
        &[((1, 'a'), &[1, 2]), ((1, 'b'), &[1]), ((2, 'a'), &[0])],
        1,
        &[0],
    );

    let x = nfa(
        3,
        &['a', 'b'],
        &[
            ((0, 'a'), &[1]),
            ((1, 'a'), &[2]),
            ((2, 'a'), &[2]),
            ((2, 'b'), &[2]),
        ],
        0,
        &[2],
    );

    assert_same_language(&a1, &a2, 7);
    assert_eq!(union_dfa(&a1, &x), union_dfa(&a2, &x));
}

#[test]
fn union_and_intersection_results_are_fixed_points() {
    let (h1, h2) = large_operands();

    let union = union_dfa(&h1, &h2);
    assert_eq!(union.minimize(), union);

    let intersection = intersect_dfa(&h1, &h2);
    assert_eq!(intersection.minimize(), intersection);
}

#[test]
fn intersection_with_empty_language_is_empty() {
    let a1 = nfa(
        3,
        &['a', 'b'],
        &[((0, 'a'), &[0, 1]), ((0, 'b'), &[0]), ((1, 'a'), &[2])],
        0,
        &[2],
    );

    let nothing = nfa(1, &['a', 'b'], &[], 0, &[]);

    let result = intersect_dfa(&a1, &nothing);

    let mut expected = DFA::<(), char>::new(vec!['a', 'b']);
    let m0 = expected.add_node(DfaNode::non_accepting(()));
    expected.set_initial(m0);

    assert_eq!(result, expected);
    assert!(result.is_language_empty());
}

#[test]
fn runner_matches_plain_functions() {
    let a1 = nfa(
        3,
        &['a', 'b'],
        &[((0, 'a'), &[0, 1]), ((0, 'b'), &[0]), ((1, 'a'), &[2])],
        0,
        &[2],
    );
    let a2 = nfa(
        3,
        &['a', 'b'],
        &[
            ((0, 'a'), &[1]),
            ((1, 'a'), &[2]),
            ((2, 'a'), &[2]),
            ((2, 'b'), &[2]),
        ],
        0,
        &[2],
    );

    let config = AlgebraConfig::default().with_debug_checks(true);
    let ops = LanguageOps::new(config, None);

    assert_eq!(ops.union(&a1, &a2), union_dfa(&a1, &a2));
    assert_eq!(ops.intersect(&a1, &a2), intersect_dfa(&a1, &a2));
}
