use std::iter;

use itertools::{Itertools, repeat_n};

use crate::automaton::Language;

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking
/// if the automata accept the same words up to a certain length.
pub fn same_language<A, B>(a: &A, b: &B, max_word_length: usize) -> bool
where
    A: Language,
    B: Language<Letter = A::Letter>,
{
    if a.alphabet() != b.alphabet() {
        return false;
    }

    if a.accepts(iter::empty()) != b.accepts(iter::empty()) {
        return false;
    }

    for length in 1..=max_word_length {
        let combinations = repeat_n(a.alphabet().iter(), length).multi_cartesian_product();

        for word in combinations {
            if a.accepts(word.iter().copied()) != b.accepts(word.iter().copied()) {
                return false;
            }
        }
    }

    true
}

/// Panics with the offending word if the two automata disagree on any word
/// up to the given length.
pub fn assert_same_language<A, B>(a: &A, b: &B, max_word_length: usize)
where
    A: Language,
    B: Language<Letter = A::Letter>,
{
    assert_eq!(a.alphabet(), b.alphabet(), "Alphabets must be the same");

    assert_eq!(
        a.accepts(iter::empty()),
        b.accepts(iter::empty()),
        "Automata disagree on the empty word"
    );

    for length in 1..=max_word_length {
        let combinations = repeat_n(a.alphabet().iter(), length).multi_cartesian_product();

        for word in combinations {
            assert_eq!(
                a.accepts(word.iter().copied()),
                b.accepts(word.iter().copied()),
                "Automata disagree on the word {:?}",
                word
            );
        }
    }
}
