use std::{fmt::Debug, hash::Hash};

pub mod dfa;
pub mod index_map;
pub mod nfa;

pub trait AutomatonNode: Debug + Clone + PartialEq + Eq + Hash {}
pub trait AutomatonLetter: Debug + Clone + PartialEq + Eq + Hash + Ord {}

impl<T> AutomatonNode for T where T: Debug + Clone + PartialEq + Eq + Hash {}
impl<T> AutomatonLetter for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord {}

pub trait Alphabet {
    type Letter: AutomatonLetter;

    fn alphabet(&self) -> &[Self::Letter];
}

pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> bool
    where
        Self::Letter: 'a;
}
