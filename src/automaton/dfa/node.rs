use crate::automaton::AutomatonNode;

/// A state in a DFA or NFA.
/// It contains some data of type `T`, a boolean flag indicating whether the
/// state is accepting, and a boolean flag indicating whether the state is a
/// trap state.
///
/// Invariant: A state cannot be both accepting and a trap state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DfaNode<T: AutomatonNode> {
    pub accepting: bool,
    /// Whether the state is a trap state. Meaning from it there is no way to
    /// reach an accepting state. When it's unknown whether it's a trap
    /// state, this is set to false.
    pub trap: bool,
    pub data: T,
}

impl<T: AutomatonNode> DfaNode<T> {
    pub fn new(accepting: bool, trap: bool, data: T) -> Self {
        assert!(
            !(accepting && trap),
            "A state cannot be both accepting and a trap state"
        );
        DfaNode {
            accepting,
            trap,
            data,
        }
    }

    pub fn accepting(data: T) -> Self {
        DfaNode::new(true, false, data)
    }

    pub fn non_accepting(data: T) -> Self {
        DfaNode::new(false, false, data)
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

impl<T: Default + AutomatonNode> Default for DfaNode<T> {
    fn default() -> Self {
        DfaNode::new(false, false, T::default())
    }
}
