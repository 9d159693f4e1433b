use std::collections::VecDeque;

use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};

use crate::automaton::{
    AutomatonLetter, AutomatonNode,
    dfa::{DFA, node::DfaNode},
    index_map::{IndexSet, OptionIndexMap},
};

/// The per-state table driving DFA minimization.
/// The table holds one entry for every state reachable from the start state,
/// in breadth-first discovery order. Each entry records whether the state is
/// initial, whether it is accepting, and the transition target for every
/// symbol, aligned with the alphabet.
pub struct MinimizationTable<'a, N: AutomatonNode, S: AutomatonLetter> {
    entries: Vec<MinimizationTableEntry<'a, N>>,
    entry_of: OptionIndexMap<NodeIndex, usize>,
    dfa: &'a DFA<N, S>,
}

struct MinimizationTableEntry<'a, N: AutomatonNode> {
    state: NodeIndex,
    data: &'a N,
    is_initial: bool,
    is_final: bool,
    transitions: Vec<NodeIndex>,
}

/// The stable state partition: a block id per table entry and the member
/// entries of every block.
struct Partition {
    block_of: Vec<usize>,
    blocks: Vec<Vec<usize>>,
}

impl<'a, N: AutomatonNode, S: AutomatonLetter> MinimizationTable<'a, N, S> {
    /// Gathers the reachable part of a complete DFA breadth-first, scanning
    /// symbols in alphabet order.
    pub fn collect(dfa: &'a DFA<N, S>) -> Self {
        assert!(dfa.is_complete(), "DFA must be complete to minimize");

        let start = dfa.get_initial();
        let mut entries = vec![];
        let mut entry_of = OptionIndexMap::new(dfa.graph.node_count());
        let mut visited = IndexSet::new(dfa.graph.node_count());
        let mut queue = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let mut transitions = Vec::with_capacity(dfa.alphabet.len());

            for symbol in dfa.alphabet.iter() {
                let target = dfa
                    .successor(node, symbol)
                    .expect("complete DFA is missing a transition");

                transitions.push(target);

                if visited.insert(target) {
                    queue.push_back(target);
                }
            }

            entry_of.insert(node, entries.len());
            entries.push(MinimizationTableEntry {
                state: node,
                data: &dfa.graph[node].data,
                is_initial: node == start,
                is_final: dfa.graph[node].accepting,
                transitions,
            });
        }

        MinimizationTable {
            entries,
            entry_of,
            dfa,
        }
    }

    /// The transition fingerprint of an entry under the current partition:
    /// the block of its target for every symbol.
    fn signature(&self, entry: usize, block_of: &[usize]) -> Vec<usize> {
        self.entries[entry]
            .transitions
            .iter()
            .map(|&target| block_of[self.entry_of[target]])
            .collect()
    }

    /// Partitions the entries into classes of equivalent states.
    ///
    /// Starts from the accepting / non-accepting split and repeatedly splits
    /// every block against its first member: entries whose fingerprint
    /// disagrees move to a fresh block at the end. The partition is stable
    /// once a full pass produces no split.
    fn refine(&self) -> Partition {
        let mut block_of = vec![0usize; self.entries.len()];
        let mut blocks: Vec<Vec<usize>> = vec![];

        let non_accepting = (0..self.entries.len())
            .filter(|&entry| !self.entries[entry].is_final)
            .collect::<Vec<_>>();
        let accepting = (0..self.entries.len())
            .filter(|&entry| self.entries[entry].is_final)
            .collect::<Vec<_>>();

        for members in [non_accepting, accepting] {
            if members.is_empty() {
                continue;
            }

            let id = blocks.len();
            for &entry in &members {
                block_of[entry] = id;
            }
            blocks.push(members);
        }

        let mut stable = false;
        while !stable {
            stable = true;

            for block in 0..blocks.len() {
                let representative = blocks[block][0];
                let reference = self.signature(representative, &block_of);

                let (keep, split): (Vec<usize>, Vec<usize>) = blocks[block]
                    .iter()
                    .copied()
                    .partition(|&entry| self.signature(entry, &block_of) == reference);

                if split.is_empty() {
                    continue;
                }

                let id = blocks.len();
                for &entry in &split {
                    block_of[entry] = id;
                }
                blocks[block] = keep;
                blocks.push(split);
                stable = false;
            }
        }

        Partition { block_of, blocks }
    }

    /// Numbers the blocks canonically: breadth-first discovery from the
    /// block of the initial state, scanning symbols in alphabet order.
    /// Blocks not reached that way (none, for a table built from the
    /// reachable part) follow in ascending minimum-member order.
    fn canonical_order(&self, partition: &Partition, initial_block: usize) -> Vec<usize> {
        let mut order = vec![];
        let mut seen = vec![false; partition.blocks.len()];
        let mut queue = VecDeque::new();

        seen[initial_block] = true;
        queue.push_back(initial_block);

        while let Some(block) = queue.pop_front() {
            order.push(block);

            let representative = partition.blocks[block][0];
            for &target in &self.entries[representative].transitions {
                let target_block = partition.block_of[self.entry_of[target]];
                if !seen[target_block] {
                    seen[target_block] = true;
                    queue.push_back(target_block);
                }
            }
        }

        let mut rest = (0..partition.blocks.len())
            .filter(|&block| !seen[block])
            .collect::<Vec<_>>();
        rest.sort_by_key(|&block| {
            partition.blocks[block]
                .iter()
                .map(|&entry| self.entries[entry].state.index())
                .min()
        });
        order.extend(rest);

        order
    }

    /// Rebuilds the minimized DFA from the stable partition.
    ///
    /// Acceptance and transitions are read from a block representative only
    /// after refinement has converged. The unique non-accepting block that
    /// loops to itself on every symbol is dropped together with all its
    /// edges, so the result may be incomplete. If that block holds the
    /// initial state the language is empty and a single non-accepting state
    /// without transitions is returned; the initial state is never removed.
    pub fn to_dfa(&self) -> DFA<N, S> {
        let partition = self.refine();

        let initial_entry = self
            .entries
            .iter()
            .position(|entry| entry.is_initial)
            .expect("table must contain the initial state");
        let initial_block = partition.block_of[initial_entry];

        let order = self.canonical_order(&partition, initial_block);

        let useless_trap = order.iter().copied().find(|&block| {
            let representative = partition.blocks[block][0];
            !self.entries[representative].is_final
                && self.entries[representative]
                    .transitions
                    .iter()
                    .all(|&target| partition.block_of[self.entry_of[target]] == block)
        });

        if useless_trap == Some(initial_block) {
            let representative = partition.blocks[initial_block][0];

            let mut dfa = DFA::new(self.dfa.alphabet.clone());
            let start = dfa.add_node(DfaNode::new(
                false,
                true,
                self.entries[representative].data.clone(),
            ));
            dfa.set_initial(start);

            return dfa;
        }

        let mut dfa = DFA::new(self.dfa.alphabet.clone());
        let mut node_of_block: Vec<Option<NodeIndex>> = vec![None; partition.blocks.len()];

        for &block in &order {
            if Some(block) == useless_trap {
                continue;
            }

            let representative = partition.blocks[block][0];
            let node = dfa.add_node(DfaNode::new(
                self.entries[representative].is_final,
                false,
                self.entries[representative].data.clone(),
            ));
            node_of_block[block] = Some(node);

            if block == initial_block {
                dfa.set_initial(node);
            }
        }

        for &block in &order {
            let Some(from) = node_of_block[block] else {
                continue;
            };

            let representative = partition.blocks[block][0];

            for (i, symbol) in self.dfa.alphabet.iter().enumerate() {
                let target = self.entries[representative].transitions[i];
                let target_block = partition.block_of[self.entry_of[target]];

                // edges into the dropped trap disappear with it
                let Some(to) = node_of_block[target_block] else {
                    continue;
                };

                dfa.add_edge(from, to, symbol.clone());
            }
        }

        // Languages like ∅ and Σ* reduce to the initial state alone: when no
        // transition leaves it, the remaining states are unreachable.
        let start = dfa.get_initial();
        let escapes = dfa
            .graph
            .edges_directed(start, Direction::Outgoing)
            .any(|edge| edge.target() != start);

        if !escapes && dfa.graph.node_count() > 1 {
            let mut collapsed = DFA::new(self.dfa.alphabet.clone());
            let node = collapsed.add_node(dfa.graph[start].clone());
            collapsed.set_initial(node);

            for edge in dfa.graph.edges_directed(start, Direction::Outgoing) {
                collapsed.add_edge(node, node, edge.weight().clone());
            }

            return collapsed;
        }

        if useless_trap.is_none() {
            dfa.set_complete_unchecked();
        }

        dfa
    }
}

pub trait Minimizable {
    fn minimize(&self) -> Self;
}

impl<N: AutomatonNode + Default, S: AutomatonLetter> Minimizable for DFA<N, S> {
    /// Returns the canonical minimal DFA for this automaton's language:
    /// reachable states only, no useless trap, and equivalence classes
    /// renamed to consecutive ids in breadth-first discovery order.
    fn minimize(&self) -> Self {
        let mut work = self.clone();

        // Missing transitions behave like edges into an absorbing
        // non-accepting trap; materialize it so every table entry has a full
        // transition row.
        work.make_complete(N::default());

        let table = MinimizationTable::collect(&work);

        table.to_dfa()
    }
}
