use std::fmt::Debug;

use petgraph::{
    csr::IndexType,
    graph::{EdgeIndex, NodeIndex},
};

/// Trait for keys of the dense, vector-backed containers below.
/// The key must be able to be constructed from a usize index and provide its
/// usize index.
pub trait IndexMapKey {
    fn new(index: usize) -> Self;
    fn index(self) -> usize;
}

impl<T: IndexType> IndexMapKey for NodeIndex<T> {
    fn new(index: usize) -> Self {
        NodeIndex::new(index)
    }

    fn index(self) -> usize {
        NodeIndex::index(self)
    }
}

impl<T: IndexType> IndexMapKey for EdgeIndex<T> {
    fn new(index: usize) -> Self {
        EdgeIndex::new(index)
    }

    fn index(self) -> usize {
        EdgeIndex::index(self)
    }
}

/// A vector based map from keys of type K to values of type V.
/// The maximum key index must be known at map creation time.
/// Attempts to access keys out of range will in most cases panic.
#[derive(Debug, Clone)]
pub struct OptionIndexMap<K: IndexMapKey, V: Debug + Clone + PartialEq> {
    data: Vec<Option<V>>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey, V: Debug + Clone + PartialEq> OptionIndexMap<K, V> {
    pub fn new(max_index: usize) -> Self {
        OptionIndexMap {
            data: vec![None; max_index],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn has_key(&self, key: K) -> bool {
        let index = key.index();

        index < self.data.len() && self.data[index].is_some()
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.data[key.index()].as_ref()
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.data[key.index()].as_mut()
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.data[key.index()] = Some(value);
    }

    pub fn delete(&mut self, key: K) {
        self.data[key.index()] = None;
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (K, &'a V)> + 'a {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|x| (K::new(i), x)))
    }
}

impl<K: IndexMapKey, V: Debug + Clone + PartialEq> std::ops::Index<K> for OptionIndexMap<K, V> {
    type Output = V;

    fn index(&self, index: K) -> &Self::Output {
        self.get(index).expect("key not present in map")
    }
}

impl<K: IndexMapKey, V: Debug + Clone + PartialEq> std::ops::IndexMut<K> for OptionIndexMap<K, V> {
    fn index_mut(&mut self, index: K) -> &mut Self::Output {
        self.get_mut(index).expect("key not present in map")
    }
}

/// A vector based set for keys with a known maximum index.
#[derive(Debug, Clone)]
pub struct IndexSet<K: IndexMapKey> {
    data: Vec<bool>,
    _marker: std::marker::PhantomData<K>,
}

impl<K: IndexMapKey> IndexSet<K> {
    pub fn new(max_index: usize) -> Self {
        IndexSet {
            data: vec![false; max_index],
            _marker: std::marker::PhantomData,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn contains(&self, key: K) -> bool {
        self.data[key.index()]
    }

    /// Insert the key into the set.
    /// Returns true if the key was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        let index = key.index();

        if self.data[index] {
            false
        } else {
            self.data[index] = true;
            true
        }
    }

    pub fn remove(&mut self, key: K) {
        self.data[key.index()] = false;
    }
}

impl<K: IndexMapKey> std::ops::Index<K> for IndexSet<K> {
    type Output = bool;

    fn index(&self, index: K) -> &Self::Output {
        &self.data[index.index()]
    }
}
