use std::hash::Hash;

use crate::col::{map_new, HashMap};

/// Interns external identifiers into dense indices in first-seen order.
pub struct Indexer<Id: Eq + Hash + Clone, Index: Copy> {
    ids: Vec<Id>,
    index_by_id: HashMap<Id, Index>,
    to_index: fn(usize) -> Index,
}

impl<Id: Eq + Hash + Clone, Index: Copy> Indexer<Id, Index> {
    pub fn new(to_index: fn(usize) -> Index) -> Self {
        Self {
            ids: Vec::new(),
            index_by_id: map_new(),
            to_index,
        }
    }

    pub fn index(&mut self, id: Id) -> Index {
        if let Some(&index) = self.index_by_id.get(&id) {
            return index;
        }
        let index = (self.to_index)(self.ids.len());
        self.ids.push(id.clone());
        self.index_by_id.insert(id, index);
        index
    }

    pub fn get(&self, id: &Id) -> Option<Index> {
        self.index_by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn into_parts(self) -> (Box<[Id]>, HashMap<Id, Index>) {
        (self.ids.into_boxed_slice(), self.index_by_id)
    }
}
