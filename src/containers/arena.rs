//! Node storage for linked lists
//!
//! Lists link nodes by [`NodeId`] instead of by pointer. The arena provides:
//! - Slot reuse through a free list
//! - Generation counters so a freed id never aliases a later node
//! - Stale-id detection (`get` returns `None` after `free`)

use std::ops::{Index, IndexMut};

/// Handle to a node stored in a [`NodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Slot position inside the arena (stable for the node's lifetime)
    pub fn slot(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Slot arena with generational handles
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    /// Store a value and return its handle
    pub fn alloc(&mut self, value: T) -> NodeId {
        self.live += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let (generation, next_free) = match slot {
                Slot::Vacant {
                    generation,
                    next_free,
                } => (generation.wrapping_add(1), *next_free),
                Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            *slot = Slot::Occupied { generation, value };
            self.free_head = next_free;
            return NodeId { index, generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Release a node, returning its value. `None` if the id is stale.
    pub fn free(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.slot())?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation => {}
            _ => return None,
        }

        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                generation: id.generation,
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.index);
        self.live -= 1;

        match old {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.slot())? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.slot())? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drop every node and forget all slots
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale node id {:?}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale node id {:?}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_then_get_is_none() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(1);
        assert_eq!(arena.free(a), Some(1));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.free(a), None, "double free must be rejected");
        assert!(arena.is_empty());
    }

    #[test]
    fn test_reused_slot_gets_new_generation() {
        let mut arena = NodeArena::new();
        let a = arena.alloc("a");
        arena.free(a);
        let b = arena.alloc("b");

        assert_eq!(a.slot(), b.slot());
        assert_ne!(a, b);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena[b], "b");
    }

    #[test]
    fn test_len_tracks_live_nodes() {
        let mut arena = NodeArena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.alloc(i)).collect();
        arena.free(ids[1]);
        arena.free(ids[2]);
        assert_eq!(arena.len(), 2);
        arena.alloc(9);
        assert_eq!(arena.len(), 3);
    }
}
