//! Singly and doubly linked lists with stepwise operations
//!
//! Nodes live in a [`NodeArena`] and are linked by [`NodeId`]. The list tracks
//! `head`, `tail` and `len`, so appending is O(1) for both kinds.
//!
//! # Walk direction
//!
//! A singly linked list always walks from the head. A doubly linked list walks
//! from the head when `2 * pos < len` and from the tail otherwise, so the
//! number of [`Checkpoint::NodeVisited`] events an insert or remove produces is
//! the distance from the nearer end.

use super::arena::{NodeArena, NodeId};
use crate::checkpoint::{Checkpoint, Trace};
use crate::engine::{transition, Engine, EngineState, Progress};
use crate::errors::{VisualizerError, VisualizerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Singly,
    Doubly,
}

impl ListKind {
    fn noun(self) -> &'static str {
        match self {
            ListKind::Singly => "linked list",
            ListKind::Doubly => "doubly linked list",
        }
    }
}

/// A list node. `prev` is only maintained for doubly linked lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub data: i64,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

impl ListNode {
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }
}

#[derive(Debug, Clone)]
pub struct LinkedList {
    kind: ListKind,
    nodes: NodeArena<ListNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl LinkedList {
    pub fn new(kind: ListKind) -> Self {
        LinkedList {
            kind,
            nodes: NodeArena::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn singly() -> Self {
        Self::new(ListKind::Singly)
    }

    pub fn doubly() -> Self {
        Self::new(ListKind::Doubly)
    }

    /// Build a list without producing any checkpoints
    pub fn from_values(kind: ListKind, values: &[i64]) -> Self {
        let mut list = Self::new(kind);
        for &v in values {
            let id = list.alloc(v);
            list.link_back(id);
        }
        list
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id)
    }

    /// Values in order, walking `next` from the head
    pub fn values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            out.push(node.data);
            cursor = node.next;
        }
        out
    }

    /// Values walking `prev` from the tail; `None` for singly linked lists
    pub fn values_backward(&self) -> Option<Vec<i64>> {
        if self.kind == ListKind::Singly {
            return None;
        }
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            out.push(node.data);
            cursor = node.prev;
        }
        Some(out)
    }

    /// Verify the structural invariants: `len` matches the reachable node
    /// count, head/tail are empty together, and for doubly linked lists every
    /// `next`/`prev` pair agrees.
    pub fn check_links(&self) -> Result<(), String> {
        if self.head.is_none() != self.tail.is_none() {
            return Err("head and tail disagree about emptiness".to_string());
        }
        if (self.len == 0) != self.head.is_none() {
            return Err(format!("len is {} but head is {:?}", self.len, self.head));
        }
        if self.nodes.len() != self.len {
            return Err(format!(
                "{} nodes allocated for a list of length {}",
                self.nodes.len(),
                self.len
            ));
        }

        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| format!("dangling link to {:?}", id))?;
            if self.kind == ListKind::Doubly && node.prev != prev {
                return Err(format!("node {} has prev {:?}, expected {:?}", count, node.prev, prev));
            }
            count += 1;
            if count > self.len {
                return Err("cycle or overlong chain".to_string());
            }
            prev = Some(id);
            cursor = node.next;
        }

        if count != self.len {
            return Err(format!("{} reachable nodes, len is {}", count, self.len));
        }
        if prev != self.tail {
            return Err("walk from head does not end at tail".to_string());
        }
        Ok(())
    }

    /// Start an insert of `data` so that it ends up at index `pos`.
    ///
    /// Fails with [`VisualizerError::IndexOutOfRange`] unless `pos <= len`.
    pub fn insert(&mut self, data: i64, pos: usize) -> VisualizerResult<ListInsert<'_>> {
        if pos > self.len {
            return Err(VisualizerError::IndexOutOfRange {
                index: pos,
                len: self.len,
            });
        }
        Ok(ListInsert {
            list: self,
            data,
            pos,
            phase: InsertPhase::Start,
            state: EngineState::Idle,
            created: None,
        })
    }

    /// Start removing the node at index `pos`.
    ///
    /// Fails with [`VisualizerError::IndexOutOfRange`] unless `pos < len`.
    pub fn remove(&mut self, pos: usize) -> VisualizerResult<ListRemove<'_>> {
        if pos >= self.len {
            return Err(VisualizerError::IndexOutOfRange {
                index: pos,
                len: self.len,
            });
        }
        Ok(ListRemove {
            list: self,
            pos,
            phase: RemovePhase::Start,
            state: EngineState::Idle,
            removed: None,
        })
    }

    /// Start a linear search for the first node holding `data`
    pub fn search(&self, data: i64) -> ListSearch<'_> {
        ListSearch {
            list: self,
            target: data,
            cursor: None,
            index: 0,
            started: false,
            state: EngineState::Idle,
            found: None,
        }
    }

    // Raw link surgery. None of these emit checkpoints.

    fn alloc(&mut self, data: i64) -> NodeId {
        self.nodes.alloc(ListNode {
            data,
            next: None,
            prev: None,
        })
    }

    fn is_doubly(&self) -> bool {
        self.kind == ListKind::Doubly
    }

    fn link_front(&mut self, id: NodeId) {
        let old_head = self.head;
        self.nodes[id].next = old_head;
        match old_head {
            Some(h) if self.is_doubly() => self.nodes[h].prev = Some(id),
            Some(_) => {}
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    fn link_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        if self.is_doubly() {
            self.nodes[id].prev = old_tail;
        }
        match old_tail {
            Some(t) => self.nodes[t].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Splice `id` directly after `before`
    fn link_after(&mut self, before: NodeId, id: NodeId) {
        let after = self.nodes[before].next;
        self.nodes[id].next = after;
        self.nodes[before].next = Some(id);
        if self.is_doubly() {
            self.nodes[id].prev = Some(before);
            if let Some(a) = after {
                self.nodes[a].prev = Some(id);
            }
        }
        if after.is_none() {
            self.tail = Some(id);
        }
        self.len += 1;
    }

    /// Unlink the node following `before` (or the head when `before` is `None`)
    fn unlink_after(&mut self, before: Option<NodeId>) -> Option<(NodeId, i64)> {
        let target = match before {
            Some(b) => self.nodes[b].next?,
            None => self.head?,
        };
        let after = self.nodes[target].next;

        match before {
            Some(b) => self.nodes[b].next = after,
            None => self.head = after,
        }
        match after {
            Some(a) if self.is_doubly() => self.nodes[a].prev = before,
            Some(_) => {}
            None => self.tail = before,
        }

        self.len -= 1;
        let node = self.nodes.free(target)?;
        Some((target, node.data))
    }

    fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next
    }

    fn prev_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].prev
    }
}

/// Cursor walking towards a target index, one node per step
#[derive(Debug, Clone, Copy)]
struct Walk {
    cursor: NodeId,
    index: usize,
    target: usize,
    from_tail: bool,
}

enum WalkStep {
    Continue,
    Arrived(NodeId),
}

impl Walk {
    fn from_head(list: &LinkedList, target: usize) -> Option<Walk> {
        Some(Walk {
            cursor: list.head?,
            index: 0,
            target,
            from_tail: false,
        })
    }

    fn from_tail(list: &LinkedList, target: usize) -> Option<Walk> {
        Some(Walk {
            cursor: list.tail?,
            index: list.len.checked_sub(1)?,
            target,
            from_tail: true,
        })
    }

    /// Highlight the node under the cursor, then move towards the target
    fn advance(&mut self, list: &LinkedList, trace: &mut Trace) -> WalkStep {
        trace.checkpoint(Checkpoint::NodeVisited {
            index: self.index,
            node: self.cursor,
        });
        if self.index == self.target {
            return WalkStep::Arrived(self.cursor);
        }

        let next = if self.from_tail {
            list.prev_of(self.cursor)
        } else {
            list.next_of(self.cursor)
        };
        match next {
            Some(id) => {
                self.cursor = id;
                if self.from_tail {
                    self.index -= 1;
                } else {
                    self.index += 1;
                }
                WalkStep::Continue
            }
            None => unreachable!("walk ran off the end of a list of length {}", list.len),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum InsertPhase {
    Start,
    Walking(Walk),
    /// Splice after the node at `pos - 1`
    Link(NodeId),
    Done,
}

/// Stepwise insert returned by [`LinkedList::insert`]
pub struct ListInsert<'a> {
    list: &'a mut LinkedList,
    data: i64,
    pos: usize,
    phase: InsertPhase,
    state: EngineState,
    created: Option<NodeId>,
}

impl ListInsert<'_> {
    /// Handle of the new node once it has been created
    pub fn created(&self) -> Option<NodeId> {
        self.created
    }

    fn start(&mut self, trace: &mut Trace) -> InsertPhase {
        let (pos, len, data) = (self.pos, self.list.len, self.data);
        trace.checkpoint(Checkpoint::ColorsReset);

        if len == 0 {
            trace.explain(format!(
                "The {} is empty, so {} becomes both head and tail.",
                self.list.kind.noun(),
                data
            ));
            let id = self.list.alloc(data);
            self.list.link_back(id);
            self.created = Some(id);
            trace.checkpoint(Checkpoint::NodeCreated {
                index: 0,
                node: id,
                data,
            });
            return InsertPhase::Done;
        }

        if pos == 0 {
            trace.explain(format!("Inserting {} as the new head.", data));
            trace.checkpoint(Checkpoint::NodesShifted { from: 0, offset: 1 });
            let id = self.list.alloc(data);
            self.list.link_front(id);
            self.created = Some(id);
            trace.checkpoint(Checkpoint::NodeCreated {
                index: 0,
                node: id,
                data,
            });
            trace.checkpoint(Checkpoint::ArrowCreated { from: 0, to: 1 });
            return InsertPhase::Done;
        }

        if pos == len {
            trace.explain(format!(
                "Inserting {} as the new tail; the tail reference makes this O(1).",
                data
            ));
            let id = self.list.alloc(data);
            self.list.link_back(id);
            self.created = Some(id);
            trace.checkpoint(Checkpoint::NodeCreated {
                index: pos,
                node: id,
                data,
            });
            trace.checkpoint(Checkpoint::ArrowCreated {
                from: pos - 1,
                to: pos,
            });
            return InsertPhase::Done;
        }

        let from_tail = self.list.kind == ListKind::Doubly && 2 * pos >= len;
        let walk = if from_tail {
            trace.explain(format!(
                "Position {} is closer to the tail, walking backwards to index {}.",
                pos, pos
            ));
            Walk::from_tail(self.list, pos)
        } else {
            trace.explain(format!("Walking from the head to index {}.", pos - 1));
            Walk::from_head(self.list, pos - 1)
        };
        match walk {
            Some(w) => InsertPhase::Walking(w),
            None => InsertPhase::Done,
        }
    }

    fn link(&mut self, before: NodeId, trace: &mut Trace) {
        let (pos, data) = (self.pos, self.data);
        trace.explain(format!(
            "Linking {} between index {} and index {}.",
            data,
            pos - 1,
            pos
        ));
        trace.checkpoint(Checkpoint::NodesShifted {
            from: pos,
            offset: 1,
        });
        let id = self.list.alloc(data);
        self.list.link_after(before, id);
        self.created = Some(id);
        trace.checkpoint(Checkpoint::NodeCreated {
            index: pos,
            node: id,
            data,
        });
        trace.checkpoint(Checkpoint::ArrowRerouted {
            from: pos - 1,
            to: pos,
        });
        trace.checkpoint(Checkpoint::ArrowCreated {
            from: pos,
            to: pos + 1,
        });
    }
}

impl Engine for ListInsert<'_> {
    fn name(&self) -> &'static str {
        "list insert"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        self.phase = match self.phase {
            InsertPhase::Start => {
                transition(self.name(), &mut self.state, EngineState::Running);
                self.start(trace)
            }
            InsertPhase::Walking(mut walk) => match walk.advance(self.list, trace) {
                WalkStep::Continue => InsertPhase::Walking(walk),
                // walking backwards lands on the node that will follow the new one
                WalkStep::Arrived(id) if walk.from_tail => match self.list.prev_of(id) {
                    Some(before) => InsertPhase::Link(before),
                    None => InsertPhase::Done,
                },
                WalkStep::Arrived(id) => InsertPhase::Link(id),
            },
            InsertPhase::Link(before) => {
                self.link(before, trace);
                InsertPhase::Done
            }
            InsertPhase::Done => InsertPhase::Done,
        };

        if matches!(self.phase, InsertPhase::Done) {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RemovePhase {
    Start,
    Walking(Walk),
    /// Unlink the node after `before`
    Unlink(NodeId),
    Done,
}

/// Stepwise removal returned by [`LinkedList::remove`]
pub struct ListRemove<'a> {
    list: &'a mut LinkedList,
    pos: usize,
    phase: RemovePhase,
    state: EngineState,
    removed: Option<i64>,
}

impl ListRemove<'_> {
    /// Value of the removed node once it has been unlinked
    pub fn removed(&self) -> Option<i64> {
        self.removed
    }

    fn start(&mut self, trace: &mut Trace) -> RemovePhase {
        let (pos, len) = (self.pos, self.list.len);
        trace.checkpoint(Checkpoint::ColorsReset);

        if pos == 0 {
            trace.explain("Removing the head; its successor becomes the new head.");
            if len > 1 {
                trace.checkpoint(Checkpoint::ArrowRemoved { from: 0 });
            }
            if let Some((node, data)) = self.list.unlink_after(None) {
                self.removed = Some(data);
                trace.checkpoint(Checkpoint::NodeRemoved { index: 0, node });
            }
            if len > 1 {
                trace.checkpoint(Checkpoint::NodesShifted {
                    from: 1,
                    offset: -1,
                });
            }
            return RemovePhase::Done;
        }

        let is_tail = pos == len - 1;
        match self.list.kind {
            ListKind::Doubly if is_tail => {
                trace.explain("Removing the tail; its predecessor is one prev link away.");
                match self.list.tail.and_then(|t| self.list.prev_of(t)) {
                    Some(before) => RemovePhase::Unlink(before),
                    None => RemovePhase::Done,
                }
            }
            ListKind::Doubly if 2 * pos >= len => {
                trace.explain(format!(
                    "Position {} is closer to the tail, walking backwards to index {}.",
                    pos,
                    pos + 1
                ));
                walk_or_done(Walk::from_tail(self.list, pos + 1))
            }
            _ => {
                if is_tail {
                    trace.explain("Removing the tail; walking to its predecessor first.");
                } else {
                    trace.explain(format!("Walking from the head to index {}.", pos - 1));
                }
                walk_or_done(Walk::from_head(self.list, pos - 1))
            }
        }
    }

    fn unlink(&mut self, before: NodeId, trace: &mut Trace) {
        let pos = self.pos;
        let was_tail = pos + 1 == self.list.len;

        let dropped_arrow = if was_tail { pos - 1 } else { pos };
        trace.checkpoint(Checkpoint::ArrowRemoved {
            from: dropped_arrow,
        });
        if !was_tail {
            trace.checkpoint(Checkpoint::ArrowRerouted {
                from: pos - 1,
                to: pos + 1,
            });
        }

        if let Some((node, data)) = self.list.unlink_after(Some(before)) {
            self.removed = Some(data);
            trace.explain(format!("Unlinked {} from index {}.", data, pos));
            trace.checkpoint(Checkpoint::NodeRemoved { index: pos, node });
        }

        if !was_tail {
            trace.checkpoint(Checkpoint::NodesShifted {
                from: pos + 1,
                offset: -1,
            });
            trace.checkpoint(Checkpoint::ArrowRerouted {
                from: pos - 1,
                to: pos,
            });
        }
    }
}

fn walk_or_done(walk: Option<Walk>) -> RemovePhase {
    match walk {
        Some(w) => RemovePhase::Walking(w),
        None => RemovePhase::Done,
    }
}

impl Engine for ListRemove<'_> {
    fn name(&self) -> &'static str {
        "list remove"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        self.phase = match self.phase {
            RemovePhase::Start => {
                transition(self.name(), &mut self.state, EngineState::Running);
                self.start(trace)
            }
            RemovePhase::Walking(mut walk) => match walk.advance(self.list, trace) {
                WalkStep::Continue => RemovePhase::Walking(walk),
                // walking backwards lands on the successor of the doomed node
                WalkStep::Arrived(id) if walk.from_tail => {
                    match self.list.prev_of(id).and_then(|t| self.list.prev_of(t)) {
                        Some(before) => RemovePhase::Unlink(before),
                        None => RemovePhase::Done,
                    }
                }
                WalkStep::Arrived(id) => RemovePhase::Unlink(id),
            },
            RemovePhase::Unlink(before) => {
                self.unlink(before, trace);
                RemovePhase::Done
            }
            RemovePhase::Done => RemovePhase::Done,
        };

        if matches!(self.phase, RemovePhase::Done) {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

/// Stepwise linear search returned by [`LinkedList::search`]
pub struct ListSearch<'a> {
    list: &'a LinkedList,
    target: i64,
    cursor: Option<NodeId>,
    index: usize,
    started: bool,
    state: EngineState,
    found: Option<usize>,
}

impl ListSearch<'_> {
    /// Index of the first match; `None` while running or when absent
    pub fn found(&self) -> Option<usize> {
        self.found
    }

    fn finish(&mut self) -> Progress {
        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

impl Engine for ListSearch<'_> {
    fn name(&self) -> &'static str {
        "list search"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if !self.started {
            self.started = true;
            transition(self.name(), &mut self.state, EngineState::Running);
            trace.checkpoint(Checkpoint::ColorsReset);
            trace.explain(format!("Searching for {} starting at the head.", self.target));
            self.cursor = self.list.head;
            if self.cursor.is_none() {
                trace.explain("The list is empty.");
                trace.checkpoint(Checkpoint::SearchExhausted);
                return self.finish();
            }
            return Progress::Pending;
        }

        let Some(id) = self.cursor else {
            return self.finish();
        };
        let (data, next) = {
            let node = &self.list.nodes[id];
            (node.data, node.next)
        };

        if data == self.target {
            self.found = Some(self.index);
            trace.checkpoint(Checkpoint::NodeFound {
                index: self.index,
                node: id,
            });
            trace.explain(format!("Found {} at index {}.", self.target, self.index));
            self.cursor = None;
            return self.finish();
        }

        trace.checkpoint(Checkpoint::NodeVisited {
            index: self.index,
            node: id,
        });
        self.cursor = next;
        self.index += 1;

        if self.cursor.is_none() {
            trace.explain(format!("Reached the tail; {} is not in the list.", self.target));
            trace.checkpoint(Checkpoint::SearchExhausted);
            return self.finish();
        }
        Progress::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visits(trace: &Trace) -> Vec<usize> {
        trace
            .checkpoints()
            .filter_map(|c| match c {
                Checkpoint::NodeVisited { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_insert_into_empty_list() {
        let mut list = LinkedList::singly();
        let trace = list.insert(4, 0).unwrap().run_to_end();
        assert_eq!(list.values(), vec![4]);
        assert!(trace
            .checkpoints()
            .any(|c| matches!(c, Checkpoint::NodeCreated { index: 0, data: 4, .. })));
        list.check_links().unwrap();
    }

    #[test]
    fn test_insert_past_end_is_rejected() {
        let mut list = LinkedList::from_values(ListKind::Singly, &[1, 2]);
        let err = list.insert(9, 3).err();
        assert_eq!(err, Some(VisualizerError::IndexOutOfRange { index: 3, len: 2 }));
        assert_eq!(list.values(), vec![1, 2]);
    }

    #[test]
    fn test_singly_middle_insert_walks_from_head() {
        let mut list = LinkedList::from_values(ListKind::Singly, &[10, 20, 30, 40, 50]);
        let trace = list.insert(35, 3).unwrap().run_to_end();
        assert_eq!(visits(&trace), vec![0, 1, 2]);
        assert_eq!(list.values(), vec![10, 20, 30, 35, 40, 50]);
        list.check_links().unwrap();
    }

    #[test]
    fn test_doubly_middle_insert_walks_from_tail() {
        let mut list = LinkedList::from_values(ListKind::Doubly, &[10, 20, 30, 40, 50]);
        let trace = list.insert(35, 3).unwrap().run_to_end();
        assert_eq!(visits(&trace), vec![4, 3]);
        assert_eq!(list.values(), vec![10, 20, 30, 35, 40, 50]);
        assert_eq!(
            list.values_backward(),
            Some(vec![50, 40, 35, 30, 20, 10])
        );
        list.check_links().unwrap();
    }

    #[test]
    fn test_doubly_remove_tail_is_constant_time() {
        let mut list = LinkedList::from_values(ListKind::Doubly, &[1, 2, 3, 4]);
        let mut op = list.remove(3).unwrap();
        let trace = op.run_to_end();
        assert_eq!(op.removed(), Some(4));
        assert!(visits(&trace).is_empty());
        assert_eq!(list.values(), vec![1, 2, 3]);
        list.check_links().unwrap();
    }

    #[test]
    fn test_singly_remove_tail_walks_to_predecessor() {
        let mut list = LinkedList::from_values(ListKind::Singly, &[1, 2, 3, 4]);
        let trace = list.remove(3).unwrap().run_to_end();
        assert_eq!(visits(&trace), vec![0, 1, 2]);
        assert_eq!(list.values(), vec![1, 2, 3]);
        list.check_links().unwrap();
    }

    #[test]
    fn test_doubly_remove_middle_from_tail() {
        let mut list = LinkedList::from_values(ListKind::Doubly, &[1, 2, 3, 4, 5, 6]);
        let mut op = list.remove(4).unwrap();
        let trace = op.run_to_end();
        assert_eq!(op.removed(), Some(5));
        assert_eq!(visits(&trace), vec![5]);
        assert_eq!(list.values(), vec![1, 2, 3, 4, 6]);
        assert_eq!(list.values_backward(), Some(vec![6, 4, 3, 2, 1]));
        list.check_links().unwrap();
    }

    #[test]
    fn test_remove_head_of_single_node_list() {
        let mut list = LinkedList::from_values(ListKind::Doubly, &[8]);
        list.remove(0).unwrap().run_to_end();
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        list.check_links().unwrap();
    }

    #[test]
    fn test_search_finds_first_match() {
        let list = LinkedList::from_values(ListKind::Singly, &[5, 3, 8, 3]);
        let mut search = list.search(3);
        let trace = search.run_to_end();
        assert_eq!(search.found(), Some(1));
        assert_eq!(visits(&trace), vec![0]);
        assert_eq!(search.state(), EngineState::Idle);
    }

    #[test]
    fn test_search_empty_list() {
        let list = LinkedList::doubly();
        let mut search = list.search(1);
        let trace = search.run_to_end();
        assert_eq!(search.found(), None);
        assert!(trace
            .checkpoints()
            .any(|c| *c == Checkpoint::SearchExhausted));
    }
}
