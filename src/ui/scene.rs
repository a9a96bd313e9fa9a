//! Renderer-side picture of the running algorithm
//!
//! The scene never looks at the containers or grids the engines mutate. It is
//! rebuilt purely from the checkpoint stream, the same way a browser canvas
//! would be, so whatever it shows is exactly what the checkpoints describe.

use crate::checkpoint::{Checkpoint, Mark};
use crate::containers::{Position, VertexId};
use crate::grid::Coord;
use rustc_hash::{FxHashMap, FxHashSet};

/// Which kind of picture is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Family {
    #[default]
    Empty,
    List,
    Stack,
    Hash,
    Graph,
    Sieve,
    Factor,
    Gcd,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Visited,
    Found,
    Fresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSlot {
    pub data: i64,
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, Default)]
pub struct ListScene {
    /// `None` marks a gap left by a removal or opened for an insertion
    pub slots: Vec<Option<ListSlot>>,
    /// Arrow leaving each slot index
    pub arrows: FxHashMap<usize, usize>,
    pub exhausted: bool,
}

impl ListScene {
    /// Values currently on screen, gaps skipped
    pub fn values(&self) -> Vec<i64> {
        self.slots.iter().flatten().map(|s| s.data).collect()
    }

    fn clear_highlights(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.highlight = None;
        }
        self.exhausted = false;
    }

    fn highlight(&mut self, index: usize, highlight: Highlight) {
        if let Some(Some(slot)) = self.slots.get_mut(index) {
            slot.highlight = Some(highlight);
        }
    }

    fn shift(&mut self, from: usize, offset: isize) {
        if offset > 0 {
            for _ in 0..offset {
                let at = from.min(self.slots.len());
                self.slots.insert(at, None);
            }
        } else {
            for _ in 0..offset.unsigned_abs() {
                let at = from.saturating_sub(1);
                if at < self.slots.len() {
                    self.slots.remove(at);
                }
            }
        }
        let moved = |i: usize| {
            if i >= from {
                i.saturating_add_signed(offset)
            } else {
                i
            }
        };
        self.arrows = self
            .arrows
            .iter()
            .map(|(&a, &b)| (moved(a), moved(b)))
            .collect();
    }

    fn create(&mut self, index: usize, data: i64) {
        let slot = Some(ListSlot {
            data,
            highlight: Some(Highlight::Fresh),
        });
        if matches!(self.slots.get(index), Some(None)) {
            self.slots[index] = slot;
        } else {
            let at = index.min(self.slots.len());
            self.slots.insert(at, slot);
        }
    }

    fn remove(&mut self, index: usize) {
        if index + 1 == self.slots.len() {
            self.slots.pop();
        } else if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
        self.arrows.retain(|_, to| *to != index);
    }
}

#[derive(Debug, Clone, Default)]
pub struct StackScene {
    pub items: Vec<i64>,
    pub highlighted: Option<usize>,
    pub popped: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct HashScene {
    pub buckets: Vec<Vec<(i64, i64)>>,
    pub highlighted: Option<usize>,
    pub visited: Option<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct VertexView {
    pub id: VertexId,
    pub position: Position,
    pub visited: bool,
}

#[derive(Debug, Clone)]
pub struct EdgeView {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Option<u32>,
    pub directed: bool,
    pub traversed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GraphScene {
    pub vertices: Vec<VertexView>,
    pub edges: Vec<EdgeView>,
}

impl GraphScene {
    pub fn position(&self, id: VertexId) -> Option<Position> {
        self.vertices.iter().find(|v| v.id == id).map(|v| v.position)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SieveScene {
    pub upto: u64,
    pub base: Option<u64>,
    pub marked: FxHashSet<u64>,
    pub primes: Option<Vec<u64>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorView {
    pub value: u64,
    pub children: Option<(usize, usize)>,
    pub leaf: bool,
    pub dropped: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FactorScene {
    pub nodes: Vec<Option<FactorView>>,
}

impl FactorScene {
    fn set(&mut self, index: usize, view: FactorView) {
        if self.nodes.len() <= index {
            self.nodes.resize(index + 1, None);
        }
        self.nodes[index] = Some(view);
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut FactorView> {
        self.nodes.get_mut(index).and_then(Option::as_mut)
    }

    pub fn node(&self, index: usize) -> Option<&FactorView> {
        self.nodes.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GcdScene {
    /// `(dividend, divisor, quotient, remainder)`
    pub rows: Vec<(u64, u64, u64, u64)>,
    pub result: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    pub wall: bool,
    pub weight: bool,
    pub mark: Option<Mark>,
}

#[derive(Debug, Clone, Default)]
pub struct GridScene {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellView>,
    pub path: Vec<Coord>,
}

impl GridScene {
    fn resize(&mut self, rows: usize, cols: usize, wall: bool) {
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![
            CellView {
                wall,
                ..CellView::default()
            };
            rows * cols
        ];
        self.path.clear();
    }

    pub fn cell(&self, at: Coord) -> Option<&CellView> {
        if at.row < self.rows && at.col < self.cols {
            self.cells.get(at.row * self.cols + at.col)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, at: Coord) -> Option<&mut CellView> {
        if at.row < self.rows && at.col < self.cols {
            self.cells.get_mut(at.row * self.cols + at.col)
        } else {
            None
        }
    }
}

/// Everything the canvas pane draws
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub family: Family,
    pub list: ListScene,
    pub stack: StackScene,
    pub hash: HashScene,
    pub graph: GraphScene,
    pub sieve: SieveScene,
    pub factor: FactorScene,
    pub gcd: GcdScene,
    pub grid: GridScene,
    /// Checkpoints applied so far
    pub applied: usize,
    pub last: Option<&'static str>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one checkpoint into the picture
    pub fn apply(&mut self, checkpoint: &Checkpoint) {
        self.applied += 1;
        self.last = Some(checkpoint.label());

        match checkpoint {
            Checkpoint::ColorsReset => {
                self.list.clear_highlights();
                self.stack.highlighted = None;
                self.hash.highlighted = None;
                self.hash.visited = None;
                for v in &mut self.graph.vertices {
                    v.visited = false;
                }
                for e in &mut self.graph.edges {
                    e.traversed = false;
                }
            }

            Checkpoint::NodeCreated { index, data, .. } => {
                self.family = Family::List;
                self.list.create(*index, *data);
            }
            Checkpoint::NodeVisited { index, .. } => {
                self.family = Family::List;
                self.list.highlight(*index, Highlight::Visited);
            }
            Checkpoint::NodeFound { index, .. } => {
                self.family = Family::List;
                self.list.highlight(*index, Highlight::Found);
            }
            Checkpoint::NodeRemoved { index, .. } => self.list.remove(*index),
            Checkpoint::NodesShifted { from, offset } => self.list.shift(*from, *offset),
            Checkpoint::ArrowCreated { from, to } | Checkpoint::ArrowRerouted { from, to } => {
                self.list.arrows.insert(*from, *to);
            }
            Checkpoint::ArrowRemoved { from } => {
                self.list.arrows.remove(from);
            }
            Checkpoint::SearchExhausted => {
                self.family = Family::List;
                self.list.exhausted = true;
            }

            Checkpoint::StackPushed { depth, value } => {
                self.family = Family::Stack;
                self.stack.items.truncate(*depth);
                self.stack.items.push(*value);
                self.stack.highlighted = Some(*depth);
                self.stack.popped = None;
            }
            Checkpoint::StackPopped { depth, value } => {
                self.family = Family::Stack;
                self.stack.items.truncate(*depth);
                self.stack.highlighted = None;
                self.stack.popped = Some(*value);
            }
            Checkpoint::StackPeeked { depth, .. } => {
                self.family = Family::Stack;
                self.stack.highlighted = Some(*depth);
            }

            Checkpoint::BucketHighlighted { bucket, buckets } => {
                self.family = Family::Hash;
                if self.hash.buckets.len() != *buckets {
                    self.hash.buckets.resize(*buckets, Vec::new());
                }
                self.hash.highlighted = Some(*bucket);
                self.hash.visited = None;
            }
            Checkpoint::EntryVisited { bucket, slot } => {
                self.hash.visited = Some((*bucket, *slot));
            }
            Checkpoint::BucketUpdated { bucket, entries } => {
                self.family = Family::Hash;
                if self.hash.buckets.len() <= *bucket {
                    self.hash.buckets.resize(bucket + 1, Vec::new());
                }
                self.hash.buckets[*bucket] = entries.clone();
            }

            Checkpoint::VertexAdded { vertex, position } => {
                self.family = Family::Graph;
                self.graph.vertices.push(VertexView {
                    id: *vertex,
                    position: *position,
                    visited: false,
                });
            }
            Checkpoint::EdgeAdded {
                from,
                to,
                weight,
                directed,
            } => {
                self.family = Family::Graph;
                self.graph.edges.push(EdgeView {
                    from: *from,
                    to: *to,
                    weight: *weight,
                    directed: *directed,
                    traversed: false,
                });
            }
            Checkpoint::VertexVisited { vertex } => {
                self.family = Family::Graph;
                if let Some(v) = self.graph.vertices.iter_mut().find(|v| v.id == *vertex) {
                    v.visited = true;
                }
            }
            Checkpoint::EdgeTraversed { from, to } => {
                let (from, to) = (*from, *to);
                if let Some(e) = self.graph.edges.iter_mut().find(|e| {
                    (e.from == from && e.to == to) || (!e.directed && e.from == to && e.to == from)
                }) {
                    e.traversed = true;
                }
            }

            Checkpoint::NumbersLaidOut { upto } => {
                self.family = Family::Sieve;
                self.sieve = SieveScene {
                    upto: *upto,
                    ..SieveScene::default()
                };
            }
            Checkpoint::SieveBase { num } => self.sieve.base = Some(*num),
            Checkpoint::NumberMarked { value } => {
                self.sieve.marked.insert(*value);
            }
            Checkpoint::PrimesFound { primes } => {
                self.sieve.base = None;
                self.sieve.primes = Some(primes.clone());
            }

            Checkpoint::FactorSplit {
                node,
                factor_node,
                factor,
                quotient_node,
                quotient,
            } => {
                if self.family != Family::Factor {
                    self.factor = FactorScene::default();
                    self.family = Family::Factor;
                }
                if self.factor.node(*node).is_none() {
                    self.factor.set(
                        *node,
                        FactorView {
                            value: factor * quotient,
                            children: None,
                            leaf: false,
                            dropped: false,
                        },
                    );
                }
                if let Some(parent) = self.factor.node_mut(*node) {
                    parent.children = Some((*factor_node, *quotient_node));
                }
                self.factor.set(
                    *factor_node,
                    FactorView {
                        value: *factor,
                        children: None,
                        leaf: true,
                        dropped: false,
                    },
                );
                self.factor.set(
                    *quotient_node,
                    FactorView {
                        value: *quotient,
                        children: None,
                        leaf: false,
                        dropped: false,
                    },
                );
            }
            Checkpoint::FactorLeaf { node, value } => {
                if self.family != Family::Factor {
                    self.factor = FactorScene::default();
                    self.family = Family::Factor;
                }
                self.factor.set(
                    *node,
                    FactorView {
                        value: *value,
                        children: None,
                        leaf: true,
                        dropped: false,
                    },
                );
            }
            Checkpoint::FactorNodeDropped { node } => {
                if let Some(view) = self.factor.node_mut(*node) {
                    view.dropped = true;
                }
            }

            Checkpoint::GcdRow {
                row,
                dividend,
                divisor,
                quotient,
                remainder,
            } => {
                if self.family != Family::Gcd {
                    self.gcd = GcdScene::default();
                    self.family = Family::Gcd;
                }
                self.gcd.rows.truncate(*row);
                self.gcd.rows.push((*dividend, *divisor, *quotient, *remainder));
            }
            Checkpoint::GcdResult { value } => {
                if self.family != Family::Gcd {
                    self.gcd = GcdScene::default();
                    self.family = Family::Gcd;
                }
                self.gcd.result = Some(*value);
            }

            Checkpoint::GridFilled { rows, cols } => {
                self.family = Family::Grid;
                self.grid.resize(*rows, *cols, true);
            }
            Checkpoint::CellCarved { at } => {
                if let Some(cell) = self.grid.cell_mut(*at) {
                    cell.wall = false;
                }
            }
            Checkpoint::GridReset {
                rows,
                cols,
                walls,
                weights,
            } => {
                self.family = Family::Grid;
                self.grid.resize(*rows, *cols, false);
                for at in walls {
                    if let Some(cell) = self.grid.cell_mut(*at) {
                        cell.wall = true;
                    }
                }
                for at in weights {
                    if let Some(cell) = self.grid.cell_mut(*at) {
                        cell.weight = true;
                    }
                }
            }
            Checkpoint::CellMarked { at, mark } => {
                if let Some(cell) = self.grid.cell_mut(*at) {
                    cell.mark = Some(*mark);
                }
            }
            Checkpoint::PathTraced { path } => self.grid.path = path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::{LinkedList, ListKind, Stack};
    use crate::engine::Engine;

    fn replay(scene: &mut Scene, trace: crate::checkpoint::Trace) {
        for c in trace.checkpoints() {
            scene.apply(c);
        }
    }

    #[test]
    fn test_list_scene_tracks_list_contents() {
        let mut list = LinkedList::new(ListKind::Doubly);
        let mut scene = Scene::new();
        for (data, pos) in [(1, 0), (2, 1), (3, 2), (0, 0), (9, 2), (8, 4)] {
            replay(&mut scene, list.insert(data, pos).unwrap().run_to_end());
            assert_eq!(scene.list.values(), list.values());
        }
        for pos in [3, 0, 3, 1] {
            replay(&mut scene, list.remove(pos).unwrap().run_to_end());
            assert_eq!(scene.list.values(), list.values());
        }
        assert_eq!(scene.family, Family::List);
    }

    #[test]
    fn test_list_scene_arrows_follow_nodes() {
        let mut list = LinkedList::new(ListKind::Singly);
        let mut scene = Scene::new();
        for (data, pos) in [(1, 0), (2, 1), (3, 2), (5, 1)] {
            replay(&mut scene, list.insert(data, pos).unwrap().run_to_end());
        }
        let mut arrows: Vec<_> = scene.list.arrows.iter().map(|(&a, &b)| (a, b)).collect();
        arrows.sort();
        assert_eq!(arrows, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_stack_scene_mirrors_stack() {
        let mut stack = Stack::new();
        let mut scene = Scene::new();
        replay(&mut scene, stack.push(4).run_to_end());
        replay(&mut scene, stack.push(6).run_to_end());
        replay(&mut scene, stack.pop().run_to_end());
        assert_eq!(scene.stack.items, stack.values());
        assert_eq!(scene.stack.popped, Some(6));
    }

    #[test]
    fn test_grid_reset_restores_layout() {
        let mut scene = Scene::new();
        scene.apply(&Checkpoint::GridReset {
            rows: 3,
            cols: 3,
            walls: vec![Coord::new(1, 1)],
            weights: vec![Coord::new(0, 2)],
        });
        assert!(scene.grid.cell(Coord::new(1, 1)).unwrap().wall);
        assert!(scene.grid.cell(Coord::new(0, 2)).unwrap().weight);
        assert!(scene.grid.cell(Coord::new(3, 0)).is_none());
    }
}
