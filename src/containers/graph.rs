//! Adjacency-list graphs
//!
//! One [`Graph`] type covers all four variants through [`GraphKind`]:
//! weighted or unweighted, directed or undirected. Undirected edges are stored
//! in both adjacency lists with the same weight, so the raw entry count is
//! twice the edge count.
//!
//! Vertices carry a canvas [`Position`]. Weighted edges take the rounded
//! Euclidean distance between their endpoints, computed once when the edge
//! is added.

use crate::checkpoint::{Checkpoint, Trace};
use crate::engine::{transition, Engine, EngineState, Progress};
use crate::errors::{VisualizerError, VisualizerResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Canvas coordinates of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Euclidean distance rounded to the nearest integer
    pub fn distance(self, other: Position) -> u32 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt().round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphKind {
    pub weighted: bool,
    pub directed: bool,
}

impl GraphKind {
    pub const UNWEIGHTED_UNDIRECTED: GraphKind = GraphKind {
        weighted: false,
        directed: false,
    };
    pub const UNWEIGHTED_DIRECTED: GraphKind = GraphKind {
        weighted: false,
        directed: true,
    };
    pub const WEIGHTED_UNDIRECTED: GraphKind = GraphKind {
        weighted: true,
        directed: false,
    };
    pub const WEIGHTED_DIRECTED: GraphKind = GraphKind {
        weighted: true,
        directed: true,
    };
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} graph",
            if self.weighted { "weighted" } else { "unweighted" },
            if self.directed { "directed" } else { "undirected" }
        )
    }
}

/// Adjacency entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: VertexId,
    pub weight: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    order: Vec<VertexId>,
    positions: FxHashMap<VertexId, Position>,
    adjacency: FxHashMap<VertexId, Vec<Edge>>,
}

impl Graph {
    pub fn new(kind: GraphKind) -> Self {
        Graph {
            kind,
            order: Vec::new(),
            positions: FxHashMap::default(),
            adjacency: FxHashMap::default(),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of edges; each undirected edge counts once
    pub fn edge_count(&self) -> usize {
        let entries: usize = self.adjacency.values().map(Vec::len).sum();
        if self.kind.directed {
            entries
        } else {
            entries / 2
        }
    }

    /// Vertices in the order they were added
    pub fn vertices(&self) -> &[VertexId] {
        &self.order
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.positions.contains_key(&v)
    }

    pub fn position(&self, v: VertexId) -> Option<Position> {
        self.positions.get(&v).copied()
    }

    /// Outgoing adjacency entries of `v`, in insertion order
    pub fn neighbours(&self, v: VertexId) -> &[Edge] {
        self.adjacency.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_exists(&self, from: VertexId, to: VertexId) -> bool {
        self.neighbours(from).iter().any(|e| e.to == to)
    }

    /// Cached weight of the edge `from -> to`; `None` if absent or unweighted
    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> Option<u32> {
        self.neighbours(from)
            .iter()
            .find(|e| e.to == to)
            .and_then(|e| e.weight)
    }

    fn require(&self, v: VertexId) -> VisualizerResult<()> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(VisualizerError::graph(format!("vertex {} has not been added", v)))
        }
    }

    pub fn add_vertex(&mut self, id: VertexId, position: Position) -> VisualizerResult<AddVertex<'_>> {
        if self.contains(id) {
            return Err(VisualizerError::graph(format!("vertex {} already exists", id)));
        }
        Ok(AddVertex {
            graph: self,
            id,
            position,
            done: false,
            state: EngineState::Idle,
        })
    }

    /// Start adding `from -> to` (and `to -> from` when undirected).
    ///
    /// Both endpoints must exist and differ. A duplicate edge is not an
    /// error; the engine reports it and leaves the graph unchanged.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> VisualizerResult<AddEdge<'_>> {
        self.require(from)?;
        self.require(to)?;
        if from == to {
            return Err(VisualizerError::graph(format!(
                "self-loop on {} is not supported",
                from
            )));
        }
        Ok(AddEdge {
            graph: self,
            from,
            to,
            added: None,
            state: EngineState::Idle,
        })
    }

    /// Start a breadth-first or depth-first traversal from `start`
    pub fn traverse(&self, start: VertexId, order: TraversalOrder) -> VisualizerResult<Traversal<'_>> {
        self.require(start)?;
        Ok(Traversal {
            graph: self,
            start,
            order,
            pending: VecDeque::new(),
            discovered: FxHashSet::default(),
            visit_order: Vec::new(),
            started: false,
            state: EngineState::Idle,
        })
    }
}

/// Single-step vertex insertion returned by [`Graph::add_vertex`]
pub struct AddVertex<'a> {
    graph: &'a mut Graph,
    id: VertexId,
    position: Position,
    done: bool,
    state: EngineState,
}

impl Engine for AddVertex<'_> {
    fn name(&self) -> &'static str {
        "add vertex"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if self.done {
            return Progress::Complete;
        }
        self.done = true;
        transition(self.name(), &mut self.state, EngineState::Running);

        let (id, position) = (self.id, self.position);
        self.graph.order.push(id);
        self.graph.positions.insert(id, position);
        self.graph.adjacency.insert(id, Vec::new());
        trace.explain(format!("Adding vertex {}.", id));
        trace.checkpoint(Checkpoint::VertexAdded {
            vertex: id,
            position,
        });

        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

/// Single-step edge insertion returned by [`Graph::add_edge`]
pub struct AddEdge<'a> {
    graph: &'a mut Graph,
    from: VertexId,
    to: VertexId,
    added: Option<bool>,
    state: EngineState,
}

impl AddEdge<'_> {
    /// `Some(false)` when the edge already existed
    pub fn added(&self) -> Option<bool> {
        self.added
    }
}

impl Engine for AddEdge<'_> {
    fn name(&self) -> &'static str {
        "add edge"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if self.added.is_some() {
            return Progress::Complete;
        }
        transition(self.name(), &mut self.state, EngineState::Running);

        let (from, to) = (self.from, self.to);
        let kind = self.graph.kind;
        if self.graph.edge_exists(from, to) {
            trace.explain(format!("The edge {} - {} already exists.", from, to));
            self.added = Some(false);
        } else {
            let weight = if kind.weighted {
                match (self.graph.position(from), self.graph.position(to)) {
                    (Some(a), Some(b)) => Some(a.distance(b)),
                    _ => None,
                }
            } else {
                None
            };

            self.graph
                .adjacency
                .entry(from)
                .or_default()
                .push(Edge { to, weight });
            if !kind.directed {
                self.graph
                    .adjacency
                    .entry(to)
                    .or_default()
                    .push(Edge { to: from, weight });
            }

            match weight {
                Some(w) => trace.explain(format!("Connecting {} and {} with length {}.", from, to, w)),
                None => trace.explain(format!("Connecting {} and {}.", from, to)),
            }
            trace.checkpoint(Checkpoint::EdgeAdded {
                from,
                to,
                weight,
                directed: kind.directed,
            });
            self.added = Some(true);
        }

        transition(self.name(), &mut self.state, EngineState::Idle);
        Progress::Complete
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    BreadthFirst,
    DepthFirst,
}

/// Stepwise traversal returned by [`Graph::traverse`]; one vertex visited per step
pub struct Traversal<'a> {
    graph: &'a Graph,
    start: VertexId,
    order: TraversalOrder,
    /// Queue for BFS, stack (back is top) for DFS; entries carry the vertex they were reached from
    pending: VecDeque<(VertexId, Option<VertexId>)>,
    discovered: FxHashSet<VertexId>,
    visit_order: Vec<VertexId>,
    started: bool,
    state: EngineState,
}

impl Traversal<'_> {
    /// Vertices in the order they were visited
    pub fn visit_order(&self) -> &[VertexId] {
        &self.visit_order
    }

    fn next_pending(&mut self) -> Option<(VertexId, Option<VertexId>)> {
        match self.order {
            TraversalOrder::BreadthFirst => self.pending.pop_front(),
            TraversalOrder::DepthFirst => loop {
                let (v, parent) = self.pending.pop_back()?;
                if !self.discovered.contains(&v) {
                    return Some((v, parent));
                }
            },
        }
    }
}

impl Engine for Traversal<'_> {
    fn name(&self) -> &'static str {
        match self.order {
            TraversalOrder::BreadthFirst => "graph breadth-first traversal",
            TraversalOrder::DepthFirst => "graph depth-first traversal",
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if !self.started {
            self.started = true;
            transition(self.name(), &mut self.state, EngineState::Running);
            trace.checkpoint(Checkpoint::ColorsReset);
            trace.explain(format!("Starting the traversal at {}.", self.start));
            if self.order == TraversalOrder::BreadthFirst {
                self.discovered.insert(self.start);
            }
            self.pending.push_back((self.start, None));
        }

        let Some((v, parent)) = self.next_pending() else {
            trace.explain(format!(
                "Every vertex reachable from {} has been visited.",
                self.start
            ));
            transition(self.name(), &mut self.state, EngineState::Idle);
            return Progress::Complete;
        };

        let graph = self.graph;
        match self.order {
            TraversalOrder::BreadthFirst => {
                trace.checkpoint(Checkpoint::VertexVisited { vertex: v });
                self.visit_order.push(v);
                for edge in graph.neighbours(v) {
                    if self.discovered.insert(edge.to) {
                        trace.checkpoint(Checkpoint::EdgeTraversed { from: v, to: edge.to });
                        self.pending.push_back((edge.to, Some(v)));
                    }
                }
            }
            TraversalOrder::DepthFirst => {
                self.discovered.insert(v);
                if let Some(p) = parent {
                    trace.checkpoint(Checkpoint::EdgeTraversed { from: p, to: v });
                }
                trace.checkpoint(Checkpoint::VertexVisited { vertex: v });
                self.visit_order.push(v);
                // reversed so the first neighbour ends on top
                for edge in graph.neighbours(v).iter().rev() {
                    if !self.discovered.contains(&edge.to) {
                        self.pending.push_back((edge.to, Some(v)));
                    }
                }
            }
        }
        Progress::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(graph: &mut Graph, id: u32, x: i32, y: i32) {
        graph
            .add_vertex(VertexId(id), Position::new(x, y))
            .unwrap()
            .run_to_end();
    }

    fn edge(graph: &mut Graph, a: u32, b: u32) -> bool {
        let mut op = graph.add_edge(VertexId(a), VertexId(b)).unwrap();
        op.run_to_end();
        op.added() == Some(true)
    }

    #[test]
    fn test_undirected_edge_is_symmetric_and_counted_once() {
        let mut g = Graph::new(GraphKind::WEIGHTED_UNDIRECTED);
        vertex(&mut g, 0, 0, 0);
        vertex(&mut g, 1, 3, 4);
        assert!(edge(&mut g, 0, 1));

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight(VertexId(0), VertexId(1)), Some(5));
        assert_eq!(g.edge_weight(VertexId(1), VertexId(0)), Some(5));
    }

    #[test]
    fn test_duplicate_edge_is_ignored() {
        let mut g = Graph::new(GraphKind::UNWEIGHTED_UNDIRECTED);
        vertex(&mut g, 0, 0, 0);
        vertex(&mut g, 1, 1, 1);
        assert!(edge(&mut g, 0, 1));
        assert!(!edge(&mut g, 1, 0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_directed_edges_are_independent() {
        let mut g = Graph::new(GraphKind::UNWEIGHTED_DIRECTED);
        vertex(&mut g, 0, 0, 0);
        vertex(&mut g, 1, 1, 1);
        assert!(edge(&mut g, 0, 1));
        assert!(!g.edge_exists(VertexId(1), VertexId(0)));
        assert!(edge(&mut g, 1, 0));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_weight(VertexId(0), VertexId(1)), None);
    }

    #[test]
    fn test_unknown_vertex_is_rejected() {
        let mut g = Graph::new(GraphKind::UNWEIGHTED_UNDIRECTED);
        vertex(&mut g, 0, 0, 0);
        assert!(matches!(
            g.add_edge(VertexId(0), VertexId(9)).err(),
            Some(VisualizerError::InvalidGraphOperation { .. })
        ));
        assert!(g.add_vertex(VertexId(0), Position::default()).is_err());
    }

    #[test]
    fn test_traversal_orders() {
        // 0 - 1 - 3
        //  \
        //   2
        let mut g = Graph::new(GraphKind::UNWEIGHTED_UNDIRECTED);
        for id in 0..4 {
            vertex(&mut g, id, id as i32, 0);
        }
        edge(&mut g, 0, 1);
        edge(&mut g, 0, 2);
        edge(&mut g, 1, 3);

        let mut bfs = g.traverse(VertexId(0), TraversalOrder::BreadthFirst).unwrap();
        bfs.run_to_end();
        let ids: Vec<u32> = bfs.visit_order().iter().map(|v| v.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        let mut dfs = g.traverse(VertexId(0), TraversalOrder::DepthFirst).unwrap();
        dfs.run_to_end();
        let ids: Vec<u32> = dfs.visit_order().iter().map(|v| v.0).collect();
        assert_eq!(ids, vec![0, 1, 3, 2]);
    }
}
