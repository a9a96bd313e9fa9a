//! Checkpoints and the pending event buffer
//!
//! A [`Checkpoint`] records one observable step of an algorithm: a node was
//! created, an arrow was rerouted, a cell was marked. Payloads carry
//! structural references only (list indices, [`NodeId`]s, [`Coord`]s, values);
//! the renderer decides what those look like on screen.
//!
//! Engines never talk to the renderer directly. Each call to
//! [`Engine::step`](crate::engine::Engine::step) appends zero or more
//! [`Event`]s to a [`Trace`], which the sequencer drains in FIFO order.

use crate::containers::arena::NodeId;
use crate::containers::graph::{Position, VertexId};
use crate::grid::Coord;
use std::collections::VecDeque;
use std::fmt;

/// Highlight applied to a grid cell by a pathfinder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Cell being expanded right now
    Current,
    /// Cell whose neighbours have been examined
    Visited,
    /// Cell waiting in the open set
    Frontier,
    /// Cell on the reconstructed path
    Path,
}

/// One observable step of an algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkpoint {
    // Lists
    /// Clear every highlight on the current scene
    ColorsReset,
    NodeCreated {
        index: usize,
        node: NodeId,
        data: i64,
    },
    NodeVisited {
        index: usize,
        node: NodeId,
    },
    NodeFound {
        index: usize,
        node: NodeId,
    },
    NodeRemoved {
        index: usize,
        node: NodeId,
    },
    /// Every node at `from..` moved by `offset` positions
    NodesShifted {
        from: usize,
        offset: isize,
    },
    ArrowCreated {
        from: usize,
        to: usize,
    },
    ArrowRemoved {
        from: usize,
    },
    /// The arrow leaving `from` now points at `to`
    ArrowRerouted {
        from: usize,
        to: usize,
    },
    SearchExhausted,

    // Stack
    StackPushed {
        depth: usize,
        value: i64,
    },
    StackPopped {
        depth: usize,
        value: i64,
    },
    StackPeeked {
        depth: usize,
        value: i64,
    },

    // Hash table
    BucketHighlighted {
        bucket: usize,
        buckets: usize,
    },
    EntryVisited {
        bucket: usize,
        slot: usize,
    },
    BucketUpdated {
        bucket: usize,
        entries: Vec<(i64, i64)>,
    },

    // Graphs
    VertexAdded {
        vertex: VertexId,
        position: Position,
    },
    EdgeAdded {
        from: VertexId,
        to: VertexId,
        weight: Option<u32>,
        directed: bool,
    },
    VertexVisited {
        vertex: VertexId,
    },
    /// Traversal reached `to` through the edge from `from`
    EdgeTraversed {
        from: VertexId,
        to: VertexId,
    },

    // Number theory
    /// The numbers `2..=upto` were laid out for the sieve
    NumbersLaidOut {
        upto: u64,
    },
    SieveBase {
        num: u64,
    },
    NumberMarked {
        value: u64,
    },
    PrimesFound {
        primes: Vec<u64>,
    },
    /// Tree node `node` was split into a factor leaf and a quotient node
    FactorSplit {
        node: usize,
        factor_node: usize,
        factor: u64,
        quotient_node: usize,
        quotient: u64,
    },
    FactorLeaf {
        node: usize,
        value: u64,
    },
    FactorNodeDropped {
        node: usize,
    },
    GcdRow {
        row: usize,
        dividend: u64,
        divisor: u64,
        quotient: u64,
        remainder: u64,
    },
    GcdResult {
        value: u64,
    },

    // Grid
    /// Every cell became a wall
    GridFilled {
        rows: usize,
        cols: usize,
    },
    CellCarved {
        at: Coord,
    },
    /// Search bookkeeping cleared; carries the full layout so the scene can redraw it
    GridReset {
        rows: usize,
        cols: usize,
        walls: Vec<Coord>,
        weights: Vec<Coord>,
    },
    CellMarked {
        at: Coord,
        mark: Mark,
    },
    /// Run-through of the finished path, start first
    PathTraced {
        path: Vec<Coord>,
    },
}

impl Checkpoint {
    /// Short name used in logs and the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Checkpoint::ColorsReset => "colors-reset",
            Checkpoint::NodeCreated { .. } => "node-created",
            Checkpoint::NodeVisited { .. } => "node-visited",
            Checkpoint::NodeFound { .. } => "node-found",
            Checkpoint::NodeRemoved { .. } => "node-removed",
            Checkpoint::NodesShifted { .. } => "nodes-shifted",
            Checkpoint::ArrowCreated { .. } => "arrow-created",
            Checkpoint::ArrowRemoved { .. } => "arrow-removed",
            Checkpoint::ArrowRerouted { .. } => "arrow-rerouted",
            Checkpoint::SearchExhausted => "search-exhausted",
            Checkpoint::StackPushed { .. } => "stack-pushed",
            Checkpoint::StackPopped { .. } => "stack-popped",
            Checkpoint::StackPeeked { .. } => "stack-peeked",
            Checkpoint::BucketHighlighted { .. } => "bucket-highlighted",
            Checkpoint::EntryVisited { .. } => "entry-visited",
            Checkpoint::BucketUpdated { .. } => "bucket-updated",
            Checkpoint::VertexAdded { .. } => "vertex-added",
            Checkpoint::EdgeAdded { .. } => "edge-added",
            Checkpoint::VertexVisited { .. } => "vertex-visited",
            Checkpoint::EdgeTraversed { .. } => "edge-traversed",
            Checkpoint::NumbersLaidOut { .. } => "numbers-laid-out",
            Checkpoint::SieveBase { .. } => "sieve-base",
            Checkpoint::NumberMarked { .. } => "number-marked",
            Checkpoint::PrimesFound { .. } => "primes-found",
            Checkpoint::FactorSplit { .. } => "factor-split",
            Checkpoint::FactorLeaf { .. } => "factor-leaf",
            Checkpoint::FactorNodeDropped { .. } => "factor-node-dropped",
            Checkpoint::GcdRow { .. } => "gcd-row",
            Checkpoint::GcdResult { .. } => "gcd-result",
            Checkpoint::GridFilled { .. } => "grid-filled",
            Checkpoint::CellCarved { .. } => "cell-carved",
            Checkpoint::GridReset { .. } => "grid-reset",
            Checkpoint::CellMarked { .. } => "cell-marked",
            Checkpoint::PathTraced { .. } => "path-traced",
        }
    }

    /// Whether this checkpoint is a traversal highlight (a node or cell being looked at)
    pub fn is_traversal(&self) -> bool {
        matches!(
            self,
            Checkpoint::NodeVisited { .. }
                | Checkpoint::EntryVisited { .. }
                | Checkpoint::VertexVisited { .. }
                | Checkpoint::CellMarked {
                    mark: Mark::Current | Mark::Visited,
                    ..
                }
        )
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checkpoint::NodeCreated { index, data, .. } => {
                write!(f, "node-created[{}] = {}", index, data)
            }
            Checkpoint::NodeVisited { index, .. } => write!(f, "node-visited[{}]", index),
            Checkpoint::NodeFound { index, .. } => write!(f, "node-found[{}]", index),
            Checkpoint::NodeRemoved { index, .. } => write!(f, "node-removed[{}]", index),
            Checkpoint::NodesShifted { from, offset } => {
                write!(f, "nodes-shifted[{}..] by {:+}", from, offset)
            }
            Checkpoint::ArrowCreated { from, to } | Checkpoint::ArrowRerouted { from, to } => {
                write!(f, "{} {} -> {}", self.label(), from, to)
            }
            Checkpoint::CellCarved { at } => write!(f, "cell-carved {}", at),
            Checkpoint::CellMarked { at, mark } => write!(f, "cell-marked {} {:?}", at, mark),
            Checkpoint::NumberMarked { value } => write!(f, "number-marked {}", value),
            Checkpoint::GcdResult { value } => write!(f, "gcd-result {}", value),
            other => f.write_str(other.label()),
        }
    }
}

/// Item produced by an engine step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Checkpoint(Checkpoint),
    /// Human-readable caption for the current step
    Explain(String),
}

/// FIFO buffer of events an engine has produced but the sequencer has not delivered yet
#[derive(Debug, Default)]
pub struct Trace {
    events: VecDeque<Event>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checkpoint(&mut self, checkpoint: Checkpoint) {
        self.events.push_back(Event::Checkpoint(checkpoint));
    }

    pub fn explain(&mut self, text: impl Into<String>) {
        self.events.push_back(Event::Explain(text.into()));
    }

    /// Take the oldest pending event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pending checkpoints, oldest first
    pub fn checkpoints(&self) -> impl Iterator<Item = &Checkpoint> {
        self.events.iter().filter_map(|e| match e {
            Event::Checkpoint(c) => Some(c),
            Event::Explain(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_is_fifo() {
        let mut trace = Trace::new();
        trace.checkpoint(Checkpoint::ColorsReset);
        trace.explain("first");
        trace.checkpoint(Checkpoint::SearchExhausted);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.pop(), Some(Event::Checkpoint(Checkpoint::ColorsReset)));
        assert_eq!(trace.pop(), Some(Event::Explain("first".to_string())));
        assert_eq!(
            trace.pop(),
            Some(Event::Checkpoint(Checkpoint::SearchExhausted))
        );
        assert!(trace.is_empty());
    }

    #[test]
    fn test_traversal_classification() {
        let at = Coord::new(1, 1);
        assert!(Checkpoint::CellMarked {
            at,
            mark: Mark::Visited
        }
        .is_traversal());
        assert!(!Checkpoint::CellMarked {
            at,
            mark: Mark::Path
        }
        .is_traversal());
        assert!(!Checkpoint::ColorsReset.is_traversal());
    }

    #[test]
    fn test_display_uses_structural_references() {
        let c = Checkpoint::ArrowRerouted { from: 2, to: 4 };
        assert_eq!(c.to_string(), "arrow-rerouted 2 -> 4");
        let c = Checkpoint::NodesShifted { from: 3, offset: -1 };
        assert_eq!(c.to_string(), "nodes-shifted[3..] by -1");
    }
}
