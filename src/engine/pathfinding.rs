//! Grid pathfinders
//!
//! One [`Pathfinder`] engine runs any of the four [`PathAlgorithm`]s. They
//! share the lifecycle and differ only in how the next cell is chosen:
//!
//! | Algorithm | Frontier | Distance |
//! |---|---|---|
//! | BFS | FIFO queue | hop count (weights ignored) |
//! | Dijkstra | binary heap keyed by `(distance, row, col)` | sum of entry costs |
//! | A* | open list, min by `(g + h, h)` | sum of entry costs |
//! | DFS | stack, pushes down, left, up, right | sum of entry costs along the DFS tree |
//!
//! Every run resets the grid's search bookkeeping first, so engines can be run
//! back to back on the same grid. Relaxation only updates a cell when the new
//! distance is strictly smaller.
//!
//! After the target is reached the path is walked back through `predecessor`
//! links, marked one cell per step from the target back to the start, and
//! finally handed over whole in a [`Checkpoint::PathTraced`].

use super::{transition, Engine, EngineState, Progress};
use crate::checkpoint::{Checkpoint, Mark, Trace};
use crate::errors::{VisualizerError, VisualizerResult};
use crate::grid::{CellKind, Coord, Grid};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathAlgorithm {
    Bfs,
    Dijkstra,
    AStar,
    Dfs,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 4] = [
        PathAlgorithm::Bfs,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::AStar,
        PathAlgorithm::Dfs,
    ];

    /// Whether the algorithm guarantees a minimum-cost path
    pub fn is_optimal(self) -> bool {
        matches!(self, PathAlgorithm::Dijkstra | PathAlgorithm::AStar)
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::AStar => "astar",
            PathAlgorithm::Dfs => "dfs",
        })
    }
}

impl FromStr for PathAlgorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(PathAlgorithm::Bfs),
            "dijkstra" => Ok(PathAlgorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(PathAlgorithm::AStar),
            "dfs" => Ok(PathAlgorithm::Dfs),
            other => Err(VisualizerError::invalid_input(
                "pathfinding",
                format!("unknown algorithm '{}'", other),
            )),
        }
    }
}

/// How a finished search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// `path` runs from start to end inclusive; `cost` is the sum of entry costs after the start
    PathFound { path: Vec<Coord>, cost: u32 },
    Unreachable,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            SearchOutcome::PathFound { path, .. } => Some(path),
            SearchOutcome::Unreachable => None,
        }
    }

    /// Number of moves along the path
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    pub fn cost(&self) -> Option<u32> {
        match self {
            SearchOutcome::PathFound { cost, .. } => Some(*cost),
            SearchOutcome::Unreachable => None,
        }
    }
}

#[derive(Debug)]
enum Frontier {
    Queue(VecDeque<Coord>),
    Heap(BinaryHeap<Reverse<(u32, usize, usize)>>),
    Open(Vec<Coord>),
    Stack(Vec<Coord>),
}

impl Frontier {
    fn new(algorithm: PathAlgorithm) -> Self {
        match algorithm {
            PathAlgorithm::Bfs => Frontier::Queue(VecDeque::new()),
            PathAlgorithm::Dijkstra => Frontier::Heap(BinaryHeap::new()),
            PathAlgorithm::AStar => Frontier::Open(Vec::new()),
            PathAlgorithm::Dfs => Frontier::Stack(Vec::new()),
        }
    }
}

#[derive(Debug)]
enum Phase {
    Reset,
    Search,
    /// `remaining` cells of `path` still to mark, counting back from the end
    Trace { path: Vec<Coord>, remaining: usize },
    Done,
}

/// Stepwise pathfinder over a borrowed grid
pub struct Pathfinder<'a> {
    grid: &'a mut Grid,
    algorithm: PathAlgorithm,
    start: Coord,
    end: Coord,
    frontier: Frontier,
    phase: Phase,
    state: EngineState,
    expanded: usize,
    outcome: Option<SearchOutcome>,
}

impl<'a> Pathfinder<'a> {
    /// Validate the endpoints and prepare a search.
    ///
    /// Fails with [`VisualizerError::OutOfGrid`], [`VisualizerError::BlockedEndpoint`]
    /// or [`VisualizerError::SameEndpoints`].
    pub fn new(
        grid: &'a mut Grid,
        algorithm: PathAlgorithm,
        start: Coord,
        end: Coord,
    ) -> VisualizerResult<Self> {
        grid.check_bounds(start)?;
        grid.check_bounds(end)?;
        for at in [start, end] {
            if grid.kind(at) == CellKind::Wall {
                return Err(VisualizerError::BlockedEndpoint { coord: at });
            }
        }
        if start == end {
            return Err(VisualizerError::SameEndpoints { coord: start });
        }

        Ok(Pathfinder {
            grid,
            algorithm,
            start,
            end,
            frontier: Frontier::new(algorithm),
            phase: Phase::Reset,
            state: EngineState::Idle,
            expanded: 0,
            outcome: None,
        })
    }

    pub fn algorithm(&self) -> PathAlgorithm {
        self.algorithm
    }

    /// Result once the engine has completed
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Number of cells expanded so far
    pub fn visited(&self) -> usize {
        self.expanded
    }

    fn reset(&mut self, trace: &mut Trace) {
        self.grid.reset_search();
        let mut walls = Vec::new();
        let mut weights = Vec::new();
        for cell in self.grid.cells() {
            match cell.kind {
                CellKind::Wall => walls.push(cell.coord()),
                CellKind::Weight => weights.push(cell.coord()),
                CellKind::Floor => {}
            }
        }
        trace.checkpoint(Checkpoint::GridReset {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            walls,
            weights,
        });

        self.grid.cell_mut(self.start).distance = Some(0);
        let start = self.start;
        match &mut self.frontier {
            Frontier::Queue(q) => q.push_back(start),
            Frontier::Heap(h) => h.push(Reverse((0, start.row, start.col))),
            Frontier::Open(open) => open.push(start),
            Frontier::Stack(s) => s.push(start),
        }
        trace.explain(format!(
            "Running {} from {} to {}.",
            self.algorithm, self.start, self.end
        ));
    }

    /// Pick the next cell to expand, skipping stale or already visited entries
    fn next_cell(&mut self) -> Option<Coord> {
        let end = self.end;
        let grid = &*self.grid;
        match &mut self.frontier {
            Frontier::Queue(q) => q.pop_front(),
            Frontier::Heap(h) => loop {
                let Reverse((dist, row, col)) = h.pop()?;
                let cell = grid.cell(Coord::new(row, col));
                if !cell.visited && cell.distance == Some(dist) {
                    return Some(Coord::new(row, col));
                }
            },
            Frontier::Open(open) => {
                let score = |at: Coord| {
                    let g = grid.cell(at).distance.unwrap_or(u32::MAX);
                    let h = at.manhattan(end);
                    (g.saturating_add(h), h)
                };
                let mut best = 0;
                for i in 1..open.len() {
                    if score(open[i]) < score(open[best]) {
                        best = i;
                    }
                }
                if open.is_empty() {
                    None
                } else {
                    Some(open.remove(best))
                }
            }
            Frontier::Stack(s) => loop {
                let at = s.pop()?;
                if !grid.cell(at).visited {
                    return Some(at);
                }
            },
        }
    }

    /// Relax `to` through `from`; returns true if `to` improved
    fn relax(&mut self, from: Coord, to: Coord, cost: u32) -> bool {
        let alt = self.grid.cell(from).distance.unwrap_or(0).saturating_add(cost);
        let cell = self.grid.cell_mut(to);
        if cell.distance.map_or(true, |d| alt < d) {
            cell.distance = Some(alt);
            cell.predecessor = Some(from);
            true
        } else {
            false
        }
    }

    fn expand(&mut self, at: Coord, trace: &mut Trace) {
        self.grid.cell_mut(at).visited = true;
        self.expanded += 1;
        trace.checkpoint(Checkpoint::CellMarked {
            at,
            mark: Mark::Visited,
        });

        let neighbours = self.grid.neighbours(at);
        match self.algorithm {
            PathAlgorithm::Bfs => {
                for nb in neighbours {
                    if self.relax(at, nb, 1) {
                        if let Frontier::Queue(q) = &mut self.frontier {
                            q.push_back(nb);
                        }
                        mark_frontier(trace, nb);
                    }
                }
            }
            PathAlgorithm::Dijkstra => {
                for nb in neighbours {
                    if self.grid.cell(nb).visited {
                        continue;
                    }
                    let cost = entry_cost(self.grid, nb);
                    if self.relax(at, nb, cost) {
                        let dist = self.grid.cell(nb).distance.unwrap_or(0);
                        if let Frontier::Heap(h) = &mut self.frontier {
                            h.push(Reverse((dist, nb.row, nb.col)));
                        }
                        mark_frontier(trace, nb);
                    }
                }
            }
            PathAlgorithm::AStar => {
                for nb in neighbours {
                    if self.grid.cell(nb).visited {
                        continue;
                    }
                    let cost = entry_cost(self.grid, nb);
                    if self.relax(at, nb, cost) {
                        if let Frontier::Open(open) = &mut self.frontier {
                            if !open.contains(&nb) {
                                open.push(nb);
                            }
                        }
                        mark_frontier(trace, nb);
                    }
                }
            }
            PathAlgorithm::Dfs => {
                // popped in reverse: right, up, left, down
                for dir in [(1, 0), (0, -1), (-1, 0), (0, 1)] {
                    let Some(nb) = at.offset(dir.0, dir.1) else {
                        continue;
                    };
                    if !neighbours.contains(&nb) || self.grid.cell(nb).visited {
                        continue;
                    }
                    let alt = self
                        .grid
                        .cell(at)
                        .distance
                        .unwrap_or(0)
                        .saturating_add(entry_cost(self.grid, nb));
                    let cell = self.grid.cell_mut(nb);
                    cell.predecessor = Some(at);
                    cell.distance = Some(alt);
                    if let Frontier::Stack(s) = &mut self.frontier {
                        s.push(nb);
                    }
                    mark_frontier(trace, nb);
                }
            }
        }
    }

    /// Walk predecessors back from the end; start first
    fn reconstruct(&self) -> Vec<Coord> {
        let mut path = vec![self.end];
        let mut cursor = self.end;
        while cursor != self.start {
            match self.grid.cell(cursor).predecessor {
                Some(prev) if path.len() <= self.grid.rows() * self.grid.cols() => {
                    path.push(prev);
                    cursor = prev;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }

    fn search_step(&mut self, trace: &mut Trace) -> Phase {
        let Some(at) = self.next_cell() else {
            transition(self.name(), &mut self.state, EngineState::Exhausted);
            trace.explain(format!(
                "The frontier is empty; {} cannot be reached from {}.",
                self.end, self.start
            ));
            self.outcome = Some(SearchOutcome::Unreachable);
            return Phase::Done;
        };

        if at == self.end {
            transition(self.name(), &mut self.state, EngineState::PathFound);
            let path = self.reconstruct();
            trace.explain(format!(
                "Reached {} after expanding {} cells; tracing the path back.",
                self.end, self.expanded
            ));
            let remaining = path.len();
            return Phase::Trace { path, remaining };
        }

        self.expand(at, trace);
        Phase::Search
    }
}

fn entry_cost(grid: &Grid, at: Coord) -> u32 {
    grid.kind(at).entry_cost().unwrap_or(u32::MAX)
}

fn mark_frontier(trace: &mut Trace, at: Coord) {
    trace.checkpoint(Checkpoint::CellMarked {
        at,
        mark: Mark::Frontier,
    });
}

impl Engine for Pathfinder<'_> {
    fn name(&self) -> &'static str {
        match self.algorithm {
            PathAlgorithm::Bfs => "breadth-first search",
            PathAlgorithm::Dijkstra => "Dijkstra",
            PathAlgorithm::AStar => "A*",
            PathAlgorithm::Dfs => "depth-first search",
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        let phase = std::mem::replace(&mut self.phase, Phase::Done);
        self.phase = match phase {
            Phase::Reset => {
                transition(self.name(), &mut self.state, EngineState::Resetting);
                self.reset(trace);
                transition(self.name(), &mut self.state, EngineState::Running);
                Phase::Search
            }
            Phase::Search => self.search_step(trace),
            Phase::Trace { path, remaining } if remaining > 0 => {
                let at = path[remaining - 1];
                trace.checkpoint(Checkpoint::CellMarked {
                    at,
                    mark: Mark::Path,
                });
                Phase::Trace {
                    path,
                    remaining: remaining - 1,
                }
            }
            Phase::Trace { path, .. } => {
                let cost = path
                    .iter()
                    .skip(1)
                    .map(|&at| entry_cost(self.grid, at))
                    .sum();
                trace.explain(format!(
                    "Path of {} steps with cost {}.",
                    path.len().saturating_sub(1),
                    cost
                ));
                trace.checkpoint(Checkpoint::PathTraced { path: path.clone() });
                self.outcome = Some(SearchOutcome::PathFound { path, cost });
                Phase::Done
            }
            Phase::Done => Phase::Done,
        };

        if matches!(self.phase, Phase::Done) {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(grid: &mut Grid, algorithm: PathAlgorithm, start: Coord, end: Coord) -> (SearchOutcome, Trace) {
        let mut finder = Pathfinder::new(grid, algorithm, start, end).unwrap();
        let trace = finder.run_to_end();
        assert_eq!(finder.state(), EngineState::Idle);
        (finder.outcome().cloned().unwrap(), trace)
    }

    #[test]
    fn test_open_grid_all_agree_on_length() {
        for algorithm in [PathAlgorithm::Bfs, PathAlgorithm::Dijkstra, PathAlgorithm::AStar] {
            let mut grid = Grid::new(5, 5);
            let (outcome, _) = run(&mut grid, algorithm, Coord::new(0, 0), Coord::new(4, 4));
            assert_eq!(outcome.steps(), Some(8), "{}", algorithm);
            assert_eq!(outcome.cost(), Some(8), "{}", algorithm);
        }
    }

    #[test]
    fn test_dijkstra_avoids_weights() {
        let mut grid = Grid::from_ascii(
            "
            .w.
            ...
            ",
        )
        .unwrap();
        let (outcome, _) = run(&mut grid, PathAlgorithm::Dijkstra, Coord::new(0, 0), Coord::new(0, 2));
        assert_eq!(outcome.cost(), Some(4));
        assert_eq!(outcome.steps(), Some(4));
    }

    #[test]
    fn test_bfs_ignores_weights() {
        let mut grid = Grid::from_ascii(
            "
            .w.
            ...
            ",
        )
        .unwrap();
        let (outcome, _) = run(&mut grid, PathAlgorithm::Bfs, Coord::new(0, 0), Coord::new(0, 2));
        assert_eq!(outcome.steps(), Some(2));
        assert_eq!(outcome.cost(), Some(11));
    }

    #[test]
    fn test_unreachable_is_an_outcome() {
        let mut grid = Grid::from_ascii(
            "
            .#.
            .#.
            ",
        )
        .unwrap();
        for algorithm in PathAlgorithm::ALL {
            let mut finder =
                Pathfinder::new(&mut grid, algorithm, Coord::new(0, 0), Coord::new(1, 2)).unwrap();
            let trace = finder.run_to_end();
            assert_eq!(finder.outcome(), Some(&SearchOutcome::Unreachable));
            assert!(!trace
                .checkpoints()
                .any(|c| matches!(c, Checkpoint::PathTraced { .. })));
        }
    }

    #[test]
    fn test_endpoint_validation() {
        let mut grid = Grid::from_ascii("..#\n...").unwrap();
        let e = Pathfinder::new(&mut grid, PathAlgorithm::Bfs, Coord::new(0, 0), Coord::new(0, 2)).err();
        assert_eq!(e, Some(VisualizerError::BlockedEndpoint { coord: Coord::new(0, 2) }));

        let e = Pathfinder::new(&mut grid, PathAlgorithm::Bfs, Coord::new(1, 1), Coord::new(1, 1)).err();
        assert_eq!(e, Some(VisualizerError::SameEndpoints { coord: Coord::new(1, 1) }));

        let e = Pathfinder::new(&mut grid, PathAlgorithm::Bfs, Coord::new(0, 0), Coord::new(5, 0)).err();
        assert!(matches!(e, Some(VisualizerError::OutOfGrid { .. })));
    }

    #[test]
    fn test_path_is_marked_end_first_then_traced() {
        let mut grid = Grid::new(1, 4);
        let (outcome, trace) = run(&mut grid, PathAlgorithm::Dfs, Coord::new(0, 0), Coord::new(0, 3));
        let marks: Vec<Coord> = trace
            .checkpoints()
            .filter_map(|c| match c {
                Checkpoint::CellMarked { at, mark: Mark::Path } => Some(*at),
                _ => None,
            })
            .collect();
        let path = outcome.path().unwrap().to_vec();
        let mut reversed = path.clone();
        reversed.reverse();
        assert_eq!(marks, reversed);
        assert_eq!(
            trace.checkpoints().last(),
            Some(&Checkpoint::PathTraced { path })
        );
    }

    #[test]
    fn test_first_checkpoint_is_grid_reset() {
        let mut grid = Grid::from_ascii(".#\n..").unwrap();
        let (_, trace) = run(&mut grid, PathAlgorithm::AStar, Coord::new(0, 0), Coord::new(1, 1));
        assert_eq!(
            trace.checkpoints().next(),
            Some(&Checkpoint::GridReset {
                rows: 2,
                cols: 2,
                walls: vec![Coord::new(0, 1)],
                weights: vec![],
            })
        );
    }
}
