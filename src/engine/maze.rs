//! Maze generators
//!
//! All three generators start by filling the grid with walls and then carve
//! floor cells, one [`Checkpoint::CellCarved`] at a time. Randomness comes
//! from a [`MazeRng`], so a seed fully determines the maze.
//!
//! - [`GrowingTree`]: random pick from an active list, carving two cells at a time
//! - [`RecursiveDfs`]: depth-first carving with an explicit frame stack
//! - [`Sidewinder`]: row-by-row runs that each open one passage upwards
//!
//! Growing tree and sidewinder work on the odd-coordinate lattice and keep the
//! outer border solid. Recursive DFS carves single cells and only enters a wall
//! that touches exactly one floor cell orthogonally, which keeps the floor a tree.

use super::constants::{MAZE_STRIDE, MIN_MAZE_SIDE};
use super::rng::MazeRng;
use super::{transition, Engine, EngineState, Progress};
use crate::checkpoint::{Checkpoint, Trace};
use crate::errors::{VisualizerError, VisualizerResult};
use crate::grid::{CellKind, Coord, Grid};
use std::fmt;
use std::str::FromStr;

/// Cell every generator starts carving from
pub const MAZE_START: Coord = Coord::new(1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MazeAlgorithm {
    GrowingTree,
    RecursiveDfs,
    Sidewinder,
}

impl MazeAlgorithm {
    pub const ALL: [MazeAlgorithm; 3] = [
        MazeAlgorithm::GrowingTree,
        MazeAlgorithm::RecursiveDfs,
        MazeAlgorithm::Sidewinder,
    ];

    /// Build the matching generator over `grid`
    pub fn generator<'a>(
        self,
        grid: &'a mut Grid,
        rng: MazeRng,
    ) -> VisualizerResult<Box<dyn Engine + 'a>> {
        Ok(match self {
            MazeAlgorithm::GrowingTree => Box::new(GrowingTree::new(grid, rng)?),
            MazeAlgorithm::RecursiveDfs => Box::new(RecursiveDfs::new(grid, rng)?),
            MazeAlgorithm::Sidewinder => Box::new(Sidewinder::new(grid, rng)?),
        })
    }
}

impl fmt::Display for MazeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MazeAlgorithm::GrowingTree => "growing-tree",
            MazeAlgorithm::RecursiveDfs => "dfs",
            MazeAlgorithm::Sidewinder => "sidewinder",
        })
    }
}

impl FromStr for MazeAlgorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "growing-tree" | "growing_tree" | "tree" => Ok(MazeAlgorithm::GrowingTree),
            "dfs" | "recursive-dfs" | "recursive_dfs" => Ok(MazeAlgorithm::RecursiveDfs),
            "sidewinder" => Ok(MazeAlgorithm::Sidewinder),
            other => Err(VisualizerError::invalid_input(
                "maze",
                format!("unknown generator '{}'", other),
            )),
        }
    }
}

fn check_size(grid: &Grid, algorithm: &'static str) -> VisualizerResult<()> {
    if grid.rows() < MIN_MAZE_SIDE || grid.cols() < MIN_MAZE_SIDE {
        return Err(VisualizerError::invalid_input(
            algorithm,
            format!(
                "grid is {}x{}, mazes need at least {}x{}",
                grid.rows(),
                grid.cols(),
                MIN_MAZE_SIDE,
                MIN_MAZE_SIDE
            ),
        ));
    }
    Ok(())
}

/// Turn the whole grid into walls and announce it
fn fill_walls(grid: &mut Grid, trace: &mut Trace) {
    grid.fill(CellKind::Wall);
    grid.reset_search();
    trace.checkpoint(Checkpoint::GridFilled {
        rows: grid.rows(),
        cols: grid.cols(),
    });
}

/// Carve `at` if it is still a wall
fn carve(grid: &mut Grid, at: Coord, trace: &mut Trace) {
    if grid.kind(at) == CellKind::Wall {
        grid.set_kind(at, CellKind::Floor);
        trace.checkpoint(Checkpoint::CellCarved { at });
    }
}

/// Whether `at` is strictly inside the outer border
fn is_interior(grid: &Grid, at: Coord) -> bool {
    at.row > 0 && at.col > 0 && at.row + 1 < grid.rows() && at.col + 1 < grid.cols()
}

fn finish(name: &'static str, state: &mut EngineState) -> Progress {
    transition(name, state, EngineState::Exhausted);
    transition(name, state, EngineState::Idle);
    Progress::Complete
}

pub struct GrowingTree<'a> {
    grid: &'a mut Grid,
    rng: MazeRng,
    active: Vec<Coord>,
    started: bool,
    state: EngineState,
}

impl<'a> GrowingTree<'a> {
    pub fn new(grid: &'a mut Grid, rng: MazeRng) -> VisualizerResult<Self> {
        check_size(grid, "growing tree")?;
        Ok(GrowingTree {
            grid,
            rng,
            active: Vec::new(),
            started: false,
            state: EngineState::Idle,
        })
    }
}

impl Engine for GrowingTree<'_> {
    fn name(&self) -> &'static str {
        "growing tree"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if !self.started {
            self.started = true;
            transition(self.name(), &mut self.state, EngineState::Resetting);
            fill_walls(self.grid, trace);
            trace.explain(format!(
                "Growing a tree from {}: pick a random active cell and carve towards an unvisited neighbour.",
                MAZE_START
            ));
            self.active.push(MAZE_START);
            transition(self.name(), &mut self.state, EngineState::Running);
            return Progress::Pending;
        }

        if self.active.is_empty() {
            return finish(self.name(), &mut self.state);
        }

        let index = self.rng.index(self.active.len());
        let cell = self.active[index];
        carve(self.grid, cell, trace);

        let mut dirs = [
            (0, MAZE_STRIDE),
            (MAZE_STRIDE, 0),
            (-MAZE_STRIDE, 0),
            (0, -MAZE_STRIDE),
        ];
        self.rng.shuffle(&mut dirs);

        let grid = &*self.grid;
        let target = dirs.iter().find_map(|&(dr, dc)| {
            let next = cell.offset(dr, dc)?;
            let open = is_interior(grid, next) && grid.kind(next) == CellKind::Wall;
            open.then(|| (next, cell.offset(dr / 2, dc / 2)))
        });

        match target {
            Some((next, Some(between))) => {
                carve(self.grid, between, trace);
                carve(self.grid, next, trace);
                self.active.push(next);
            }
            _ => {
                self.active.remove(index);
            }
        }
        Progress::Pending
    }
}

struct Frame {
    neighbours: Vec<Coord>,
    next: usize,
}

pub struct RecursiveDfs<'a> {
    grid: &'a mut Grid,
    rng: MazeRng,
    frames: Vec<Frame>,
    started: bool,
    state: EngineState,
}

impl<'a> RecursiveDfs<'a> {
    pub fn new(grid: &'a mut Grid, rng: MazeRng) -> VisualizerResult<Self> {
        check_size(grid, "recursive DFS")?;
        Ok(RecursiveDfs {
            grid,
            rng,
            frames: Vec::new(),
            started: false,
            state: EngineState::Idle,
        })
    }

    /// Interior wall cells orthogonally adjacent to `at`, shuffled
    fn shuffled_neighbours(&mut self, at: Coord) -> Vec<Coord> {
        let grid = &*self.grid;
        let mut nbs: Vec<Coord> = [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(|(dr, dc)| at.offset(dr, dc))
            .filter(|&c| is_interior(grid, c) && grid.kind(c) == CellKind::Wall)
            .collect();
        self.rng.shuffle(&mut nbs);
        nbs
    }

    fn floor_count(&self, at: Coord, offsets: &[(isize, isize)]) -> usize {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| at.offset(dr, dc))
            .filter(|&c| self.grid.contains(c) && self.grid.kind(c) == CellKind::Floor)
            .count()
    }

    /// A wall can be carved when it would attach to exactly one corridor and
    /// has at most two floor cells among its eight neighbours
    fn carvable(&self, at: Coord) -> bool {
        const ORTHOGONAL: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

        if self.grid.kind(at) != CellKind::Wall {
            return false;
        }
        let orthogonal = self.floor_count(at, &ORTHOGONAL);
        orthogonal == 1 && orthogonal + self.floor_count(at, &DIAGONAL) <= 2
    }

    fn enter(&mut self, at: Coord, trace: &mut Trace) {
        carve(self.grid, at, trace);
        let neighbours = self.shuffled_neighbours(at);
        self.frames.push(Frame {
            neighbours,
            next: 0,
        });
    }
}

impl Engine for RecursiveDfs<'_> {
    fn name(&self) -> &'static str {
        "recursive DFS"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if !self.started {
            self.started = true;
            transition(self.name(), &mut self.state, EngineState::Resetting);
            fill_walls(self.grid, trace);
            trace.explain(format!(
                "Carving depth-first from {}, entering a wall only if it borders a single corridor.",
                MAZE_START
            ));
            transition(self.name(), &mut self.state, EngineState::Running);
            self.enter(MAZE_START, trace);
            return Progress::Pending;
        }

        let Some(frame) = self.frames.last_mut() else {
            return finish(self.name(), &mut self.state);
        };

        match frame.neighbours.get(frame.next).copied() {
            Some(candidate) => {
                frame.next += 1;
                if self.carvable(candidate) {
                    self.enter(candidate, trace);
                }
            }
            None => {
                self.frames.pop();
            }
        }
        Progress::Pending
    }
}

pub struct Sidewinder<'a> {
    grid: &'a mut Grid,
    rng: MazeRng,
    /// Current lattice cell; `None` before the first step and after the last
    cursor: Option<Coord>,
    run_start: usize,
    started: bool,
    state: EngineState,
}

impl<'a> Sidewinder<'a> {
    pub fn new(grid: &'a mut Grid, rng: MazeRng) -> VisualizerResult<Self> {
        check_size(grid, "sidewinder")?;
        Ok(Sidewinder {
            grid,
            rng,
            cursor: None,
            run_start: 1,
            started: false,
            state: EngineState::Idle,
        })
    }

    /// Next lattice cell in row-major order
    fn advance(&self, at: Coord) -> Option<Coord> {
        let stride = MAZE_STRIDE as usize;
        if at.col + stride < self.grid.cols() - 1 {
            return Some(Coord::new(at.row, at.col + stride));
        }
        if at.row + stride < self.grid.rows() - 1 {
            return Some(Coord::new(at.row + stride, 1));
        }
        None
    }
}

impl Engine for Sidewinder<'_> {
    fn name(&self) -> &'static str {
        "sidewinder"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        if !self.started {
            self.started = true;
            transition(self.name(), &mut self.state, EngineState::Resetting);
            fill_walls(self.grid, trace);
            trace.explain(
                "Sidewinder: the first row is one corridor, later rows close each run with a passage up.",
            );
            self.cursor = Some(MAZE_START);
            transition(self.name(), &mut self.state, EngineState::Running);
            return Progress::Pending;
        }

        let Some(at) = self.cursor else {
            return finish(self.name(), &mut self.state);
        };
        let stride = MAZE_STRIDE as usize;
        if at.col == 1 {
            self.run_start = 1;
        }

        carve(self.grid, at, trace);
        let is_last = at.col + stride >= self.grid.cols() - 1;

        if at.row > 1 && (is_last || self.rng.coin()) {
            let run_len = (at.col - self.run_start) / stride + 1;
            let col = self.run_start + stride * self.rng.index(run_len);
            trace.explain(format!(
                "Closing the run in row {} with a passage up from column {}.",
                at.row, col
            ));
            carve(self.grid, Coord::new(at.row - 1, col), trace);
            self.run_start = at.col + stride;
        } else if !is_last {
            carve(self.grid, Coord::new(at.row, at.col + 1), trace);
        }

        self.cursor = self.advance(at);
        Progress::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(algorithm: MazeAlgorithm, rows: usize, cols: usize, seed: u64) -> (Grid, Trace) {
        let mut grid = Grid::new(rows, cols);
        let trace = {
            let mut engine = algorithm.generator(&mut grid, MazeRng::new(seed)).unwrap();
            let trace = engine.run_to_end();
            assert_eq!(engine.state(), EngineState::Idle);
            trace
        };
        (grid, trace)
    }

    #[test]
    fn test_first_checkpoint_fills_grid() {
        for algorithm in MazeAlgorithm::ALL {
            let (_, trace) = generate(algorithm, 7, 9, 1);
            assert_eq!(
                trace.checkpoints().next(),
                Some(&Checkpoint::GridFilled { rows: 7, cols: 9 })
            );
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        for algorithm in MazeAlgorithm::ALL {
            let (a, ta) = generate(algorithm, 11, 15, 99);
            let (b, tb) = generate(algorithm, 11, 15, 99);
            assert_eq!(a, b);
            assert_eq!(
                ta.checkpoints().collect::<Vec<_>>(),
                tb.checkpoints().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_lattice_generators_keep_border() {
        for algorithm in [MazeAlgorithm::GrowingTree, MazeAlgorithm::Sidewinder] {
            let (grid, _) = generate(algorithm, 8, 10, 5);
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let at = Coord::new(row, col);
                    if !is_interior(&grid, at) {
                        assert_eq!(grid.kind(at), CellKind::Wall, "{} at {}", algorithm, at);
                    }
                }
            }
        }
    }

    #[test]
    fn test_too_small_grid_rejected() {
        let mut grid = Grid::new(2, 10);
        assert!(MazeAlgorithm::Sidewinder
            .generator(&mut grid, MazeRng::new(0))
            .is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("dfs".parse::<MazeAlgorithm>().unwrap(), MazeAlgorithm::RecursiveDfs);
        assert!("prim".parse::<MazeAlgorithm>().is_err());
    }
}
