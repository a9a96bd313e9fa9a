//! Scripted scenarios played by the binary
//!
//! Each scenario builds its container or grid, then hands a fixed sequence of
//! operations to the [`Sequencer`]. The scripts are deliberately chosen to hit
//! every branch an algorithm has: head, middle and tail list edits, hash
//! collisions, an unsuccessful search, an empty-stack pop.

use crate::config::RunConfig;
use crate::containers::{Graph, GraphKind, HashTable, LinkedList, ListKind, Position, Stack, TraversalOrder, VertexId};
use crate::engine::math::{Gcd, PrimeFactors, Sieve};
use crate::engine::maze::{MazeAlgorithm, MAZE_START};
use crate::engine::pathfinding::{PathAlgorithm, Pathfinder};
use crate::engine::rng::MazeRng;
use crate::engine::Engine;
use crate::errors::{VisualizerError, VisualizerResult};
use crate::grid::{CellKind, Coord, Grid};
use crate::sequencer::{Narrator, Renderer, RunReport, Sequencer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    List(ListKind),
    Stack,
    Hash,
    Graph,
    Sieve(u64),
    Factor(u64),
    Gcd(u64, u64),
    Maze(MazeAlgorithm),
    Path {
        algorithm: PathAlgorithm,
        maze: Option<MazeAlgorithm>,
    },
}

pub const USAGE: &str = "\
scenarios:
  list | dlist | stack | hash | graph
  sieve N | factor N | gcd N M
  maze <growing-tree|dfs|sidewinder>
  path <bfs|dijkstra|astar|dfs> [growing-tree|dfs|sidewinder]";

impl Scenario {
    /// Parse positional arguments (`["gcd", "48", "18"]`)
    pub fn parse(args: &[&str]) -> VisualizerResult<Self> {
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (*name, rest),
            None => return Err(VisualizerError::invalid_input("scenario", "no scenario given")),
        };

        let scenario = match (name, rest) {
            ("list", []) => Scenario::List(ListKind::Singly),
            ("dlist", []) => Scenario::List(ListKind::Doubly),
            ("stack", []) => Scenario::Stack,
            ("hash", []) => Scenario::Hash,
            ("graph", []) => Scenario::Graph,
            ("sieve", [n]) => Scenario::Sieve(parse_number("sieve", n)?),
            ("factor", [n]) => Scenario::Factor(parse_number("factor", n)?),
            ("gcd", [n, m]) => Scenario::Gcd(parse_number("gcd", n)?, parse_number("gcd", m)?),
            ("maze", [alg]) => Scenario::Maze(alg.parse()?),
            ("path", [alg]) => Scenario::Path {
                algorithm: alg.parse()?,
                maze: None,
            },
            ("path", [alg, maze]) => Scenario::Path {
                algorithm: alg.parse()?,
                maze: Some(maze.parse()?),
            },
            _ => {
                return Err(VisualizerError::invalid_input(
                    "scenario",
                    format!("cannot parse '{}'", args.join(" ")),
                ))
            }
        };
        Ok(scenario)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::List(ListKind::Singly) => write!(f, "singly linked list"),
            Scenario::List(ListKind::Doubly) => write!(f, "doubly linked list"),
            Scenario::Stack => write!(f, "stack"),
            Scenario::Hash => write!(f, "hash table"),
            Scenario::Graph => write!(f, "graph traversal"),
            Scenario::Sieve(n) => write!(f, "sieve of Eratosthenes up to {}", n),
            Scenario::Factor(n) => write!(f, "prime factors of {}", n),
            Scenario::Gcd(n, m) => write!(f, "gcd({}, {})", n, m),
            Scenario::Maze(alg) => write!(f, "{} maze", alg),
            Scenario::Path {
                algorithm,
                maze: None,
            } => write!(f, "{} on an open grid", algorithm),
            Scenario::Path {
                algorithm,
                maze: Some(maze),
            } => write!(f, "{} through a {} maze", algorithm, maze),
        }
    }
}

fn parse_number(algorithm: &'static str, text: &str) -> VisualizerResult<u64> {
    text.parse()
        .map_err(|_| VisualizerError::invalid_input(algorithm, format!("'{}' is not a number", text)))
}

/// Runs engines one after another, stopping at the first cancelled run
struct Script<'s, R: Renderer, N: Narrator> {
    seq: &'s mut Sequencer<R, N>,
    reports: Vec<RunReport>,
}

impl<R: Renderer, N: Narrator> Script<'_, R, N> {
    /// Returns false once the run was cancelled
    fn play<E: Engine + ?Sized>(&mut self, engine: &mut E) -> VisualizerResult<bool> {
        let report = self.seq.run(engine)?;
        let keep_going = !report.cancelled;
        self.reports.push(report);
        Ok(keep_going)
    }
}

macro_rules! play {
    ($script:expr, $engine:expr) => {
        if !$script.play(&mut $engine)? {
            return Ok($script.reports);
        }
    };
}

/// Play `scenario` through `seq`, returning one report per engine run
pub fn play<R: Renderer, N: Narrator>(
    scenario: Scenario,
    config: &RunConfig,
    seq: &mut Sequencer<R, N>,
) -> VisualizerResult<Vec<RunReport>> {
    let mut script = Script {
        seq,
        reports: Vec::new(),
    };
    log::info!("playing scenario: {}", scenario);

    match scenario {
        Scenario::List(kind) => {
            let mut list = LinkedList::new(kind);
            for (data, pos) in [(3, 0), (7, 1), (5, 1), (9, 3), (1, 0), (4, 4), (8, 2)] {
                play!(script, list.insert(data, pos)?);
            }
            play!(script, list.search(9));
            play!(script, list.search(6));
            play!(script, list.remove(5)?);
            play!(script, list.remove(0)?);
            let last = list.len() - 1;
            play!(script, list.remove(last)?);
            play!(script, list.remove(1)?);
        }
        Scenario::Stack => {
            let mut stack = Stack::new();
            for value in [4, 8, 15] {
                play!(script, stack.push(value));
            }
            play!(script, stack.peek());
            for _ in 0..4 {
                play!(script, stack.pop());
            }
        }
        Scenario::Hash => {
            let buckets = config.bucket_count;
            let step = buckets as i64;
            let mut table = HashTable::new(buckets)?;
            // second and fourth keys share the first key's bucket
            for (key, value) in [(3, 30), (3 + step, 31), (5, 50), (3 + 2 * step, 32), (5, 55)] {
                play!(script, table.put(key, value));
            }
            play!(script, table.get(3 + step));
            play!(script, table.get(4));
        }
        Scenario::Graph => {
            let mut graph = Graph::new(GraphKind::WEIGHTED_UNDIRECTED);
            let layout = [(0, 0), (8, -4), (8, 4), (16, -4), (16, 4), (24, 0)];
            for (i, (x, y)) in layout.into_iter().enumerate() {
                play!(script, graph.add_vertex(VertexId(i as u32), Position::new(x, y))?);
            }
            for (a, b) in [(0, 1), (0, 2), (1, 2), (1, 3), (2, 4), (3, 4), (3, 5), (4, 5)] {
                play!(script, graph.add_edge(VertexId(a), VertexId(b))?);
            }
            play!(script, graph.traverse(VertexId(0), TraversalOrder::BreadthFirst)?);
            play!(script, graph.traverse(VertexId(0), TraversalOrder::DepthFirst)?);
        }
        Scenario::Sieve(n) => play!(script, Sieve::new(n)?),
        Scenario::Factor(n) => play!(script, PrimeFactors::new(n)?),
        Scenario::Gcd(n, m) => play!(script, Gcd::new(n, m)?),
        Scenario::Maze(algorithm) => {
            let mut grid = Grid::new(config.grid_rows, config.grid_cols);
            play!(script, algorithm.generator(&mut grid, MazeRng::new(config.seed))?);
        }
        Scenario::Path { algorithm, maze } => {
            let mut grid = match maze {
                Some(generator) => {
                    let mut grid = Grid::new(config.grid_rows, config.grid_cols);
                    play!(script, generator.generator(&mut grid, MazeRng::new(config.seed))?);
                    grid
                }
                None => obstacle_course(config.grid_rows, config.grid_cols),
            };
            let end = far_corner(&grid)?;
            play!(script, Pathfinder::new(&mut grid, algorithm, MAZE_START, end)?);
        }
    }

    Ok(script.reports)
}

/// Open grid with a wall that has one gap and a band of weights in front of it
pub fn obstacle_course(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new(rows, cols);
    let wall_col = cols / 2;
    for row in 0..rows.saturating_sub(3) {
        grid.set_kind(Coord::new(row, wall_col), CellKind::Wall);
    }
    let band = wall_col.saturating_sub(2);
    for row in rows / 3..rows {
        grid.set_kind(Coord::new(row, band), CellKind::Weight);
    }
    grid
}

/// Passable cell closest to the bottom-right corner
fn far_corner(grid: &Grid) -> VisualizerResult<Coord> {
    grid.passable_cells()
        .into_iter()
        .filter(|&at| at != MAZE_START)
        .max_by_key(|at| (at.row + at.col, at.row))
        .ok_or_else(|| VisualizerError::invalid_input("pathfinding", "grid has no free cell to aim for"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::TraceRecorder;

    #[test]
    fn test_parse_scenarios() {
        assert_eq!(Scenario::parse(&["gcd", "48", "18"]), Ok(Scenario::Gcd(48, 18)));
        assert_eq!(
            Scenario::parse(&["path", "astar", "sidewinder"]),
            Ok(Scenario::Path {
                algorithm: PathAlgorithm::AStar,
                maze: Some(MazeAlgorithm::Sidewinder)
            })
        );
        assert!(Scenario::parse(&["sieve", "many"]).is_err());
        assert!(Scenario::parse(&["list", "extra"]).is_err());
        assert!(Scenario::parse(&[]).is_err());
    }

    #[test]
    fn test_list_script_runs_every_operation() {
        let recorder = TraceRecorder::new();
        let mut seq = Sequencer::new(recorder.clone(), recorder.clone());
        let reports = play(
            Scenario::List(ListKind::Doubly),
            &RunConfig::default(),
            &mut seq,
        )
        .unwrap();
        assert_eq!(reports.len(), 13);
        assert!(reports.iter().all(|r| !r.cancelled));
    }

    #[test]
    fn test_obstacle_course_keeps_endpoints_open() {
        let config = RunConfig::default();
        let grid = obstacle_course(config.grid_rows, config.grid_cols);
        assert!(grid.kind(MAZE_START).is_passable());
        let end = far_corner(&grid).unwrap();
        assert_eq!(end, Coord::new(config.grid_rows - 1, config.grid_cols - 1));
    }
}
