// Integration tests: randomized invariants checked with proptest

use algoscope::checkpoint::Checkpoint;
use algoscope::containers::{LinkedList, ListKind, Stack};
use algoscope::engine::math::{Gcd, PrimeFactors};
use algoscope::engine::pathfinding::{PathAlgorithm, Pathfinder};
use algoscope::engine::Engine;
use algoscope::grid::{CellKind, Coord, Grid};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum ListOp {
    Insert(i64, usize),
    Remove(usize),
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        (-50i64..50, 0usize..16).prop_map(|(d, p)| ListOp::Insert(d, p)),
        (0usize..16).prop_map(ListOp::Remove),
    ]
}

fn list_kind() -> impl Strategy<Value = ListKind> {
    prop_oneof![Just(ListKind::Singly), Just(ListKind::Doubly)]
}

fn naive_gcd(a: u64, b: u64) -> u64 {
    (1..=a.max(b))
        .rev()
        .find(|d| a % d == 0 && b % d == 0)
        .unwrap_or(0)
}

fn bfs_hops(grid: &Grid, start: Coord, end: Coord) -> Option<usize> {
    let mut dist = vec![None; grid.rows() * grid.cols()];
    dist[start.row * grid.cols() + start.col] = Some(0usize);
    let mut queue = VecDeque::from([start]);
    while let Some(at) = queue.pop_front() {
        let d = dist[at.row * grid.cols() + at.col]?;
        if at == end {
            return Some(d);
        }
        for nb in grid.neighbours(at) {
            let i = nb.row * grid.cols() + nb.col;
            if dist[i].is_none() {
                dist[i] = Some(d + 1);
                queue.push_back(nb);
            }
        }
    }
    None
}

proptest! {
    #[test]
    fn prop_list_matches_vec_model(
        kind in list_kind(),
        ops in prop::collection::vec(list_op(), 0..40),
    ) {
        let mut list = LinkedList::new(kind);
        let mut model: Vec<i64> = Vec::new();
        for op in ops {
            match op {
                ListOp::Insert(data, pos) => {
                    let pos = pos.min(model.len());
                    list.insert(data, pos).unwrap().run_to_end();
                    model.insert(pos, data);
                }
                ListOp::Remove(pos) => {
                    if model.is_empty() {
                        prop_assert!(list.remove(pos).is_err());
                        continue;
                    }
                    let pos = pos % model.len();
                    let mut remove = list.remove(pos).unwrap();
                    remove.run_to_end();
                    prop_assert_eq!(remove.removed(), Some(model.remove(pos)));
                }
            }
            prop_assert_eq!(list.values(), model.clone());
            prop_assert_eq!(list.len(), model.len());
            prop_assert!(list.check_links().is_ok(), "{:?}", list.check_links());
            if kind == ListKind::Doubly {
                let mut backward = model.clone();
                backward.reverse();
                prop_assert_eq!(list.values_backward(), Some(backward));
            }
        }
    }

    #[test]
    fn prop_doubly_insert_walks_at_most_half(len in 2usize..24, seed in any::<usize>()) {
        let pos = 1 + seed % (len - 1);
        let values: Vec<i64> = (0..len as i64).collect();
        let mut list = LinkedList::from_values(ListKind::Doubly, &values);
        let trace = list.insert(-1, pos).unwrap().run_to_end();
        let visits = trace
            .checkpoints()
            .filter(|c| matches!(c, Checkpoint::NodeVisited { .. }))
            .count();
        prop_assert_eq!(visits, pos.min(len - pos));
        prop_assert!(visits <= len / 2);
    }

    #[test]
    fn prop_stack_is_lifo(values in prop::collection::vec(any::<i64>(), 0..20)) {
        let mut stack = Stack::new();
        for &v in &values {
            stack.push(v).run_to_end();
        }
        for &expected in values.iter().rev() {
            let mut peek = stack.peek();
            peek.run_to_end();
            prop_assert_eq!(peek.top(), Some(expected));

            let mut pop = stack.pop();
            pop.run_to_end();
            prop_assert_eq!(pop.popped(), Some(expected));
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn prop_factors_multiply_back(n in 2u64..5000) {
        let mut factors = PrimeFactors::new(n).unwrap();
        factors.run_to_end();
        prop_assert_eq!(factors.factors().iter().product::<u64>(), n);
        prop_assert!(factors.factors().windows(2).all(|w| w[0] <= w[1]));
        for &p in factors.factors() {
            prop_assert!((2..p).all(|d| p % d != 0), "{} is not prime", p);
        }
        let mut leaves = factors.tree().leaves();
        leaves.sort_unstable();
        prop_assert_eq!(leaves, factors.factors().to_vec());
    }

    #[test]
    fn prop_gcd_matches_naive(n in 0u64..400, m in 1u64..400) {
        let mut gcd = Gcd::new(n, m).unwrap();
        gcd.run_to_end();
        prop_assert_eq!(gcd.result(), Some(naive_gcd(n, m)));
    }

    #[test]
    fn prop_optimal_searches_find_shortest_paths(
        walls in prop::collection::vec(any::<bool>(), 8 * 10),
    ) {
        let layout: String = walls
            .chunks(10)
            .map(|row| {
                row.iter()
                    .map(|&w| if w { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        let mut template = Grid::from_ascii(&layout).unwrap();
        let start = Coord::new(0, 0);
        let end = Coord::new(7, 9);
        template.set_kind(start, CellKind::Floor);
        template.set_kind(end, CellKind::Floor);
        let expected = bfs_hops(&template, start, end);

        for algorithm in [PathAlgorithm::Bfs, PathAlgorithm::Dijkstra, PathAlgorithm::AStar] {
            let mut grid = template.clone();
            let mut finder = Pathfinder::new(&mut grid, algorithm, start, end).unwrap();
            finder.run_to_end();
            let steps = finder.outcome().and_then(|o| o.steps());
            prop_assert_eq!(steps, expected, "{}", algorithm);
        }

        // DFS reaches the goal exactly when a path exists
        let mut grid = template.clone();
        let mut finder = Pathfinder::new(&mut grid, PathAlgorithm::Dfs, start, end).unwrap();
        finder.run_to_end();
        prop_assert_eq!(finder.outcome().and_then(|o| o.steps()).is_some(), expected.is_some());
    }
}
