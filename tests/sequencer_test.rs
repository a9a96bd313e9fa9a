// Integration tests for checkpoint delivery

use algoscope::checkpoint::{Checkpoint, Event};
use algoscope::config::RunConfig;
use algoscope::containers::{LinkedList, ListKind};
use algoscope::demo::{self, Scenario};
use algoscope::engine::maze::MazeAlgorithm;
use algoscope::engine::pathfinding::{PathAlgorithm, Pathfinder};
use algoscope::engine::{Engine, EngineState};
use algoscope::errors::{VisualizerError, VisualizerResult};
use algoscope::grid::{Coord, Grid};
use algoscope::sequencer::{CancelToken, Renderer, Sequencer, TraceRecorder};

/// Renderer that cancels the run after a fixed number of checkpoints
struct CancelAfter {
    remaining: usize,
    token: CancelToken,
    seen: Vec<Checkpoint>,
}

impl Renderer for CancelAfter {
    fn on_checkpoint(&mut self, checkpoint: Checkpoint) -> VisualizerResult<()> {
        self.seen.push(checkpoint);
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.token.cancel();
        }
        Ok(())
    }
}

/// Renderer whose transitions fail after the first one
struct Flaky {
    calls: usize,
}

impl Renderer for Flaky {
    fn on_checkpoint(&mut self, _checkpoint: Checkpoint) -> VisualizerResult<()> {
        self.calls += 1;
        if self.calls > 1 {
            return Err(VisualizerError::Renderer {
                message: "display went away".to_string(),
            });
        }
        Ok(())
    }
}

#[test]
fn test_delivery_preserves_production_order() {
    let values = [4, 8, 15, 16, 23, 42];
    let mut expected_list = LinkedList::from_values(ListKind::Doubly, &values);
    let expected: Vec<Event> = {
        let mut trace = expected_list.insert(7, 4).unwrap().run_to_end();
        std::iter::from_fn(|| trace.pop()).collect()
    };

    let recorder = TraceRecorder::new();
    let mut list = LinkedList::from_values(ListKind::Doubly, &values);
    let mut seq = Sequencer::new(recorder.clone(), recorder.clone());
    let report = seq.run(&mut list.insert(7, 4).unwrap()).unwrap();

    assert_eq!(recorder.events(), expected);
    assert_eq!(report.checkpoints, recorder.len());
    assert_eq!(report.narrations, recorder.narrations().len());
    assert_eq!(report.final_state, EngineState::Idle);
    assert!(!report.cancelled);
}

#[test]
fn test_cancel_stops_at_the_next_checkpoint_boundary() {
    let token = CancelToken::new();
    let renderer = CancelAfter {
        remaining: 5,
        token: token.clone(),
        seen: Vec::new(),
    };
    let mut seq = Sequencer::new(renderer, ()).with_cancel_token(token.clone());
    let mut grid = Grid::new(9, 9);
    let mut finder =
        Pathfinder::new(&mut grid, PathAlgorithm::Dijkstra, Coord::new(0, 0), Coord::new(8, 8)).unwrap();

    let report = seq.run(&mut finder).unwrap();
    assert!(report.cancelled);
    assert_eq!(report.checkpoints, 5);
    assert!(finder.outcome().is_none(), "cancelled search has no outcome");
    let (renderer, ()) = seq.into_parts();
    assert_eq!(renderer.seen.len(), 5);
    assert!(matches!(renderer.seen[0], Checkpoint::GridReset { .. }));
}

#[test]
fn test_cancelled_scenario_stops_the_script() {
    let token = CancelToken::new();
    let renderer = CancelAfter {
        remaining: 3,
        token: token.clone(),
        seen: Vec::new(),
    };
    let mut seq = Sequencer::new(renderer, ()).with_cancel_token(token);
    let reports = demo::play(Scenario::Stack, &RunConfig::default(), &mut seq).unwrap();
    // three pushes, the third run is the one that saw the cancel
    assert_eq!(reports.len(), 3);
    assert!(reports.last().map_or(false, |r| r.cancelled));
}

#[test]
fn test_renderer_failure_aborts_the_run() {
    let mut seq = Sequencer::new(Flaky { calls: 0 }, ());
    let mut list = LinkedList::from_values(ListKind::Singly, &[1, 2, 3, 4]);
    let err = seq.run(&mut list.insert(0, 3).unwrap()).unwrap_err();
    assert!(matches!(err, VisualizerError::Renderer { .. }));
    assert!(!err.is_structural());
    assert_eq!(seq.delivered(), 1);
}

#[test]
fn test_budget_spans_runs() {
    let recorder = TraceRecorder::new();
    let mut seq = Sequencer::new(recorder.clone(), ()).with_budget(Some(40));
    let err = demo::play(
        Scenario::Maze(MazeAlgorithm::GrowingTree),
        &RunConfig::default(),
        &mut seq,
    )
    .unwrap_err();
    assert_eq!(
        err,
        VisualizerError::CheckpointBudgetExceeded {
            delivered: 40,
            budget: 40
        }
    );
    assert_eq!(recorder.len(), 40);
}

#[test]
fn test_every_scenario_plays_headless() {
    let config = RunConfig::builder().grid(11, 15).build().unwrap();
    let scenarios = [
        Scenario::List(ListKind::Singly),
        Scenario::List(ListKind::Doubly),
        Scenario::Stack,
        Scenario::Hash,
        Scenario::Graph,
        Scenario::Sieve(50),
        Scenario::Factor(84),
        Scenario::Gcd(1071, 462),
        Scenario::Maze(MazeAlgorithm::Sidewinder),
        Scenario::Path {
            algorithm: PathAlgorithm::AStar,
            maze: None,
        },
        Scenario::Path {
            algorithm: PathAlgorithm::Bfs,
            maze: Some(MazeAlgorithm::RecursiveDfs),
        },
    ];
    for scenario in scenarios {
        let recorder = TraceRecorder::new();
        let mut seq = Sequencer::new(recorder.clone(), recorder.clone());
        let reports = demo::play(scenario, &config, &mut seq).unwrap();
        assert!(!reports.is_empty(), "{}", scenario);
        assert!(!recorder.is_empty(), "{} delivered nothing", scenario);
        assert_eq!(
            reports.iter().map(|r| r.checkpoints).sum::<usize>(),
            recorder.len(),
            "{}",
            scenario
        );
    }
}
