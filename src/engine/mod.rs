//! Stepwise algorithm engines
//!
//! Every algorithm in the crate is an [`Engine`]: a synchronous state machine
//! that does one unit of work per [`Engine::step`] and queues the checkpoints
//! and narration that unit produced. Nothing here sleeps or waits; pacing is
//! the sequencer's job.
//!
//! - [`math`]: sieve of Eratosthenes, prime factorisation, Euclidean GCD
//! - [`maze`]: growing tree, recursive DFS and sidewinder generators
//! - [`pathfinding`]: BFS, Dijkstra, A* and DFS over a [`Grid`](crate::grid::Grid)
//! - [`rng`]: seeded randomness for the maze generators
//!
//! Container operations (list insert, stack pop, ...) are engines too; they
//! live next to their containers in [`crate::containers`].
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> Resetting -> Running -> PathFound -> Idle
//!                         |
//!                         +----> Exhausted -> Idle
//! ```
//!
//! Engines that have nothing to reset skip `Resetting`; engines that have no
//! notion of success skip `PathFound`. Every engine finishes in `Idle` with its
//! result available through an accessor.

pub mod constants;
pub mod math;
pub mod maze;
pub mod pathfinding;
pub mod rng;

use crate::checkpoint::Trace;
use std::fmt;

/// Where an engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Resetting,
    Running,
    PathFound,
    Exhausted,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Idle => "idle",
            EngineState::Resetting => "resetting",
            EngineState::Running => "running",
            EngineState::PathFound => "path found",
            EngineState::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Result of a single [`Engine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More steps remain
    Pending,
    /// The engine has finished; further calls to `step` are no-ops
    Complete,
}

impl Progress {
    pub fn is_complete(self) -> bool {
        matches!(self, Progress::Complete)
    }
}

/// A deterministic step machine producing checkpoints
pub trait Engine {
    /// Human-readable algorithm name
    fn name(&self) -> &'static str;

    fn state(&self) -> EngineState;

    /// Perform one unit of work, appending any produced events to `trace`.
    ///
    /// A step may append nothing. Once `Complete` is returned the engine is
    /// back in [`EngineState::Idle`] and must not emit further events.
    fn step(&mut self, trace: &mut Trace) -> Progress;

    /// Step to completion without pacing and return every event produced
    fn run_to_end(&mut self) -> Trace {
        let mut trace = Trace::new();
        while !self.step(&mut trace).is_complete() {}
        trace
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn state(&self) -> EngineState {
        (**self).state()
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        (**self).step(trace)
    }
}

/// Move `state` to `next`, logging the transition
pub(crate) fn transition(name: &'static str, state: &mut EngineState, next: EngineState) {
    if *state != next {
        log::debug!("{}: {} -> {}", name, state, next);
        *state = next;
    }
}
