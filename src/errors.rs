//! Error types for algoscope
//!
//! [`VisualizerError`] covers structural misuse of the core: a bad list index,
//! a vertex that was never added, a pathfinder endpoint on a wall, and so on.
//! These are caller programming errors and are reported before an operation
//! emits its first checkpoint.
//!
//! Domain outcomes are *not* errors. An unsuccessful search, a pop from an
//! empty stack and an unreachable target are returned as ordinary values
//! (`Option`, [`SearchOutcome`](crate::engine::pathfinding::SearchOutcome)).

use crate::grid::Coord;
use thiserror::Error;

/// Result alias used throughout the crate
pub type VisualizerResult<T> = Result<T, VisualizerError>;

/// Errors raised by containers, engines and the sequencer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualizerError {
    /// List position outside the valid range for the operation
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Graph operation referencing a vertex that does not exist (or already does)
    #[error("invalid graph operation: {message}")]
    InvalidGraphOperation { message: String },

    /// Coordinate outside the grid
    #[error("cell {coord} lies outside the {rows}x{cols} grid")]
    OutOfGrid { coord: Coord, rows: usize, cols: usize },

    /// Pathfinder start or end placed on a wall
    #[error("cell {coord} is a wall and cannot be a start or end point")]
    BlockedEndpoint { coord: Coord },

    /// Pathfinder start equals end
    #[error("start and end are both {coord}")]
    SameEndpoints { coord: Coord },

    /// Primitive input rejected by an algorithm entry point
    #[error("invalid input for {algorithm}: {reason}")]
    InvalidInput {
        algorithm: &'static str,
        reason: String,
    },

    /// The sequencer delivered more checkpoints than the configured budget allows
    #[error("checkpoint budget exceeded: {delivered} delivered, budget is {budget}")]
    CheckpointBudgetExceeded { delivered: usize, budget: usize },

    /// The renderer could not complete a transition
    #[error("renderer failed: {message}")]
    Renderer { message: String },

    /// Invalid run configuration
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl VisualizerError {
    /// Shorthand for [`VisualizerError::InvalidInput`]
    pub fn invalid_input(algorithm: &'static str, reason: impl Into<String>) -> Self {
        VisualizerError::InvalidInput {
            algorithm,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`VisualizerError::InvalidGraphOperation`]
    pub fn graph(message: impl Into<String>) -> Self {
        VisualizerError::InvalidGraphOperation {
            message: message.into(),
        }
    }

    /// Whether the error is a caller mistake detected before any checkpoint was emitted
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            VisualizerError::CheckpointBudgetExceeded { .. } | VisualizerError::Renderer { .. }
        )
    }
}

impl From<std::io::Error> for VisualizerError {
    fn from(err: std::io::Error) -> Self {
        VisualizerError::Renderer {
            message: err.to_string(),
        }
    }
}
