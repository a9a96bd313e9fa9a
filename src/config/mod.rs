//! Run configuration
//!
//! Everything a run needs that is not part of an algorithm's input: the maze
//! seed, animation pacing, the checkpoint budget and the default sizes of the
//! hash table and grid.
//!
//! ```
//! use algoscope::config::RunConfig;
//! use std::time::Duration;
//!
//! let config = RunConfig::builder()
//!     .seed(7)
//!     .step_delay(Duration::from_millis(40))
//!     .grid(11, 21)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.grid_rows, 11);
//! ```

use crate::errors::{VisualizerError, VisualizerResult};
use std::time::Duration;

/// Smallest grid the maze generators and pathfinders accept for a demo
pub const MIN_GRID_SIDE: usize = 5;
/// Longest pause between two checkpoints
pub const MAX_STEP_DELAY: Duration = Duration::from_secs(5);

const DEFAULT_SEED: u64 = 42;
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(120);
const DEFAULT_BUCKETS: usize = 8;
const DEFAULT_GRID_ROWS: usize = 21;
const DEFAULT_GRID_COLS: usize = 41;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the maze generators
    pub seed: u64,
    /// Pause after each delivered checkpoint
    pub step_delay: Duration,
    /// Upper bound on checkpoints delivered by one sequencer
    pub checkpoint_budget: Option<usize>,
    pub bucket_count: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            seed: DEFAULT_SEED,
            step_delay: DEFAULT_STEP_DELAY,
            checkpoint_budget: None,
            bucket_count: DEFAULT_BUCKETS,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
        }
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Check the semantic constraints the type system cannot express
    pub fn validate(&self) -> VisualizerResult<()> {
        if self.grid_rows < MIN_GRID_SIDE || self.grid_cols < MIN_GRID_SIDE {
            return Err(VisualizerError::Config {
                message: format!(
                    "grid must be at least {0}x{0}, got {1}x{2}",
                    MIN_GRID_SIDE, self.grid_rows, self.grid_cols
                ),
            });
        }
        if self.bucket_count == 0 {
            return Err(VisualizerError::Config {
                message: "hash table needs at least one bucket".to_string(),
            });
        }
        if self.step_delay > MAX_STEP_DELAY {
            return Err(VisualizerError::Config {
                message: format!(
                    "step delay of {}ms exceeds the {}ms maximum",
                    self.step_delay.as_millis(),
                    MAX_STEP_DELAY.as_millis()
                ),
            });
        }
        if self.checkpoint_budget == Some(0) {
            return Err(VisualizerError::Config {
                message: "checkpoint budget must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`RunConfig`]; unset fields keep their defaults
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    seed: Option<u64>,
    step_delay: Option<Duration>,
    checkpoint_budget: Option<usize>,
    bucket_count: Option<usize>,
    grid: Option<(usize, usize)>,
}

impl RunConfigBuilder {
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = Some(delay);
        self
    }

    #[must_use]
    pub const fn checkpoint_budget(mut self, budget: usize) -> Self {
        self.checkpoint_budget = Some(budget);
        self
    }

    #[must_use]
    pub const fn bucket_count(mut self, buckets: usize) -> Self {
        self.bucket_count = Some(buckets);
        self
    }

    #[must_use]
    pub const fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = Some((rows, cols));
        self
    }

    /// Assemble and validate the configuration
    pub fn build(self) -> VisualizerResult<RunConfig> {
        let mut config = RunConfig::default();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(delay) = self.step_delay {
            config.step_delay = delay;
        }
        if let Some(budget) = self.checkpoint_budget {
            config.checkpoint_budget = Some(budget);
        }
        if let Some(buckets) = self.bucket_count {
            config.bucket_count = buckets;
        }
        if let Some((rows, cols)) = self.grid {
            config.grid_rows = rows;
            config.grid_cols = cols;
        }
        config.validate()?;
        Ok(config)
    }
}
