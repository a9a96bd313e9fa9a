//! Terminal renderer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`scene`]**: the picture rebuilt from checkpoints, independent of any terminal
//! - **[`app`]**: the [`Renderer`](crate::sequencer::Renderer) that applies checkpoints,
//!   draws frames and paces the run with keyboard control
//! - **[`panes`]**: stateless render functions for the canvas, narration and status bar
//! - **[`theme`]**: centralized color palette used by all panes

pub mod app;
pub mod panes;
pub mod scene;
pub mod theme;

pub use app::App;
pub use scene::Scene;
